#![no_std]

mod errors;
mod events;
mod storage;
mod types;


use soroban_sdk::{contract, contractimpl, Address, Env, String};

pub use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
pub use crate::types::{IpMetadata, IpToken};

/// IP-NFT token contract
///
/// Each token represents rights to one intellectual-property asset. The
/// metadata (title, IP kind, document URI and content hash) is fixed at mint
/// time together with the creator's address. Ownership follows the SEP-50
/// non-fungible interface (`owner_of`, `balance`, `transfer`) so the
/// marketplace and escrow contracts can take custody of tokens.
///
/// Minting is open: any account that authorizes the call mints to itself.
/// The collection admin is recorded for off-chain display and gates nothing.
#[contract]
pub struct IpNft;

#[contractimpl]
impl IpNft {
    /// Initialize the collection. `admin` is stored as the collection owner.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the collection has already been initialized
    pub fn initialize(e: &Env, admin: Address, name: String, symbol: String) -> Result<(), Error> {
        if has_admin(e) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        set_collection(e, &admin, &name, &symbol);
        extend_instance_ttl(e);
        Ok(())
    }

    /// Mint a new IP-NFT to `creator`.
    ///
    /// # Returns
    /// * The new token id; ids start at 1
    ///
    /// # Errors
    /// * `Error::InvalidMetadata` - If the title or URI is empty
    pub fn mint(e: &Env, creator: Address, metadata: IpMetadata) -> Result<u32, Error> {
        creator.require_auth();

        if !has_admin(e) {
            return Err(Error::NotInitialized);
        }

        if metadata.title.is_empty() || metadata.uri.is_empty() {
            return Err(Error::InvalidMetadata);
        }

        let token_id = get_token_counter(e)
            .checked_add(1)
            .ok_or(Error::TokenIdOverflow)?;

        let uri = metadata.uri.clone();
        let token = IpToken {
            token_id,
            creator: creator.clone(),
            minted_at: e.ledger().timestamp(),
            metadata,
        };

        set_token(e, &token);
        set_owner(e, token_id, &creator);
        set_balance(e, &creator, get_balance(e, &creator) + 1);
        set_token_counter(e, token_id);

        Minted {
            creator,
            token_id,
            uri,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(token_id)
    }

    /// Transfer `token_id` from `from` to `to`.
    ///
    /// # Errors
    /// * `Error::NonExistentToken` - If the token was never minted
    /// * `Error::NotOwner` - If `from` does not own the token
    pub fn transfer(e: &Env, from: Address, to: Address, token_id: u32) -> Result<(), Error> {
        from.require_auth();

        let owner = get_owner(e, token_id).ok_or(Error::NonExistentToken)?;
        if owner != from {
            return Err(Error::NotOwner);
        }
        if from == to {
            return Err(Error::InvalidRecipient);
        }

        set_owner(e, token_id, &to);
        set_balance(e, &from, get_balance(e, &from).saturating_sub(1));
        set_balance(e, &to, get_balance(e, &to) + 1);

        Transfer { from, to, token_id }.publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    /// Owner of `token_id`.
    pub fn owner_of(e: &Env, token_id: u32) -> Result<Address, Error> {
        get_owner(e, token_id).ok_or(Error::NonExistentToken)
    }

    /// Number of tokens held by `owner`.
    pub fn balance(e: &Env, owner: Address) -> u32 {
        get_balance(e, &owner)
    }

    pub fn ip_metadata(e: &Env, token_id: u32) -> Result<IpMetadata, Error> {
        get_token(e, token_id)
            .map(|token| token.metadata)
            .ok_or(Error::NonExistentToken)
    }

    pub fn token_uri(e: &Env, token_id: u32) -> Result<String, Error> {
        get_token(e, token_id)
            .map(|token| token.metadata.uri)
            .ok_or(Error::NonExistentToken)
    }

    /// Address that minted `token_id`, regardless of the current owner.
    pub fn creator_of(e: &Env, token_id: u32) -> Result<Address, Error> {
        get_token(e, token_id)
            .map(|token| token.creator)
            .ok_or(Error::NonExistentToken)
    }

    pub fn get_token(e: &Env, token_id: u32) -> Result<IpToken, Error> {
        get_token(e, token_id).ok_or(Error::NonExistentToken)
    }

    pub fn total_supply(e: &Env) -> u32 {
        get_token_counter(e)
    }

    pub fn name(e: &Env) -> Result<String, Error> {
        get_name(e).ok_or(Error::NotInitialized)
    }

    pub fn symbol(e: &Env) -> Result<String, Error> {
        get_symbol(e).ok_or(Error::NotInitialized)
    }

    /// Collection owner recorded at initialization
    pub fn admin(e: &Env) -> Result<Address, Error> {
        get_admin(e).ok_or(Error::NotInitialized)
    }
}
