#![no_std]

//! Token custody shared by the IP-NFT marketplace and escrow contracts.
//!
//! Both contracts hold a token while a sale, auction or escrow agreement is
//! open. A token is identified by its contract address and id, and is held
//! under one of two standards:
//!
//! - [`TokenStandard::NonFungible`]: a SEP-50 style NFT contract exposing
//!   `owner_of` and `transfer`, such as the `ip-nft` contract.
//! - [`TokenStandard::StellarAsset`]: a ledger-native asset with a single
//!   indivisible unit, held through its Stellar Asset Contract. The token id
//!   is always `0`.

use soroban_sdk::{contractclient, contracttype, token, Address, Env};

pub mod fees;

/// Amount of a [`TokenStandard::StellarAsset`] that represents one IP-NFT.
pub const ASSET_UNIT: i128 = 1;

/// Token standard a custodied token follows.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenStandard {
    /// SEP-50 non-fungible token contract
    NonFungible = 0,
    /// Unit-supply asset behind a Stellar Asset Contract
    StellarAsset = 1,
}

/// The subset of the non-fungible token interface custody relies on.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    fn owner_of(env: Env, token_id: u32) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u32);
}

/// Whether `token_id` is a valid id under `standard`.
pub fn is_valid_token_id(standard: TokenStandard, token_id: u32) -> bool {
    match standard {
        TokenStandard::NonFungible => true,
        TokenStandard::StellarAsset => token_id == 0,
    }
}

/// Checks the token ledger for `holder` owning the token.
///
/// A token the ledger does not know about is reported as not held instead of
/// trapping, so callers can return their own error.
pub fn holds(
    e: &Env,
    standard: TokenStandard,
    token: &Address,
    token_id: u32,
    holder: &Address,
) -> bool {
    match standard {
        TokenStandard::NonFungible => matches!(
            NonFungibleClient::new(e, token).try_owner_of(&token_id),
            Ok(Ok(owner)) if owner == *holder
        ),
        TokenStandard::StellarAsset => token::Client::new(e, token).balance(holder) >= ASSET_UNIT,
    }
}

/// Moves the token from `from` to `to`.
///
/// `from` must have authorized the enclosing invocation, or be the calling
/// contract itself.
pub fn move_token(
    e: &Env,
    standard: TokenStandard,
    token: &Address,
    token_id: u32,
    from: &Address,
    to: &Address,
) {
    match standard {
        TokenStandard::NonFungible => {
            NonFungibleClient::new(e, token).transfer(from, to, &token_id);
        }
        TokenStandard::StellarAsset => {
            token::Client::new(e, token).transfer(from, to, &ASSET_UNIT);
        }
    }
}
