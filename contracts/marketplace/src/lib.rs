#![no_std]

mod auction;
mod errors;
mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

use ipnft_custody::{fees, holds, is_valid_token_id, move_token, TokenStandard};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
pub use crate::types::{
    Auction, Bid, Listing, MarketStats, MarketplaceConfig, SaleRef, AUCTION_EXTENSION_WINDOW,
    MAX_AUCTION_DURATION, MIN_AUCTION_DURATION,
};

// ============================================================================
// Contract
// ============================================================================

/// IP-NFT Marketplace Smart Contract
///
/// Sells IP-NFTs at a fixed price or by English auction. While a token is
/// listed or in auction the contract holds it, and a reverse index keyed by
/// `(token contract, token id)` keeps a token in at most one open sale.
///
/// Every completed sale pays the seller the price minus the platform fee and
/// sends the fee to the admin. Prices and bids are paid in the payment token
/// fixed at initialization.
#[contract]
pub struct Marketplace;

#[contractimpl]
impl Marketplace {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the marketplace.
    ///
    /// # Arguments
    /// * `admin` - Owner; receives platform fees and manages configuration
    /// * `payment_token` - Token contract prices and bids are paid in
    /// * `fee_bps` - Platform fee in basis points (100 = 1%, capped at 10%)
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the contract has already been initialized
    /// * `Error::FeeTooHigh` - If `fee_bps` is above the cap
    pub fn initialize(
        e: &Env,
        admin: Address,
        payment_token: Address,
        fee_bps: u32,
    ) -> Result<(), Error> {
        admin.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        if fee_bps > fees::MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }

        let config = MarketplaceConfig {
            admin: admin.clone(),
            payment_token: payment_token.clone(),
            fee_bps,
            is_paused: false,
            updated_at: e.ledger().timestamp(),
        };

        set_config(e, &config);
        set_initialized(e);
        extend_instance_ttl(e);

        Initialized {
            admin,
            payment_token,
            fee_bps,
        }
        .publish(e);

        Ok(())
    }

    // ========================================================================
    // MARKETPLACE CONFIGURATION
    // ========================================================================

    /// Get marketplace configuration
    pub fn get_config(e: &Env) -> Result<MarketplaceConfig, Error> {
        load_config(e)
    }

    /// Current platform fee in basis points
    pub fn get_fee_rate(e: &Env) -> Result<u32, Error> {
        Ok(load_config(e)?.fee_bps)
    }

    /// Update the platform fee (admin only)
    ///
    /// # Errors
    /// * `Error::FeeTooHigh` - If `new_fee_bps` is above 1000 (10%)
    pub fn set_fee_rate(e: &Env, admin: Address, new_fee_bps: u32) -> Result<(), Error> {
        let mut config = require_admin(e, &admin)?;

        if new_fee_bps > fees::MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }

        let old_fee_bps = config.fee_bps;
        config.fee_bps = new_fee_bps;
        config.updated_at = e.ledger().timestamp();
        set_config(e, &config);

        FeeUpdated {
            admin,
            old_fee_bps,
            new_fee_bps,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    /// Pause or unpause marketplace (admin only)
    ///
    /// A paused marketplace rejects new listings, auctions, purchases and
    /// bids. Cancellation and auction settlement stay available so custodied
    /// tokens and funds can always leave.
    pub fn set_paused(e: &Env, admin: Address, paused: bool) -> Result<(), Error> {
        let mut config = require_admin(e, &admin)?;

        config.is_paused = paused;
        config.updated_at = e.ledger().timestamp();
        set_config(e, &config);

        MarketplacePaused {
            admin,
            is_paused: paused,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // FIXED-PRICE LISTINGS
    // ========================================================================

    /// List a token for sale at a fixed price.
    ///
    /// The token moves into contract custody until it is bought or the
    /// listing is cancelled.
    ///
    /// # Arguments
    /// * `seller` - Current owner of the token
    /// * `token` - Token contract address
    /// * `token_id` - Token id (always 0 for `TokenStandard::StellarAsset`)
    /// * `standard` - How the token contract tracks ownership
    /// * `price` - Price in payment token units
    ///
    /// # Returns
    /// * Listing ID if successful
    ///
    /// # Errors
    /// * `Error::InvalidPrice` - If `price` is not positive
    /// * `Error::NotTokenOwner` - If `seller` does not hold the token
    /// * `Error::AlreadyOnSale` - If the token is already listed or in auction
    pub fn list_item(
        e: &Env,
        seller: Address,
        token: Address,
        token_id: u32,
        standard: TokenStandard,
        price: i128,
    ) -> Result<u64, Error> {
        seller.require_auth();
        acquire_lock(e)?;

        load_open_config(e)?;

        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        ensure_can_sell(e, &seller, &token, token_id, standard)?;

        let listing_id = next_listing_id(e);
        let listing = Listing {
            listing_id,
            token: token.clone(),
            token_id,
            standard,
            seller: seller.clone(),
            price,
            active: true,
            created_at: e.ledger().timestamp(),
        };

        set_listing(e, &listing);
        set_token_sale(e, &token, token_id, &SaleRef::Listing(listing_id));

        let mut stats = get_stats(e);
        stats.total_listings += 1;
        set_stats(e, &stats);

        move_token(
            e,
            standard,
            &token,
            token_id,
            &seller,
            &e.current_contract_address(),
        );

        ItemListed {
            listing_id,
            seller,
            token,
            token_id,
            standard,
            price,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(listing_id)
    }

    /// Buy a listed token.
    ///
    /// `payment` is pulled from the buyer in full; the seller receives the
    /// price minus the platform fee, the admin receives the fee and anything
    /// paid above the price goes back to the buyer.
    ///
    /// # Errors
    /// * `Error::ListingNotActive` - If the listing was sold or cancelled
    /// * `Error::CannotBuyOwnListing` - If `buyer` is the seller
    /// * `Error::InsufficientPayment` - If `payment` is below the price
    pub fn buy_item(e: &Env, buyer: Address, listing_id: u64, payment: i128) -> Result<(), Error> {
        buyer.require_auth();
        acquire_lock(e)?;

        let config = load_open_config(e)?;

        let mut listing = get_listing(e, listing_id).ok_or(Error::ListingNotFound)?;

        if !listing.active {
            return Err(Error::ListingNotActive);
        }

        if buyer == listing.seller {
            return Err(Error::CannotBuyOwnListing);
        }

        if payment < listing.price {
            return Err(Error::InsufficientPayment);
        }

        let (seller_amount, fee) =
            fees::split(listing.price, config.fee_bps).ok_or(Error::ArithmeticOverflow)?;
        let excess = payment - listing.price;

        // The listing closes before any funds or tokens move.
        listing.active = false;
        set_listing(e, &listing);
        clear_token_sale(e, &listing.token, listing.token_id);
        record_sale(e, listing.price, fee)?;

        let contract = e.current_contract_address();
        let payment_client = token::Client::new(e, &config.payment_token);
        payment_client.transfer(&buyer, &contract, &payment);
        pay_out(e, &config, &listing.seller, seller_amount, fee);
        if excess > 0 {
            payment_client.transfer(&contract, &buyer, &excess);
        }

        move_token(
            e,
            listing.standard,
            &listing.token,
            listing.token_id,
            &contract,
            &buyer,
        );

        ItemSold {
            listing_id,
            buyer,
            seller: listing.seller,
            price: listing.price,
            fee,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(())
    }

    /// Cancel an active listing and return the token (seller only)
    pub fn cancel_listing(e: &Env, seller: Address, listing_id: u64) -> Result<(), Error> {
        seller.require_auth();
        acquire_lock(e)?;

        load_config(e)?;

        let mut listing = get_listing(e, listing_id).ok_or(Error::ListingNotFound)?;

        if listing.seller != seller {
            return Err(Error::Unauthorized);
        }

        if !listing.active {
            return Err(Error::ListingNotActive);
        }

        listing.active = false;
        set_listing(e, &listing);
        clear_token_sale(e, &listing.token, listing.token_id);

        move_token(
            e,
            listing.standard,
            &listing.token,
            listing.token_id,
            &e.current_contract_address(),
            &seller,
        );

        ListingCancelled { listing_id, seller }.publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // AUCTIONS
    // ========================================================================

    /// Open an auction for a token.
    ///
    /// # Arguments
    /// * `starting_price` - Lowest acceptable first bid
    /// * `duration` - Seconds until the auction ends, between 1 hour and 30 days
    ///
    /// # Returns
    /// * Auction ID if successful
    pub fn create_auction(
        e: &Env,
        seller: Address,
        token: Address,
        token_id: u32,
        standard: TokenStandard,
        starting_price: i128,
        duration: u64,
    ) -> Result<u64, Error> {
        auction::create_auction(e, seller, token, token_id, standard, starting_price, duration)
    }

    /// Bid on an active auction.
    ///
    /// The first bid must reach the starting price; later bids must beat the
    /// current bid by at least 5%. The outbid bidder is refunded in full.
    pub fn place_bid(e: &Env, bidder: Address, auction_id: u64, amount: i128) -> Result<(), Error> {
        auction::place_bid(e, bidder, auction_id, amount)
    }

    /// Settle an auction whose end time has passed. Callable by anyone.
    pub fn end_auction(e: &Env, auction_id: u64) -> Result<(), Error> {
        auction::end_auction(e, auction_id)
    }

    /// Cancel an auction that has no bids (seller only)
    pub fn cancel_auction(e: &Env, seller: Address, auction_id: u64) -> Result<(), Error> {
        auction::cancel_auction(e, seller, auction_id)
    }

    /// Smallest bid the auction currently accepts
    pub fn get_minimum_bid(e: &Env, auction_id: u64) -> Result<i128, Error> {
        let auction = get_auction(e, auction_id).ok_or(Error::AuctionNotFound)?;
        auction::minimum_bid(&auction).ok_or(Error::ArithmeticOverflow)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_listing(e: &Env, listing_id: u64) -> Result<Listing, Error> {
        get_listing(e, listing_id).ok_or(Error::ListingNotFound)
    }

    pub fn get_auction(e: &Env, auction_id: u64) -> Result<Auction, Error> {
        get_auction(e, auction_id).ok_or(Error::AuctionNotFound)
    }

    pub fn get_bid_history(e: &Env, auction_id: u64) -> Result<Vec<Bid>, Error> {
        if get_auction(e, auction_id).is_none() {
            return Err(Error::AuctionNotFound);
        }
        Ok(get_bid_history(e, auction_id))
    }

    /// Open listing or auction holding the token, if any
    pub fn get_sale_for_token(e: &Env, token: Address, token_id: u32) -> Option<SaleRef> {
        get_token_sale(e, &token, token_id)
    }

    /// Totals over all listings, auctions and completed sales
    pub fn get_stats(e: &Env) -> MarketStats {
        get_stats(e)
    }

    /// Platform fee the marketplace would take on a sale of `amount`
    pub fn calculate_fee(e: &Env, amount: i128) -> Result<i128, Error> {
        let config = load_config(e)?;
        let (_, fee) = fees::split(amount, config.fee_bps).ok_or(Error::ArithmeticOverflow)?;
        Ok(fee)
    }
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

pub(crate) fn load_config(e: &Env) -> Result<MarketplaceConfig, Error> {
    get_config(e).ok_or(Error::NotInitialized)
}

/// Config for operations that are blocked while the marketplace is paused.
pub(crate) fn load_open_config(e: &Env) -> Result<MarketplaceConfig, Error> {
    let config = load_config(e)?;
    if config.is_paused {
        return Err(Error::MarketplacePaused);
    }
    Ok(config)
}

fn require_admin(e: &Env, admin: &Address) -> Result<MarketplaceConfig, Error> {
    admin.require_auth();

    let config = load_config(e)?;
    if *admin != config.admin {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}

/// Checks that `seller` may put the token up for sale.
pub(crate) fn ensure_can_sell(
    e: &Env,
    seller: &Address,
    token: &Address,
    token_id: u32,
    standard: TokenStandard,
) -> Result<(), Error> {
    if !is_valid_token_id(standard, token_id) {
        return Err(Error::InvalidTokenId);
    }

    if get_token_sale(e, token, token_id).is_some() {
        return Err(Error::AlreadyOnSale);
    }

    if !holds(e, standard, token, token_id, seller) {
        return Err(Error::NotTokenOwner);
    }

    Ok(())
}

/// Pays sale proceeds held by the contract to the seller and the admin.
pub(crate) fn pay_out(
    e: &Env,
    config: &MarketplaceConfig,
    seller: &Address,
    seller_amount: i128,
    fee: i128,
) {
    let contract = e.current_contract_address();
    let payment_client = token::Client::new(e, &config.payment_token);

    if seller_amount > 0 {
        payment_client.transfer(&contract, seller, &seller_amount);
    }
    if fee > 0 {
        payment_client.transfer(&contract, &config.admin, &fee);
    }
}

pub(crate) fn record_sale(e: &Env, amount: i128, fee: i128) -> Result<(), Error> {
    let mut stats = get_stats(e);
    stats.total_sales += 1;
    stats.total_volume = stats
        .total_volume
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    stats.total_fees = stats
        .total_fees
        .checked_add(fee)
        .ok_or(Error::ArithmeticOverflow)?;
    set_stats(e, &stats);
    Ok(())
}
