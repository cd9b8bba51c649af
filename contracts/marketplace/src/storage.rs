use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{
    Auction, Bid, Listing, MarketStats, MarketplaceConfig, SaleRef, StorageKey,
    INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INITIALIZATION STORAGE
// ============================================================================

/// Check if contract is initialized
pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&StorageKey::Initialized)
        .unwrap_or(false)
}

/// Mark contract as initialized
pub fn set_initialized(e: &Env) {
    e.storage()
        .instance()
        .set(&StorageKey::Initialized, &true);
}

/// Extend the TTL of instance storage.
/// Called during state-changing operations.
pub fn extend_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ============================================================================
// REENTRANCY GUARD
// ============================================================================

/// Mark a state-changing call as in progress.
///
/// The flag is released by [`release_lock`] on success; an `Err` return
/// reverts the whole invocation, flag included.
pub fn acquire_lock(e: &Env) -> Result<(), Error> {
    if e.storage().instance().has(&StorageKey::Locked) {
        return Err(Error::ReentrancyDetected);
    }
    e.storage().instance().set(&StorageKey::Locked, &true);
    Ok(())
}

pub fn release_lock(e: &Env) {
    e.storage().instance().remove(&StorageKey::Locked);
}

// ============================================================================
// CONFIG STORAGE
// ============================================================================

/// Get marketplace configuration
pub fn get_config(e: &Env) -> Option<MarketplaceConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, MarketplaceConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

/// Set marketplace configuration
pub fn set_config(e: &Env, config: &MarketplaceConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// LISTING STORAGE
// ============================================================================

pub fn get_listing(e: &Env, listing_id: u64) -> Option<Listing> {
    let key = StorageKey::Listing(listing_id);
    let listing = e.storage().persistent().get::<_, Listing>(&key);
    if listing.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    listing
}

pub fn set_listing(e: &Env, listing: &Listing) {
    let key = StorageKey::Listing(listing.listing_id);
    e.storage().persistent().set(&key, listing);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Reserve the next listing ID
pub fn next_listing_id(e: &Env) -> u64 {
    let key = StorageKey::ListingCounter;
    let id = e.storage().instance().get::<_, u64>(&key).unwrap_or(0) + 1;
    e.storage().instance().set(&key, &id);
    id
}

// ============================================================================
// AUCTION STORAGE
// ============================================================================

pub fn get_auction(e: &Env, auction_id: u64) -> Option<Auction> {
    let key = StorageKey::Auction(auction_id);
    let auction = e.storage().persistent().get::<_, Auction>(&key);
    if auction.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    auction
}

pub fn set_auction(e: &Env, auction: &Auction) {
    let key = StorageKey::Auction(auction.auction_id);
    e.storage().persistent().set(&key, auction);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Reserve the next auction ID
pub fn next_auction_id(e: &Env) -> u64 {
    let key = StorageKey::AuctionCounter;
    let id = e.storage().instance().get::<_, u64>(&key).unwrap_or(0) + 1;
    e.storage().instance().set(&key, &id);
    id
}

pub fn get_bid_count(e: &Env, auction_id: u64) -> u32 {
    e.storage()
        .persistent()
        .get::<_, u32>(&StorageKey::BidCount(auction_id))
        .unwrap_or(0)
}

/// Bids placed on an auction, oldest first
pub fn get_bid_history(e: &Env, auction_id: u64) -> Vec<Bid> {
    let mut history = Vec::new(e);
    for index in 0..get_bid_count(e, auction_id) {
        let key = StorageKey::BidHistory(auction_id, index);
        if let Some(bid) = e.storage().persistent().get::<_, Bid>(&key) {
            history.push_back(bid);
        }
    }
    history
}

/// Store `bid` under its own index so each bid writes one small entry.
pub fn add_bid_to_history(e: &Env, auction_id: u64, bid: Bid) {
    let index = get_bid_count(e, auction_id);
    let bid_key = StorageKey::BidHistory(auction_id, index);
    e.storage().persistent().set(&bid_key, &bid);
    e.storage()
        .persistent()
        .extend_ttl(&bid_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);

    let count_key = StorageKey::BidCount(auction_id);
    e.storage().persistent().set(&count_key, &(index + 1));
    e.storage()
        .persistent()
        .extend_ttl(&count_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// TOKEN SALE INDEX
// ============================================================================

/// Open listing or auction for a token, if any
pub fn get_token_sale(e: &Env, token: &Address, token_id: u32) -> Option<SaleRef> {
    let key = StorageKey::TokenSale(token.clone(), token_id);
    let sale = e.storage().persistent().get::<_, SaleRef>(&key);
    if sale.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    sale
}

pub fn set_token_sale(e: &Env, token: &Address, token_id: u32, sale: &SaleRef) {
    let key = StorageKey::TokenSale(token.clone(), token_id);
    e.storage().persistent().set(&key, sale);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn clear_token_sale(e: &Env, token: &Address, token_id: u32) {
    let key = StorageKey::TokenSale(token.clone(), token_id);
    e.storage().persistent().remove(&key);
}

// ============================================================================
// STATS STORAGE
// ============================================================================

pub fn get_stats(e: &Env) -> MarketStats {
    e.storage()
        .persistent()
        .get::<_, MarketStats>(&StorageKey::Stats)
        .unwrap_or_default()
}

pub fn set_stats(e: &Env, stats: &MarketStats) {
    let key = StorageKey::Stats;
    e.storage().persistent().set(&key, stats);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
