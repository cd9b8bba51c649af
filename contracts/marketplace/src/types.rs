use ipnft_custody::TokenStandard;
use soroban_sdk::{contracttype, Address};

/// Storage keys for the marketplace contract.
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Initialization flag
    Initialized,
    /// Marketplace configuration
    Config,
    /// Listing data by ID
    Listing(u64),
    /// Auction data by ID
    Auction(u64),
    /// Open sale by (token contract, token id)
    TokenSale(Address, u32),
    /// Bid on an auction by (auction ID, bid index)
    BidHistory(u64, u32),
    /// Number of bids placed on an auction
    BidCount(u64),
    /// Last listing ID
    ListingCounter,
    /// Last auction ID
    AuctionCounter,
    /// Aggregated sale statistics
    Stats,
    /// Set while a state-changing call is in progress
    Locked,
}

/// Where a token currently sits on the marketplace.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaleRef {
    Listing(u64),
    Auction(u64),
}

/// Fixed-price offer for a token held in contract custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub listing_id: u64,
    /// Token contract address
    pub token: Address,
    pub token_id: u32,
    pub standard: TokenStandard,
    pub seller: Address,
    /// Price in payment token units
    pub price: i128,
    /// Cleared on purchase or cancellation
    pub active: bool,
    pub created_at: u64,
}

/// Time-bounded English auction for a token held in contract custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    pub auction_id: u64,
    pub token: Address,
    pub token_id: u32,
    pub standard: TokenStandard,
    pub seller: Address,
    pub starting_price: i128,
    /// Highest accepted bid, 0 until the first bid
    pub current_bid: i128,
    pub current_bidder: Option<Address>,
    /// Moves forward when a bid lands inside the extension window
    pub end_time: u64,
    pub active: bool,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bid {
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Marketplace configuration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketplaceConfig {
    /// Owner; receives platform fees
    pub admin: Address,
    /// Token every price and bid is paid in
    pub payment_token: Address,
    /// Platform fee in basis points
    pub fee_bps: u32,
    pub is_paused: bool,
    pub updated_at: u64,
}

/// Running totals over completed sales and settled auctions.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarketStats {
    pub total_listings: u64,
    pub total_auctions: u64,
    pub total_sales: u64,
    pub total_volume: i128,
    pub total_fees: i128,
}

/// Minimum raise over the current bid, in basis points (5%)
pub const MIN_BID_INCREMENT_BPS: i128 = 500;

/// Bids closer than this to the end push the end out to now + this (seconds)
pub const AUCTION_EXTENSION_WINDOW: u64 = 600;

/// Shortest auction accepted (1 hour)
pub const MIN_AUCTION_DURATION: u64 = 3_600;

/// Longest auction accepted (30 days)
pub const MAX_AUCTION_DURATION: u64 = 30 * 86_400;

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for persistent storage (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;

/// TTL threshold for persistent storage
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
