use ipnft_custody::TokenStandard;
use soroban_sdk::{contractevent, Address};

/// Event emitted when marketplace is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    #[topic]
    pub admin: Address,
    pub payment_token: Address,
    pub fee_bps: u32,
}

/// Event emitted when a token is listed at a fixed price
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemListed {
    #[topic]
    pub listing_id: u64,
    #[topic]
    pub seller: Address,
    pub token: Address,
    pub token_id: u32,
    pub standard: TokenStandard,
    pub price: i128,
}

/// Event emitted when a listing is bought
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemSold {
    #[topic]
    pub listing_id: u64,
    #[topic]
    pub buyer: Address,
    pub seller: Address,
    pub price: i128,
    pub fee: i128,
}

/// Event emitted when a seller withdraws a listing
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingCancelled {
    #[topic]
    pub listing_id: u64,
    pub seller: Address,
}

/// Event emitted when an auction opens
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreated {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub seller: Address,
    pub token: Address,
    pub token_id: u32,
    pub standard: TokenStandard,
    pub starting_price: i128,
    pub end_time: u64,
}

/// Event emitted when a bid is accepted
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidPlaced {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub bidder: Address,
    pub amount: i128,
}

/// Event emitted when a late bid pushes the auction end out
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionExtended {
    #[topic]
    pub auction_id: u64,
    pub new_end_time: u64,
}

/// Event emitted when an auction settles with a winner
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionEnded {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub winner: Address,
    pub amount: i128,
    pub fee: i128,
}

/// Event emitted when an auction closes without a sale
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCancelled {
    #[topic]
    pub auction_id: u64,
    pub seller: Address,
}

/// Event emitted when fee rate is updated
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdated {
    #[topic]
    pub admin: Address,
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
}

/// Event emitted when marketplace is paused/unpaused
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketplacePaused {
    #[topic]
    pub admin: Address,
    pub is_paused: bool,
}
