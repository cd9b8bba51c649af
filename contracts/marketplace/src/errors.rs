use soroban_sdk::contracterror;

/// Error codes for the marketplace contract.
/// Uses error codes starting at 500 to avoid conflicts with other contracts.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized
    AlreadyInitialized = 500,
    /// Contract has not been initialized
    NotInitialized = 501,
    /// Caller does not have required role or permissions
    Unauthorized = 502,
    /// Price must be greater than zero
    InvalidPrice = 503,
    /// Auction duration outside the accepted range
    InvalidDuration = 504,
    /// Token id is not valid for the token standard
    InvalidTokenId = 505,
    /// Caller does not hold the token
    NotTokenOwner = 506,
    /// Token is already listed or in auction
    AlreadyOnSale = 507,
    /// Listing not found
    ListingNotFound = 508,
    /// Listing was sold or cancelled
    ListingNotActive = 509,
    /// Auction not found
    AuctionNotFound = 510,
    /// Auction was settled or cancelled
    AuctionNotActive = 511,
    /// Auction end time has passed
    AuctionEnded = 512,
    /// Auction end time has not passed yet
    AuctionNotEnded = 513,
    /// Auction already has a bid
    AuctionHasBids = 514,
    /// Bid below the starting price or minimum increment
    BidTooLow = 515,
    /// Seller cannot bid on their own auction
    SellerCannotBid = 516,
    /// Seller cannot buy their own listing
    CannotBuyOwnListing = 517,
    /// Payment below the listed price
    InsufficientPayment = 518,
    /// Fee above the 10% cap
    FeeTooHigh = 519,
    /// Arithmetic overflow in price or fee accounting
    ArithmeticOverflow = 520,
    /// Marketplace is paused
    MarketplacePaused = 521,
    /// State-changing call entered while another is in progress
    ReentrancyDetected = 522,
}
