use soroban_sdk::contracterror;

/// Error codes for the IP-NFT contract.
/// Uses error codes starting at 400 to avoid conflicts with the marketplace and escrow contracts.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized
    AlreadyInitialized = 400,
    /// Contract has not been initialized
    NotInitialized = 401,
    /// Token id was never minted
    NonExistentToken = 402,
    /// Sender does not own the token
    NotOwner = 403,
    /// Title or URI missing from the IP metadata
    InvalidMetadata = 404,
    /// Sender and recipient are the same account
    InvalidRecipient = 405,
    /// Token id space exhausted
    TokenIdOverflow = 406,
}
