use soroban_sdk::{contracttype, Address, BytesN, String};

/// Storage keys for the IP-NFT contract.
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Admin address
    Admin,
    /// Collection name
    Name,
    /// Collection symbol
    Symbol,
    /// Last minted token id
    TokenCounter,
    /// Owner by token id
    Owner(u32),
    /// Token count by owner
    Balance(Address),
    /// IP record by token id
    Token(u32),
}

/// Description of the intellectual-property asset a token stands for.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IpMetadata {
    /// Asset title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Kind of IP (patent, trademark, copyright, ...)
    pub ip_type: String,
    /// Off-chain document location, usually an IPFS URI
    pub uri: String,
    /// SHA-256 of the off-chain document
    pub content_hash: BytesN<32>,
}

/// Immutable record written at mint time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IpToken {
    pub token_id: u32,
    pub creator: Address,
    pub minted_at: u64,
    pub metadata: IpMetadata,
}

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
