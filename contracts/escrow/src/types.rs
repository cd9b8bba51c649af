use ipnft_custody::TokenStandard;
use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Initialized,
    Config,
    /// Agreement by escrow ID
    Escrow(u64),
    /// Last escrow ID
    EscrowCounter,
    /// Escrow IDs an address is buyer or seller in
    PartyEscrows(Address),
    /// Dispute raised on an agreement
    Dispute(u64),
    Locked,
}

/// Kind of check a requirement stands for.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerificationType {
    DocumentHash = 0,
    PhysicalInspection = 1,
    LegalReview = 2,
    TechnicalAudit = 3,
    ThirdPartyCertification = 4,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerificationStatus {
    Pending = 0,
    Submitted = 1,
    Approved = 2,
    Rejected = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EscrowStatus {
    Active = 0,
    Completed = 1,
    Disputed = 2,
    ResolvedForSeller = 3,
    ResolvedForBuyer = 4,
    Cancelled = 5,
    Refunded = 6,
}

/// Requirement as supplied when an escrow is opened.
///
/// An all-zero `expected_hash` accepts any evidence hash.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequirementInput {
    pub verification_type: VerificationType,
    pub description: String,
    pub expected_hash: BytesN<32>,
    pub deadline: u64,
}

/// One condition the seller must evidence and the buyer must accept.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationRequirement {
    pub verification_type: VerificationType,
    pub description: String,
    pub expected_hash: BytesN<32>,
    pub deadline: u64,
    pub status: VerificationStatus,
    pub evidence_hash: Option<BytesN<32>>,
    pub evidence_uri: Option<String>,
    pub submitted_at: u64,
    pub approved_at: u64,
}

/// Stored next to the agreement under `StorageKey::Dispute`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dispute {
    pub raised_by: Address,
    pub reason: String,
    pub raised_at: u64,
    pub resolved_at: Option<u64>,
}

/// Conditional sale of a token. The contract holds both the price and the
/// token from creation until the agreement settles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowAgreement {
    pub escrow_id: u64,
    pub token: Address,
    pub token_id: u32,
    pub standard: TokenStandard,
    pub seller: Address,
    pub buyer: Address,
    pub price: i128,
    pub status: EscrowStatus,
    pub created_at: u64,
    pub completion_deadline: u64,
    pub requirements: Vec<VerificationRequirement>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    pub admin: Address,
    pub payment_token: Address,
    /// Arbitrator for disputed agreements
    pub dispute_resolver: Address,
    pub fee_bps: u32,
    pub updated_at: u64,
}

// ============================================================================
// CONSTANTS
// ============================================================================

pub const MAX_REQUIREMENTS: u32 = 10;

/// Time after the last requirement deadline during which the agreement can
/// still complete (7 days).
pub const COMPLETION_WINDOW: u64 = 7 * 86_400;

pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
