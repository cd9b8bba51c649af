use soroban_sdk::contracterror;

/// Error codes for the escrow contract, numbered from 600.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 600,
    NotInitialized = 601,
    /// Caller is not a party allowed to perform the action
    Unauthorized = 602,
    /// Price must be greater than zero
    InvalidPrice = 603,
    /// Buyer and seller are the same address
    InvalidParties = 604,
    /// Token id is not valid for the token standard
    InvalidTokenId = 605,
    /// Seller does not hold the token
    NotTokenOwner = 606,
    /// Zero requirements, or more than the maximum
    InvalidRequirements = 607,
    /// Requirement deadline is not in the future
    InvalidDeadline = 608,
    EscrowNotFound = 609,
    /// Escrow is not in the Active state
    EscrowNotActive = 610,
    /// Escrow is not in the Disputed state
    NotDisputed = 611,
    /// Requirement index out of range
    RequirementNotFound = 612,
    /// Requirement is not in the state the action needs
    InvalidRequirementStatus = 613,
    /// Requirement or completion deadline has passed
    DeadlinePassed = 614,
    /// Evidence hash differs from the expected hash
    HashMismatch = 615,
    /// Some requirement is not yet approved
    VerificationsIncomplete = 616,
    /// Evidence was submitted and the completion deadline has not lapsed
    CannotCancel = 617,
    /// Fee above the 10% cap
    FeeTooHigh = 618,
    ArithmeticOverflow = 619,
    ReentrancyDetected = 620,
    /// No dispute was raised on the agreement
    DisputeNotFound = 621,
}
