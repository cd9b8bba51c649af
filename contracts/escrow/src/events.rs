use soroban_sdk::{contractevent, Address, BytesN, String};

use crate::types::EscrowStatus;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    #[topic]
    pub admin: Address,
    pub payment_token: Address,
    pub dispute_resolver: Address,
    pub fee_bps: u32,
}

/// Price and token are in custody
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCreated {
    #[topic]
    pub escrow_id: u64,
    #[topic]
    pub buyer: Address,
    #[topic]
    pub seller: Address,
    pub token: Address,
    pub token_id: u32,
    pub price: i128,
    pub requirement_count: u32,
    pub completion_deadline: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationSubmitted {
    #[topic]
    pub escrow_id: u64,
    pub index: u32,
    pub evidence_hash: BytesN<32>,
    pub evidence_uri: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationApproved {
    #[topic]
    pub escrow_id: u64,
    pub index: u32,
    pub approver: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationRejected {
    #[topic]
    pub escrow_id: u64,
    pub index: u32,
    pub reason: String,
}

/// Token released to the buyer and price paid out to the seller
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCompleted {
    #[topic]
    pub escrow_id: u64,
    pub buyer: Address,
    pub seller: Address,
    pub price: i128,
    pub fee: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeRaised {
    #[topic]
    pub escrow_id: u64,
    #[topic]
    pub raised_by: Address,
    pub reason: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolved {
    #[topic]
    pub escrow_id: u64,
    pub resolver: Address,
    pub favor_seller: bool,
    pub status: EscrowStatus,
}

/// Price returned to the buyer and token returned to the seller
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCancelled {
    #[topic]
    pub escrow_id: u64,
    pub cancelled_by: Address,
    pub status: EscrowStatus,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdated {
    #[topic]
    pub admin: Address,
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolverUpdated {
    #[topic]
    pub admin: Address,
    pub old_resolver: Address,
    pub new_resolver: Address,
}
