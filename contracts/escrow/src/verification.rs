use soroban_sdk::{Address, BytesN, Env, String};

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;
use crate::{load_active_escrow, load_config};

fn requirement_at(
    escrow: &EscrowAgreement,
    index: u32,
) -> Result<VerificationRequirement, Error> {
    escrow
        .requirements
        .get(index)
        .ok_or(Error::RequirementNotFound)
}

/// Whether `evidence_hash` satisfies the requirement's expected hash.
fn hash_matches(expected: &BytesN<32>, evidence_hash: &BytesN<32>) -> bool {
    expected.to_array() == [0u8; 32] || expected == evidence_hash
}

pub fn submit_verification(
    e: &Env,
    seller: Address,
    escrow_id: u64,
    index: u32,
    evidence_hash: BytesN<32>,
    evidence_uri: String,
) -> Result<(), Error> {
    seller.require_auth();
    acquire_lock(e)?;

    let mut escrow = load_active_escrow(e, escrow_id)?;
    if escrow.seller != seller {
        return Err(Error::Unauthorized);
    }

    let mut requirement = requirement_at(&escrow, index)?;
    if requirement.status != VerificationStatus::Pending {
        return Err(Error::InvalidRequirementStatus);
    }

    let now = e.ledger().timestamp();
    if now > requirement.deadline {
        return Err(Error::DeadlinePassed);
    }

    if !hash_matches(&requirement.expected_hash, &evidence_hash) {
        return Err(Error::HashMismatch);
    }

    requirement.status = VerificationStatus::Submitted;
    requirement.evidence_hash = Some(evidence_hash.clone());
    requirement.evidence_uri = Some(evidence_uri.clone());
    requirement.submitted_at = now;
    escrow.requirements.set(index, requirement);
    set_escrow(e, &escrow);

    VerificationSubmitted {
        escrow_id,
        index,
        evidence_hash,
        evidence_uri,
    }
    .publish(e);

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}

/// Accept submitted evidence. The buyer and the dispute resolver may approve.
pub fn approve_verification(
    e: &Env,
    approver: Address,
    escrow_id: u64,
    index: u32,
) -> Result<(), Error> {
    approver.require_auth();
    acquire_lock(e)?;

    let config = load_config(e)?;
    let mut escrow = load_active_escrow(e, escrow_id)?;
    if approver != escrow.buyer && approver != config.dispute_resolver {
        return Err(Error::Unauthorized);
    }

    let mut requirement = requirement_at(&escrow, index)?;
    if requirement.status != VerificationStatus::Submitted {
        return Err(Error::InvalidRequirementStatus);
    }

    requirement.status = VerificationStatus::Approved;
    requirement.approved_at = e.ledger().timestamp();
    escrow.requirements.set(index, requirement);
    set_escrow(e, &escrow);

    VerificationApproved {
        escrow_id,
        index,
        approver,
    }
    .publish(e);

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}

/// Refuse submitted evidence. The agreement moves to Disputed and waits for
/// the dispute resolver.
pub fn reject_verification(
    e: &Env,
    buyer: Address,
    escrow_id: u64,
    index: u32,
    reason: String,
) -> Result<(), Error> {
    buyer.require_auth();
    acquire_lock(e)?;

    let mut escrow = load_active_escrow(e, escrow_id)?;
    if escrow.buyer != buyer {
        return Err(Error::Unauthorized);
    }

    let mut requirement = requirement_at(&escrow, index)?;
    if requirement.status != VerificationStatus::Submitted {
        return Err(Error::InvalidRequirementStatus);
    }

    let now = e.ledger().timestamp();
    requirement.status = VerificationStatus::Rejected;
    escrow.requirements.set(index, requirement);
    escrow.status = EscrowStatus::Disputed;
    set_escrow(e, &escrow);
    set_dispute(
        e,
        escrow_id,
        &Dispute {
            raised_by: buyer.clone(),
            reason: reason.clone(),
            raised_at: now,
            resolved_at: None,
        },
    );

    VerificationRejected {
        escrow_id,
        index,
        reason: reason.clone(),
    }
    .publish(e);
    DisputeRaised {
        escrow_id,
        raised_by: buyer,
        reason,
    }
    .publish(e);

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}
