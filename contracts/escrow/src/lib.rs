#![no_std]

mod errors;
mod events;
mod storage;
mod types;
mod verification;


use ipnft_custody::{fees, holds, is_valid_token_id, move_token, TokenStandard};
use soroban_sdk::{contract, contractimpl, log, token, Address, BytesN, Env, String, Vec};

pub use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
pub use crate::types::{
    Dispute, EscrowAgreement, EscrowConfig, EscrowStatus, RequirementInput,
    VerificationRequirement, VerificationStatus, VerificationType, COMPLETION_WINDOW,
    MAX_REQUIREMENTS,
};

// ============================================================================
// Contract
// ============================================================================

/// IP-NFT Escrow Smart Contract
///
/// Holds a buyer's payment and a seller's token while the seller evidences a
/// list of verification requirements. Once the buyer has approved every
/// requirement the agreement completes: the token goes to the buyer and the
/// price, minus the platform fee, to the seller.
///
/// Either party can raise a dispute while the agreement is active. The
/// dispute resolver then settles it for the seller or refunds the buyer.
#[contract]
pub struct Escrow;

#[contractimpl]
impl Escrow {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the escrow contract.
    ///
    /// # Arguments
    /// * `admin` - Owner; receives platform fees and manages configuration
    /// * `payment_token` - Token contract prices are paid in
    /// * `dispute_resolver` - Arbitrator for disputed agreements
    /// * `fee_bps` - Platform fee in basis points, capped at 1000
    pub fn initialize(
        e: &Env,
        admin: Address,
        payment_token: Address,
        dispute_resolver: Address,
        fee_bps: u32,
    ) -> Result<(), Error> {
        admin.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        if fee_bps > fees::MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }

        set_config(
            e,
            &EscrowConfig {
                admin: admin.clone(),
                payment_token: payment_token.clone(),
                dispute_resolver: dispute_resolver.clone(),
                fee_bps,
                updated_at: e.ledger().timestamp(),
            },
        );
        set_initialized(e);
        extend_instance_ttl(e);

        Initialized {
            admin,
            payment_token,
            dispute_resolver,
            fee_bps,
        }
        .publish(e);

        Ok(())
    }

    pub fn get_config(e: &Env) -> Result<EscrowConfig, Error> {
        load_config(e)
    }

    /// Replace the dispute resolver (admin only)
    pub fn set_dispute_resolver(e: &Env, admin: Address, resolver: Address) -> Result<(), Error> {
        let mut config = require_admin(e, &admin)?;

        let old_resolver = config.dispute_resolver;
        config.dispute_resolver = resolver.clone();
        config.updated_at = e.ledger().timestamp();
        set_config(e, &config);

        DisputeResolverUpdated {
            admin,
            old_resolver,
            new_resolver: resolver,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    /// Update the platform fee (admin only)
    ///
    /// # Errors
    /// * `Error::FeeTooHigh` - If `new_fee_bps` is above 1000 (10%)
    pub fn set_fee_rate(e: &Env, admin: Address, new_fee_bps: u32) -> Result<(), Error> {
        let mut config = require_admin(e, &admin)?;

        if new_fee_bps > fees::MAX_FEE_BPS {
            return Err(Error::FeeTooHigh);
        }

        let old_fee_bps = config.fee_bps;
        config.fee_bps = new_fee_bps;
        config.updated_at = e.ledger().timestamp();
        set_config(e, &config);

        FeeUpdated {
            admin,
            old_fee_bps,
            new_fee_bps,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // AGREEMENT LIFECYCLE
    // ========================================================================

    /// Open an escrow agreement.
    ///
    /// Both parties authorize the call. The price is taken from the buyer and
    /// the token from the seller, and both stay in the contract until the
    /// agreement completes, is resolved, or is cancelled.
    ///
    /// The completion deadline is the latest requirement deadline plus
    /// [`COMPLETION_WINDOW`].
    ///
    /// # Errors
    /// * `Error::InvalidPrice` - If `price` is not positive
    /// * `Error::InvalidParties` - If `buyer` and `seller` are the same
    /// * `Error::InvalidRequirements` - If there are no requirements or more than ten
    /// * `Error::InvalidDeadline` - If a requirement deadline is not in the future
    /// * `Error::NotTokenOwner` - If `seller` does not hold the token
    #[allow(clippy::too_many_arguments)]
    pub fn create_escrow(
        e: &Env,
        buyer: Address,
        token: Address,
        token_id: u32,
        standard: TokenStandard,
        seller: Address,
        price: i128,
        requirements: Vec<RequirementInput>,
    ) -> Result<u64, Error> {
        if buyer == seller {
            return Err(Error::InvalidParties);
        }
        buyer.require_auth();
        seller.require_auth();
        acquire_lock(e)?;

        let config = load_config(e)?;

        if price <= 0 {
            return Err(Error::InvalidPrice);
        }

        if requirements.is_empty() || requirements.len() > MAX_REQUIREMENTS {
            return Err(Error::InvalidRequirements);
        }

        let now = e.ledger().timestamp();
        let mut last_deadline = 0u64;
        let mut stored = Vec::new(e);
        for input in requirements.iter() {
            if input.deadline <= now {
                return Err(Error::InvalidDeadline);
            }
            last_deadline = last_deadline.max(input.deadline);
            stored.push_back(VerificationRequirement {
                verification_type: input.verification_type,
                description: input.description,
                expected_hash: input.expected_hash,
                deadline: input.deadline,
                status: VerificationStatus::Pending,
                evidence_hash: None,
                evidence_uri: None,
                submitted_at: 0,
                approved_at: 0,
            });
        }
        let completion_deadline = last_deadline
            .checked_add(COMPLETION_WINDOW)
            .ok_or(Error::ArithmeticOverflow)?;

        if !is_valid_token_id(standard, token_id) {
            return Err(Error::InvalidTokenId);
        }
        if !holds(e, standard, &token, token_id, &seller) {
            return Err(Error::NotTokenOwner);
        }

        let escrow_id = next_escrow_id(e);
        let escrow = EscrowAgreement {
            escrow_id,
            token: token.clone(),
            token_id,
            standard,
            seller: seller.clone(),
            buyer: buyer.clone(),
            price,
            status: EscrowStatus::Active,
            created_at: now,
            completion_deadline,
            requirements: stored,
        };
        set_escrow(e, &escrow);
        add_party_escrow(e, &buyer, escrow_id);
        add_party_escrow(e, &seller, escrow_id);

        let contract = e.current_contract_address();
        token::Client::new(e, &config.payment_token).transfer(&buyer, &contract, &price);
        move_token(e, standard, &token, token_id, &seller, &contract);

        EscrowCreated {
            escrow_id,
            buyer,
            seller,
            token,
            token_id,
            price,
            requirement_count: escrow.requirements.len(),
            completion_deadline,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(escrow_id)
    }

    /// Attach evidence to a pending requirement (seller only).
    ///
    /// # Errors
    /// * `Error::DeadlinePassed` - If the requirement deadline has passed
    /// * `Error::HashMismatch` - If the requirement expects a different hash
    pub fn submit_verification(
        e: &Env,
        seller: Address,
        escrow_id: u64,
        index: u32,
        evidence_hash: BytesN<32>,
        evidence_uri: String,
    ) -> Result<(), Error> {
        verification::submit_verification(e, seller, escrow_id, index, evidence_hash, evidence_uri)
    }

    pub fn approve_verification(
        e: &Env,
        approver: Address,
        escrow_id: u64,
        index: u32,
    ) -> Result<(), Error> {
        verification::approve_verification(e, approver, escrow_id, index)
    }

    pub fn reject_verification(
        e: &Env,
        buyer: Address,
        escrow_id: u64,
        index: u32,
        reason: String,
    ) -> Result<(), Error> {
        verification::reject_verification(e, buyer, escrow_id, index, reason)
    }

    /// Release the token to the buyer and the price to the seller.
    ///
    /// # Errors
    /// * `Error::VerificationsIncomplete` - If any requirement is not approved
    /// * `Error::DeadlinePassed` - If the completion deadline has lapsed
    pub fn complete_escrow(e: &Env, caller: Address, escrow_id: u64) -> Result<(), Error> {
        caller.require_auth();
        acquire_lock(e)?;

        let config = load_config(e)?;
        let mut escrow = load_active_escrow(e, escrow_id)?;
        require_party(&escrow, &caller)?;

        if escrow
            .requirements
            .iter()
            .any(|r| r.status != VerificationStatus::Approved)
        {
            return Err(Error::VerificationsIncomplete);
        }

        if e.ledger().timestamp() > escrow.completion_deadline {
            return Err(Error::DeadlinePassed);
        }

        escrow.status = EscrowStatus::Completed;
        set_escrow(e, &escrow);

        let fee = release_to_buyer(e, &config, &escrow)?;

        EscrowCompleted {
            escrow_id,
            buyer: escrow.buyer,
            seller: escrow.seller,
            price: escrow.price,
            fee,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(())
    }

    pub fn raise_dispute(
        e: &Env,
        caller: Address,
        escrow_id: u64,
        reason: String,
    ) -> Result<(), Error> {
        caller.require_auth();

        let mut escrow = load_active_escrow(e, escrow_id)?;
        require_party(&escrow, &caller)?;

        escrow.status = EscrowStatus::Disputed;
        set_escrow(e, &escrow);
        set_dispute(
            e,
            escrow_id,
            &Dispute {
                raised_by: caller.clone(),
                reason: reason.clone(),
                raised_at: e.ledger().timestamp(),
                resolved_at: None,
            },
        );

        DisputeRaised {
            escrow_id,
            raised_by: caller,
            reason,
        }
        .publish(e);

        extend_instance_ttl(e);
        Ok(())
    }

    /// Settle a disputed agreement (dispute resolver only).
    ///
    /// In favor of the seller the agreement settles as if completed. In favor
    /// of the buyer the price is refunded in full and the token goes back to
    /// the seller.
    pub fn resolve_dispute(
        e: &Env,
        resolver: Address,
        escrow_id: u64,
        favor_seller: bool,
    ) -> Result<(), Error> {
        resolver.require_auth();
        acquire_lock(e)?;

        let config = load_config(e)?;
        if resolver != config.dispute_resolver {
            return Err(Error::Unauthorized);
        }

        let mut escrow = load_escrow(e, escrow_id)?;
        if escrow.status != EscrowStatus::Disputed {
            return Err(Error::NotDisputed);
        }

        escrow.status = if favor_seller {
            EscrowStatus::ResolvedForSeller
        } else {
            EscrowStatus::ResolvedForBuyer
        };
        set_escrow(e, &escrow);
        if let Some(mut dispute) = get_dispute(e, escrow_id) {
            dispute.resolved_at = Some(e.ledger().timestamp());
            set_dispute(e, escrow_id, &dispute);
        }

        if favor_seller {
            release_to_buyer(e, &config, &escrow)?;
        } else {
            refund_buyer(e, &config, &escrow);
        }
        log!(e, "escrow {} resolved, favor_seller: {}", escrow_id, favor_seller);

        DisputeResolved {
            escrow_id,
            resolver,
            favor_seller,
            status: escrow.status,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(())
    }

    /// Unwind an active agreement. Price back to the buyer, token back to the
    /// seller.
    ///
    /// Allowed once the completion deadline has lapsed (status `Refunded`),
    /// or before the seller has submitted any evidence (status `Cancelled`).
    ///
    /// # Errors
    /// * `Error::CannotCancel` - If evidence was submitted and the completion
    ///   deadline has not lapsed
    pub fn cancel_escrow(e: &Env, caller: Address, escrow_id: u64) -> Result<(), Error> {
        caller.require_auth();
        acquire_lock(e)?;

        let config = load_config(e)?;
        let mut escrow = load_active_escrow(e, escrow_id)?;
        require_party(&escrow, &caller)?;

        let untouched = escrow
            .requirements
            .iter()
            .all(|r| r.status == VerificationStatus::Pending);

        escrow.status = if e.ledger().timestamp() > escrow.completion_deadline {
            EscrowStatus::Refunded
        } else if untouched {
            EscrowStatus::Cancelled
        } else {
            return Err(Error::CannotCancel);
        };
        set_escrow(e, &escrow);

        refund_buyer(e, &config, &escrow);

        EscrowCancelled {
            escrow_id,
            cancelled_by: caller,
            status: escrow.status,
        }
        .publish(e);

        release_lock(e);
        extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_escrow(e: &Env, escrow_id: u64) -> Result<EscrowAgreement, Error> {
        load_escrow(e, escrow_id)
    }

    pub fn get_requirement(
        e: &Env,
        escrow_id: u64,
        index: u32,
    ) -> Result<VerificationRequirement, Error> {
        load_escrow(e, escrow_id)?
            .requirements
            .get(index)
            .ok_or(Error::RequirementNotFound)
    }

    /// Dispute raised on the agreement, resolved or not
    pub fn get_dispute(e: &Env, escrow_id: u64) -> Result<Dispute, Error> {
        load_escrow(e, escrow_id)?;
        get_dispute(e, escrow_id).ok_or(Error::DisputeNotFound)
    }

    /// IDs of agreements `party` is buyer or seller in, oldest first
    pub fn get_escrows_by_party(e: &Env, party: Address) -> Vec<u64> {
        get_party_escrows(e, &party)
    }
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

pub(crate) fn load_config(e: &Env) -> Result<EscrowConfig, Error> {
    get_config(e).ok_or(Error::NotInitialized)
}

fn load_escrow(e: &Env, escrow_id: u64) -> Result<EscrowAgreement, Error> {
    get_escrow(e, escrow_id).ok_or(Error::EscrowNotFound)
}

pub(crate) fn load_active_escrow(e: &Env, escrow_id: u64) -> Result<EscrowAgreement, Error> {
    let escrow = load_escrow(e, escrow_id)?;
    if escrow.status != EscrowStatus::Active {
        return Err(Error::EscrowNotActive);
    }
    Ok(escrow)
}

fn require_admin(e: &Env, admin: &Address) -> Result<EscrowConfig, Error> {
    admin.require_auth();

    let config = load_config(e)?;
    if *admin != config.admin {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}

fn require_party(escrow: &EscrowAgreement, caller: &Address) -> Result<(), Error> {
    if *caller != escrow.buyer && *caller != escrow.seller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Token to the buyer, price split between seller and admin. Returns the fee.
fn release_to_buyer(e: &Env, config: &EscrowConfig, escrow: &EscrowAgreement) -> Result<i128, Error> {
    let (seller_amount, fee) =
        fees::split(escrow.price, config.fee_bps).ok_or(Error::ArithmeticOverflow)?;

    let contract = e.current_contract_address();
    let payment_client = token::Client::new(e, &config.payment_token);
    if seller_amount > 0 {
        payment_client.transfer(&contract, &escrow.seller, &seller_amount);
    }
    if fee > 0 {
        payment_client.transfer(&contract, &config.admin, &fee);
    }

    move_token(
        e,
        escrow.standard,
        &escrow.token,
        escrow.token_id,
        &contract,
        &escrow.buyer,
    );
    Ok(fee)
}

fn refund_buyer(e: &Env, config: &EscrowConfig, escrow: &EscrowAgreement) {
    let contract = e.current_contract_address();
    token::Client::new(e, &config.payment_token).transfer(&contract, &escrow.buyer, &escrow.price);
    move_token(
        e,
        escrow.standard,
        &escrow.token,
        escrow.token_id,
        &contract,
        &escrow.seller,
    );
}
