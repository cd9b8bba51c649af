use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{
    Dispute, EscrowAgreement, EscrowConfig, StorageKey, INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&StorageKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(e: &Env) {
    e.storage()
        .instance()
        .set(&StorageKey::Initialized, &true);
}

pub fn extend_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

/// Guards a state-changing call. Any `Err` return rolls the flag back
/// together with the rest of the invocation.
pub fn acquire_lock(e: &Env) -> Result<(), Error> {
    if e.storage().instance().has(&StorageKey::Locked) {
        return Err(Error::ReentrancyDetected);
    }
    e.storage().instance().set(&StorageKey::Locked, &true);
    Ok(())
}

pub fn release_lock(e: &Env) {
    e.storage().instance().remove(&StorageKey::Locked);
}

pub fn get_config(e: &Env) -> Option<EscrowConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, EscrowConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

pub fn set_config(e: &Env, config: &EscrowConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_escrow(e: &Env, escrow_id: u64) -> Option<EscrowAgreement> {
    let key = StorageKey::Escrow(escrow_id);
    let escrow = e.storage().persistent().get::<_, EscrowAgreement>(&key);
    if escrow.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    escrow
}

pub fn set_escrow(e: &Env, escrow: &EscrowAgreement) {
    let key = StorageKey::Escrow(escrow.escrow_id);
    e.storage().persistent().set(&key, escrow);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn next_escrow_id(e: &Env) -> u64 {
    let key = StorageKey::EscrowCounter;
    let id = e.storage().instance().get::<_, u64>(&key).unwrap_or(0) + 1;
    e.storage().instance().set(&key, &id);
    id
}

pub fn get_party_escrows(e: &Env, party: &Address) -> Vec<u64> {
    let key = StorageKey::PartyEscrows(party.clone());
    e.storage()
        .persistent()
        .get::<_, Vec<u64>>(&key)
        .unwrap_or(Vec::new(e))
}

pub fn add_party_escrow(e: &Env, party: &Address, escrow_id: u64) {
    let key = StorageKey::PartyEscrows(party.clone());
    let mut ids = get_party_escrows(e, party);
    ids.push_back(escrow_id);
    e.storage().persistent().set(&key, &ids);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_dispute(e: &Env, escrow_id: u64) -> Option<Dispute> {
    let key = StorageKey::Dispute(escrow_id);
    let dispute = e.storage().persistent().get::<_, Dispute>(&key);
    if dispute.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    dispute
}

pub fn set_dispute(e: &Env, escrow_id: u64, dispute: &Dispute) {
    let key = StorageKey::Dispute(escrow_id);
    e.storage().persistent().set(&key, dispute);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
