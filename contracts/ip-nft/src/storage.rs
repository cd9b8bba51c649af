use soroban_sdk::{Address, Env, String};

use crate::types::{
    IpToken, StorageKey, INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT,
    PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INSTANCE STORAGE
// ============================================================================

pub fn has_admin(e: &Env) -> bool {
    e.storage().instance().has(&StorageKey::Admin)
}

pub fn get_admin(e: &Env) -> Option<Address> {
    e.storage().instance().get(&StorageKey::Admin)
}

pub fn set_collection(e: &Env, admin: &Address, name: &String, symbol: &String) {
    e.storage().instance().set(&StorageKey::Admin, admin);
    e.storage().instance().set(&StorageKey::Name, name);
    e.storage().instance().set(&StorageKey::Symbol, symbol);
}

pub fn get_name(e: &Env) -> Option<String> {
    e.storage().instance().get(&StorageKey::Name)
}

pub fn get_symbol(e: &Env) -> Option<String> {
    e.storage().instance().get(&StorageKey::Symbol)
}

/// Number of tokens minted so far, which is also the last assigned id.
pub fn get_token_counter(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&StorageKey::TokenCounter)
        .unwrap_or(0)
}

pub fn set_token_counter(e: &Env, counter: u32) {
    e.storage()
        .instance()
        .set(&StorageKey::TokenCounter, &counter);
}

pub fn extend_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ============================================================================
// TOKEN STORAGE
// ============================================================================

pub fn get_owner(e: &Env, token_id: u32) -> Option<Address> {
    let key = StorageKey::Owner(token_id);
    let owner = e.storage().persistent().get::<_, Address>(&key);
    if owner.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    owner
}

pub fn set_owner(e: &Env, token_id: u32, owner: &Address) {
    let key = StorageKey::Owner(token_id);
    e.storage().persistent().set(&key, owner);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_token(e: &Env, token_id: u32) -> Option<IpToken> {
    let key = StorageKey::Token(token_id);
    let token = e.storage().persistent().get::<_, IpToken>(&key);
    if token.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    token
}

pub fn set_token(e: &Env, token: &IpToken) {
    let key = StorageKey::Token(token.token_id);
    e.storage().persistent().set(&key, token);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ============================================================================
// BALANCE STORAGE
// ============================================================================

pub fn get_balance(e: &Env, owner: &Address) -> u32 {
    let key = StorageKey::Balance(owner.clone());
    let balance = e.storage().persistent().get::<_, u32>(&key).unwrap_or(0);
    if balance > 0 {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    balance
}

pub fn set_balance(e: &Env, owner: &Address, balance: u32) {
    let key = StorageKey::Balance(owner.clone());
    if balance == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &balance);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
