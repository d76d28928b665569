//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the sale.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type           | Description                   |
//! |-----------------|----------------|-------------------------------|
//! | `Config`        | `SaleConfig`   | Immutable sale parameters     |
//! | `State`         | `SaleState`    | Raised wei, supply, flags     |
//! | `PurchaseCount` | `u32`          | Length of the purchase log    |
//! | `Finalization`  | `Finalization` | Outcome of `finalize`         |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type           | Description               |
//! |-------------------------|----------------|---------------------------|
//! | `Purchase(index)`       | `Purchase`     | Purchase log entry        |
//! | `Contribution(address)` | `Contribution` | Totals per beneficiary    |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Contribution, Finalization, Purchase, SaleConfig, SaleState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable sale parameters (Instance).
    Config,
    /// Mutable sale accounting (Instance).
    State,
    /// Number of purchase log entries (Instance).
    PurchaseCount,
    /// Outcome of `finalize` (Instance).
    Finalization,
    /// Purchase log entry by index (Persistent).
    Purchase(u32),
    /// Totals per beneficiary (Persistent).
    Contribution(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<SaleConfig> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_state(env: &Env) -> Option<SaleState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn set_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

pub fn get_finalization(env: &Env) -> Option<Finalization> {
    env.storage().instance().get(&DataKey::Finalization)
}

pub fn set_finalization(env: &Env, finalization: &Finalization) {
    env.storage()
        .instance()
        .set(&DataKey::Finalization, finalization);
}

pub fn get_purchase_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PurchaseCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Append `purchase` to the log and return its index.
pub fn push_purchase(env: &Env, purchase: &Purchase) -> u32 {
    let index = get_purchase_count(env);
    let key = DataKey::Purchase(index);
    env.storage().persistent().set(&key, purchase);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::PurchaseCount, &(index + 1));
    index
}

pub fn get_purchase(env: &Env, index: u32) -> Option<Purchase> {
    let key = DataKey::Purchase(index);
    let purchase = env.storage().persistent().get(&key);
    if purchase.is_some() {
        bump_persistent(env, &key);
    }
    purchase
}

/// Totals for `beneficiary`; an empty record if they never bought.
pub fn get_contribution(env: &Env, beneficiary: &Address) -> Contribution {
    let key = DataKey::Contribution(beneficiary.clone());
    match env.storage().persistent().get(&key) {
        Some(contribution) => {
            bump_persistent(env, &key);
            contribution
        }
        None => Contribution::empty(),
    }
}

pub fn set_contribution(env: &Env, beneficiary: &Address, contribution: &Contribution) {
    let key = DataKey::Contribution(beneficiary.clone());
    env.storage().persistent().set(&key, contribution);
    bump_persistent(env, &key);
}
