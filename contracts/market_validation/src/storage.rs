//! # Storage
//!
//! The mechanism is a singleton per contract instance, so everything lives in
//! instance storage:
//!
//! | Key       | Type        | Description                          |
//! |-----------|-------------|--------------------------------------|
//! | `Creator` | `Address`   | Sale allowed to call `initialize`    |
//! | `Config`  | `MvmConfig` | Immutable parameters                 |
//! | `State`   | `MvmState`  | Claim/burn accounting and pause data |
//! | `Periods` | `Vec<u32>`  | Memoized cumulative distribution     |
//!
//! Instance TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining, on every config read as well as every write.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{MvmConfig, MvmState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Creator,
    Config,
    State,
    Periods,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_creator(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Creator)
}

pub fn set_creator(env: &Env, creator: &Address) {
    env.storage().instance().set(&DataKey::Creator, creator);
    bump_instance(env);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<MvmConfig> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &MvmConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_state(env: &Env) -> Option<MvmState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn set_state(env: &Env, state: &MvmState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

pub fn get_periods(env: &Env) -> Option<Vec<u32>> {
    env.storage().instance().get(&DataKey::Periods)
}

pub fn set_periods(env: &Env, periods: &Vec<u32>) {
    env.storage().instance().set(&DataKey::Periods, periods);
}
