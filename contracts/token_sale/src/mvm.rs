//! Interface of the Market Validation Mechanism as seen from the sale.
//!
//! The sale only ever calls `initialize`, once, right after moving the escrow
//! into the mechanism. `MvmInit` mirrors the mechanism's own parameter struct
//! field for field, so both encode to the same contract value.

use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Seconds between sale finalization and the first vesting period.
pub const MVM_START_DELAY: u64 = 30 * 24 * 60 * 60;

/// Length of one vesting period.
pub const MVM_PERIOD_SECONDS: u64 = 30 * 24 * 60 * 60;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MvmInit {
    pub foundation: Address,
    pub token: Address,
    pub payment_token: Address,
    pub initial_wei: i128,
    pub initial_token_supply: i128,
    pub start_timestamp: u64,
    pub period_seconds: u64,
    pub total_periods: u32,
}

#[contractclient(name = "MvmClient")]
pub trait MarketValidationInterface {
    fn initialize(env: Env, creator: Address, init: MvmInit);
}
