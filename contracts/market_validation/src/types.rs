//! # Types
//!
//! Shared data structures of the Market Validation Mechanism.
//!
//! ## Config / State split
//!
//! As with any long-lived escrow, the mechanism is stored as two entries:
//!
//! - [`MvmConfig`]: written once by `initialize`; never mutated.
//! - [`MvmState`]: written by `claim`, `send_tokens`, `pause` and `unpause`.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialised ──► Vesting(period 0..N) ⇄ Paused
//!                        └──► Finished (period ≥ N)
//! ```
//!
//! `Finished` is not stored; it is derived from the clock. Once finished,
//! burns are rejected and the foundation may drain whatever is left.

use soroban_sdk::{contracttype, Address};

/// Parameters handed over by the sale when it capitalises the mechanism.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MvmInit {
    /// Receiver of claims and the only address allowed to pause.
    pub foundation: Address,
    /// Sale token; burned by `send_tokens`.
    pub token: Address,
    /// Native value unit held in escrow.
    pub payment_token: Address,
    /// Escrow transferred in before `initialize`.
    pub initial_wei: i128,
    /// Token supply at sale finalization, allocations included.
    pub initial_token_supply: i128,
    pub start_timestamp: u64,
    pub period_seconds: u64,
    /// Either 24 or 48.
    pub total_periods: u32,
}

/// Immutable configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MvmConfig {
    /// Contract that created and funded this instance.
    pub creator: Address,
    pub owner: Address,
    pub token: Address,
    pub payment_token: Address,
    pub initial_wei: i128,
    pub initial_token_supply: i128,
    /// `initial_wei × PRICE_FACTOR / initial_token_supply`, floored.
    pub initial_buy_price: i128,
    pub start_timestamp: u64,
    pub period_seconds: u64,
    pub total_periods: u32,
}

/// Mutable accounting, updated on every claim, burn and pause toggle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MvmState {
    pub paused: bool,
    /// Ledger timestamp of the pause currently in effect (0 when running).
    pub paused_at: u64,
    /// Seconds of the vesting horizon spent paused, excluded from elapsed time.
    pub paused_seconds: u64,
    pub total_burned_tokens: i128,
    pub total_wei_claimed: i128,
    /// Wei paid out to holders in exchange for burned tokens.
    pub total_wei_returned: i128,
}

impl MvmState {
    pub fn new() -> Self {
        Self {
            paused: false,
            paused_at: 0,
            paused_seconds: 0,
            total_burned_tokens: 0,
            total_wei_claimed: 0,
            total_wei_returned: 0,
        }
    }
}

impl Default for MvmState {
    fn default() -> Self {
        Self::new()
    }
}
