//! # Types
//!
//! Shared data structures of the token sale.
//!
//! ## Config / State split
//!
//! - [`SaleConfig`]: written once by `init`; never mutated.
//! - [`SaleState`]: written on every purchase, refund, pause and at finalize.
//!
//! Per-beneficiary totals ([`Contribution`]) and the append-only purchase log
//! ([`Purchase`]) are separate persistent entries.
//!
//! ## Status as a Finite-State Machine
//!
//! ```text
//! Pending ──► Active ⇄ Paused
//!               └──► Ended ──► Funded
//!                         └──► Unfunded
//! ```
//!
//! Only `Funded` and `Unfunded` are stored (through `finalized`/`funded`);
//! the others derive from the clock and the pause flag.

use soroban_sdk::{contracttype, Address};

/// Immutable sale parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token sold; the sale contract must be its admin.
    pub token: Address,
    /// Native value unit contributions are paid in.
    pub payment_token: Address,
    pub foundation_wallet: Address,
    /// Receives the team allocation.
    pub founders_wallet: Address,
    /// Vesting module receiving the founders allocation.
    pub founders_vesting: Address,
    /// Vesting module receiving the foundation long-term reserve.
    pub foundation_vesting: Address,
    /// Mechanism instance capitalised at finalize when raised above the soft cap.
    pub mvm: Address,
    pub start_time: u64,
    /// Last timestamp priced at `rate1`.
    pub end1_time: u64,
    /// Last timestamp accepting purchases.
    pub end2_time: u64,
    /// Tokens per USD while `now <= end1_time`.
    pub rate1: i128,
    /// Tokens per USD after `end1_time`.
    pub rate2: i128,
    pub min_cap_usd: i128,
    /// Capital up to this amount goes straight to the foundation.
    pub soft_cap_usd: i128,
    /// Excess above the soft cap beyond which the mechanism runs 48 periods.
    pub mvm_24_period_cap_usd: i128,
    /// Exchange rate changes are refused from `start_time - set_wei_lock_delay`.
    pub set_wei_lock_delay: u64,
}

/// Mutable sale accounting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    pub wei_raised: i128,
    /// Native units per USD; 0 until set.
    pub wei_per_usd: i128,
    /// Tokens minted by the sale and not returned.
    pub token_supply: i128,
    pub paused: bool,
    pub finalized: bool,
    pub funded: bool,
}

impl SaleState {
    pub fn new() -> Self {
        Self {
            wei_raised: 0,
            wei_per_usd: 0,
            token_supply: 0,
            paused: false,
            finalized: false,
            funded: false,
        }
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Externally visible lifecycle stage.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    /// Before `start_time`.
    Pending,
    /// Accepting purchases.
    Active,
    /// Owner halted purchases.
    Paused,
    /// Past `end2_time`, waiting for `finalize`.
    Ended,
    /// Finalized above the minimum cap.
    Funded,
    /// Finalized below the minimum cap; contributions are refundable.
    Unfunded,
}

/// One entry of the purchase log.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Purchase {
    /// Account that paid.
    pub buyer: Address,
    /// Account credited with the tokens.
    pub beneficiary: Address,
    pub wei: i128,
    pub tokens: i128,
    pub rate: i128,
    pub timestamp: u64,
}

/// Running totals per beneficiary, the unit of refunds and token delivery.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub wei: i128,
    pub tokens: i128,
    pub refunded: bool,
    pub tokens_claimed: bool,
}

impl Contribution {
    pub fn empty() -> Self {
        Self {
            wei: 0,
            tokens: 0,
            refunded: false,
            tokens_claimed: false,
        }
    }
}

/// Outcome of `finalize`, kept for queries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finalization {
    pub funded: bool,
    pub funds_raised_usd: i128,
    /// Wei sent to the foundation wallet.
    pub foundation_wei: i128,
    /// Wei placed in escrow with the mechanism.
    pub mvm_wei: i128,
    /// 0 when no mechanism was capitalised.
    pub mvm_total_periods: u32,
    pub mvm_start: u64,
    pub founders_tokens: i128,
    pub foundation_tokens: i128,
    pub team_tokens: i128,
    /// Supply after allocations.
    pub total_supply: i128,
}
