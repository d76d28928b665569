//! # Token Sale Contract
//!
//! A time-boxed, two-tier token sale whose proceeds above a soft cap are
//! escrowed in a Market Validation Mechanism (MVM) instead of going to the
//! foundation at once.
//!
//! | Phase        | Entry Point(s)                                           |
//! |--------------|----------------------------------------------------------|
//! | Bootstrap    | [`TokenSale::init`], `set_exchange_rate`                 |
//! | Presale      | [`TokenSale::add_private_presale_payment`]               |
//! | Sale         | [`TokenSale::buy`], `pause`, `unpause`                   |
//! | Closing      | [`TokenSale::finalize`]                                  |
//! | Settlement   | `claim_tokens`, `return_purchase`, `claim_eth`           |
//! | Queries      | `status`, `current_rate`, `get_contribution`, ...        |
//!
//! ## Token custody
//!
//! Purchased tokens are minted to this contract and held until a funded
//! finalize, after which each beneficiary collects them with `claim_tokens`.
//! A returned purchase burns the held tokens, so `token_supply` always equals
//! what the ledger holds for the sale's issuance.
//!
//! ## Finalization
//!
//! ```text
//! raised_usd < min_cap           → Unfunded, every contribution refundable
//! raised_usd ≤ soft_cap          → Funded, all wei to the foundation
//! raised_usd > soft_cap          → Funded, soft cap to the foundation,
//!                                  the excess capitalises the MVM
//! ```
//!
//! Authorization lives in [`access`]; storage access in [`storage`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, token, Address, Env};

mod access;
pub mod events;
pub mod mvm;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use mvm::{MvmClient, MvmInit, MVM_PERIOD_SECONDS, MVM_START_DELAY};
pub use types::{Contribution, Finalization, Purchase, SaleConfig, SaleState, SaleStatus};

/// Founders allocation, per mille of the supply at the time it is minted.
pub const FOUNDERS_PER_MILLE: i128 = 128;
/// Foundation long-term reserve, per mille.
pub const FOUNDATION_PER_MILLE: i128 = 50;
/// Team allocation, per mille.
pub const TEAM_PER_MILLE: i128 = 72;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidConfig = 4,
    InvalidAmount = 5,
    InvalidRate = 6,
    RateLocked = 7,
    RateNotSet = 8,
    SaleNotActive = 9,
    SalePaused = 10,
    AlreadyFinalized = 11,
    SaleNotEnded = 12,
    NotFinalized = 13,
    RefundNotAllowed = 14,
    NothingToRefund = 15,
    NothingToClaim = 16,
    PresaleClosed = 17,
    Overflow = 18,
    NotFunded = 19,
}

#[contract]
pub struct TokenSale;

#[contractimpl]
impl TokenSale {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Store the immutable sale parameters and set the owner.
    ///
    /// Must be called exactly once. Rejects inconsistent schedules, rates and
    /// caps with `Error::InvalidConfig`.
    pub fn init(env: Env, owner: Address, config: SaleConfig) {
        owner.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        validate_config(&env, &config);

        access::init_owner(&env, &owner);
        storage::set_config(&env, &config);
        storage::set_state(&env, &SaleState::new());

        events::emit_initialized(
            &env,
            events::SaleInitialized {
                owner,
                token: config.token,
                start_time: config.start_time,
                end2_time: config.end2_time,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Owner administration
    // ─────────────────────────────────────────────────────────

    /// Set the native-units-per-USD exchange rate.
    ///
    /// Refused from `start_time - set_wei_lock_delay` onwards.
    pub fn set_exchange_rate(env: Env, caller: Address, wei_per_usd: i128) {
        access::require_owner(&env, &caller);
        let config = load_config(&env);
        let mut state = load_state(&env);

        if wei_per_usd <= 0 {
            panic_with_error!(&env, Error::InvalidRate);
        }
        let lock_from = config.start_time.saturating_sub(config.set_wei_lock_delay);
        if env.ledger().timestamp() >= lock_from {
            panic_with_error!(&env, Error::RateLocked);
        }

        state.wei_per_usd = wei_per_usd;
        storage::set_state(&env, &state);
        events::emit_rate_set(&env, wei_per_usd);
    }

    /// Halt purchases. No-op when already paused.
    pub fn pause(env: Env, caller: Address) {
        access::require_owner(&env, &caller);
        let mut state = load_state(&env);
        require_not_finalized(&env, &state);
        if state.paused {
            return;
        }
        state.paused = true;
        storage::set_state(&env, &state);
        events::emit_paused(&env, caller);
    }

    /// Resume purchases. No-op when not paused.
    pub fn unpause(env: Env, caller: Address) {
        access::require_owner(&env, &caller);
        let mut state = load_state(&env);
        require_not_finalized(&env, &state);
        if !state.paused {
            return;
        }
        state.paused = false;
        storage::set_state(&env, &state);
        events::emit_unpaused(&env, caller);
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) {
        access::transfer_ownership(&env, &caller, &new_owner);
    }

    // ─────────────────────────────────────────────────────────
    // Purchases
    // ─────────────────────────────────────────────────────────

    /// Pay `value` native units for tokens credited to `beneficiary`.
    ///
    /// Accepted for `start_time <= now <= end2_time` while not paused; priced
    /// at `rate1` up to and including `end1_time`, at `rate2` afterwards.
    /// Returns the number of tokens bought.
    pub fn buy(env: Env, payer: Address, beneficiary: Address, value: i128) -> i128 {
        payer.require_auth();
        let config = load_config(&env);
        let state = load_state(&env);

        require_not_finalized(&env, &state);
        if state.paused {
            panic_with_error!(&env, Error::SalePaused);
        }
        let rate = rate_at(&config, env.ledger().timestamp());
        if rate == 0 {
            panic_with_error!(&env, Error::SaleNotActive);
        }

        record_purchase(&env, &config, state, &payer, &beneficiary, value, rate, false)
    }

    /// Record a private presale payment at a negotiated `rate`.
    ///
    /// - Owner only, before `start_time`.
    /// - `rate` must exceed `rate1`.
    /// - The owner pays the `wei` in; tokens are credited to `beneficiary`.
    pub fn add_private_presale_payment(
        env: Env,
        caller: Address,
        beneficiary: Address,
        wei: i128,
        rate: i128,
    ) -> i128 {
        access::require_owner(&env, &caller);
        let config = load_config(&env);
        let state = load_state(&env);

        require_not_finalized(&env, &state);
        if env.ledger().timestamp() >= config.start_time {
            panic_with_error!(&env, Error::PresaleClosed);
        }
        if rate <= config.rate1 {
            panic_with_error!(&env, Error::InvalidRate);
        }

        record_purchase(&env, &config, state, &caller, &beneficiary, wei, rate, true)
    }

    // ─────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────

    /// Close the sale. Callable by anyone once `now > end2_time`.
    ///
    /// Below the minimum cap the sale ends `Unfunded` and nothing is minted or
    /// moved. Otherwise the reserve allocations are minted, each rounded down
    /// against the supply including the allocations minted before it, and
    /// the raised wei is split between the foundation and the MVM.
    pub fn finalize(env: Env) -> Finalization {
        let config = load_config(&env);
        let mut state = load_state(&env);

        require_not_finalized(&env, &state);
        if env.ledger().timestamp() <= config.end2_time {
            panic_with_error!(&env, Error::SaleNotEnded);
        }
        if state.paused {
            panic_with_error!(&env, Error::SalePaused);
        }
        if state.wei_per_usd == 0 {
            panic_with_error!(&env, Error::RateNotSet);
        }

        let funds_raised_usd = state.wei_raised / state.wei_per_usd;
        state.finalized = true;

        if funds_raised_usd < config.min_cap_usd {
            storage::set_state(&env, &state);
            let finalization = Finalization {
                funded: false,
                funds_raised_usd,
                foundation_wei: 0,
                mvm_wei: 0,
                mvm_total_periods: 0,
                mvm_start: 0,
                founders_tokens: 0,
                foundation_tokens: 0,
                team_tokens: 0,
                total_supply: state.token_supply,
            };
            storage::set_finalization(&env, &finalization);
            events::emit_finalized(&env, finalization.clone());
            return finalization;
        }

        // Order matters: each share is taken from the supply grown by the previous ones.
        let mut supply = state.token_supply;
        let founders_tokens = per_mille(&env, supply, FOUNDERS_PER_MILLE);
        supply = checked_add(&env, supply, founders_tokens);
        let foundation_tokens = per_mille(&env, supply, FOUNDATION_PER_MILLE);
        supply = checked_add(&env, supply, foundation_tokens);
        let team_tokens = per_mille(&env, supply, TEAM_PER_MILLE);
        supply = checked_add(&env, supply, team_tokens);

        let (foundation_wei, mvm_wei, mvm_total_periods) = if funds_raised_usd <= config.soft_cap_usd {
            (state.wei_raised, 0, 0)
        } else {
            let foundation_wei = checked_mul(&env, config.soft_cap_usd, state.wei_per_usd);
            let mvm_wei = state.wei_raised - foundation_wei;
            let threshold_wei = checked_mul(&env, config.mvm_24_period_cap_usd, state.wei_per_usd);
            let total_periods = if mvm_wei > threshold_wei { 48 } else { 24 };
            (foundation_wei, mvm_wei, total_periods)
        };
        let mvm_start = if mvm_wei > 0 {
            env.ledger().timestamp() + MVM_START_DELAY
        } else {
            0
        };

        state.funded = true;
        state.token_supply = supply;
        storage::set_state(&env, &state);

        let finalization = Finalization {
            funded: true,
            funds_raised_usd,
            foundation_wei,
            mvm_wei,
            mvm_total_periods,
            mvm_start,
            founders_tokens,
            foundation_tokens,
            team_tokens,
            total_supply: supply,
        };
        storage::set_finalization(&env, &finalization);

        let minter = token::StellarAssetClient::new(&env, &config.token);
        for (to, amount) in [
            (&config.founders_vesting, founders_tokens),
            (&config.foundation_vesting, foundation_tokens),
            (&config.founders_wallet, team_tokens),
        ] {
            if amount > 0 {
                minter.mint(to, &amount);
            }
        }

        let payment = token::Client::new(&env, &config.payment_token);
        let this = env.current_contract_address();
        if foundation_wei > 0 {
            payment.transfer(&this, &config.foundation_wallet, &foundation_wei);
        }
        if mvm_wei > 0 {
            payment.transfer(&this, &config.mvm, &mvm_wei);
            MvmClient::new(&env, &config.mvm).initialize(
                &this,
                &MvmInit {
                    foundation: config.foundation_wallet.clone(),
                    token: config.token.clone(),
                    payment_token: config.payment_token.clone(),
                    initial_wei: mvm_wei,
                    initial_token_supply: supply,
                    start_timestamp: mvm_start,
                    period_seconds: MVM_PERIOD_SECONDS,
                    total_periods: mvm_total_periods,
                },
            );
        }

        events::emit_finalized(&env, finalization.clone());
        finalization
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Owner-initiated refund of everything credited to `contributor`.
    ///
    /// Valid before finalization and after an unfunded one. Burns the held
    /// tokens and reduces `wei_raised` and `token_supply` accordingly. The wei
    /// goes to `contributor` even when another payer funded the purchase.
    pub fn return_purchase(env: Env, caller: Address, contributor: Address) -> i128 {
        access::require_owner(&env, &caller);
        let state = load_state(&env);
        if state.finalized && state.funded {
            panic_with_error!(&env, Error::RefundNotAllowed);
        }
        refund(&env, state, &contributor)
    }

    /// Contributor-initiated refund after an unfunded finalization.
    pub fn claim_eth(env: Env, contributor: Address) -> i128 {
        contributor.require_auth();
        let state = load_state(&env);
        if !state.finalized {
            panic_with_error!(&env, Error::NotFinalized);
        }
        if state.funded {
            panic_with_error!(&env, Error::RefundNotAllowed);
        }
        refund(&env, state, &contributor)
    }

    /// Deliver the tokens held for `beneficiary` after a funded finalization.
    pub fn claim_tokens(env: Env, beneficiary: Address) -> i128 {
        beneficiary.require_auth();
        let config = load_config(&env);
        let state = load_state(&env);
        if !state.finalized {
            panic_with_error!(&env, Error::NotFinalized);
        }
        if !state.funded {
            panic_with_error!(&env, Error::NotFunded);
        }

        let mut contribution = storage::get_contribution(&env, &beneficiary);
        if contribution.tokens_claimed || contribution.tokens <= 0 {
            panic_with_error!(&env, Error::NothingToClaim);
        }
        let tokens = contribution.tokens;
        contribution.tokens_claimed = true;
        storage::set_contribution(&env, &beneficiary, &contribution);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &beneficiary,
            &tokens,
        );
        events::emit_tokens_claimed(&env, beneficiary, tokens);
        tokens
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> SaleConfig {
        load_config(&env)
    }

    pub fn get_state(env: Env) -> SaleState {
        load_state(&env)
    }

    pub fn status(env: Env) -> SaleStatus {
        let config = load_config(&env);
        let state = load_state(&env);
        let now = env.ledger().timestamp();
        match (state.finalized, state.funded) {
            (true, true) => SaleStatus::Funded,
            (true, false) => SaleStatus::Unfunded,
            _ if state.paused => SaleStatus::Paused,
            _ if now < config.start_time => SaleStatus::Pending,
            _ if now <= config.end2_time => SaleStatus::Active,
            _ => SaleStatus::Ended,
        }
    }

    /// Tokens per USD a purchase would get right now; 0 outside the sale window.
    pub fn current_rate(env: Env) -> i128 {
        let config = load_config(&env);
        rate_at(&config, env.ledger().timestamp())
    }

    pub fn funds_raised_usd(env: Env) -> i128 {
        let state = load_state(&env);
        if state.wei_per_usd == 0 {
            return 0;
        }
        state.wei_raised / state.wei_per_usd
    }

    /// Whether the amount raised so far reaches the minimum cap.
    pub fn funded(env: Env) -> bool {
        let config = load_config(&env);
        let state = load_state(&env);
        state.wei_per_usd > 0 && state.wei_raised / state.wei_per_usd >= config.min_cap_usd
    }

    pub fn token(env: Env) -> Address {
        load_config(&env).token
    }

    pub fn token_supply(env: Env) -> i128 {
        load_state(&env).token_supply
    }

    pub fn owner(env: Env) -> Address {
        match access::get_owner(&env) {
            Some(owner) => owner,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }

    pub fn get_contribution(env: Env, beneficiary: Address) -> Contribution {
        storage::get_contribution(&env, &beneficiary)
    }

    pub fn purchase_count(env: Env) -> u32 {
        storage::get_purchase_count(&env)
    }

    pub fn get_purchase(env: Env, index: u32) -> Option<Purchase> {
        storage::get_purchase(&env, index)
    }

    pub fn get_finalization(env: Env) -> Option<Finalization> {
        storage::get_finalization(&env)
    }

    /// The mechanism instance, once a funded finalize capitalised it.
    pub fn mvm(env: Env) -> Option<Address> {
        let config = load_config(&env);
        match storage::get_finalization(&env) {
            Some(f) if f.mvm_wei > 0 => Some(config.mvm),
            _ => None,
        }
    }

    /// Vesting module holding the founders allocation, once minted.
    pub fn founders_vested_payment(env: Env) -> Option<Address> {
        let config = load_config(&env);
        match storage::get_finalization(&env) {
            Some(f) if f.funded => Some(config.founders_vesting),
            _ => None,
        }
    }

    /// Vesting module holding the foundation reserve, once minted.
    pub fn foundation_vested_payment(env: Env) -> Option<Address> {
        let config = load_config(&env);
        match storage::get_finalization(&env) {
            Some(f) if f.funded => Some(config.foundation_vesting),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

fn validate_config(env: &Env, config: &SaleConfig) {
    let schedule_ok = config.start_time < config.end1_time && config.end1_time < config.end2_time;
    let rates_ok = config.rate2 > 0 && config.rate1 > config.rate2;
    let caps_ok = config.min_cap_usd > 0
        && config.soft_cap_usd >= config.min_cap_usd
        && config.mvm_24_period_cap_usd >= 0;
    if !(schedule_ok && rates_ok && caps_ok) {
        panic_with_error!(env, Error::InvalidConfig);
    }
}

fn load_config(env: &Env) -> SaleConfig {
    match storage::get_config(env) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn load_state(env: &Env) -> SaleState {
    match storage::get_state(env) {
        Some(state) => state,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn require_not_finalized(env: &Env, state: &SaleState) {
    if state.finalized {
        panic_with_error!(env, Error::AlreadyFinalized);
    }
}

/// Public rate at `now`; 0 outside `[start_time, end2_time]`.
fn rate_at(config: &SaleConfig, now: u64) -> i128 {
    if now < config.start_time || now > config.end2_time {
        0
    } else if now <= config.end1_time {
        config.rate1
    } else {
        config.rate2
    }
}

/// Take `wei` from `payer`, mint the tokens into custody and log the purchase.
#[allow(clippy::too_many_arguments)]
fn record_purchase(
    env: &Env,
    config: &SaleConfig,
    mut state: SaleState,
    payer: &Address,
    beneficiary: &Address,
    wei: i128,
    rate: i128,
    presale: bool,
) -> i128 {
    if state.wei_per_usd == 0 {
        panic_with_error!(env, Error::RateNotSet);
    }
    if wei <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let tokens = checked_mul(env, wei, rate) / state.wei_per_usd;
    if tokens == 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    state.wei_raised = checked_add(env, state.wei_raised, wei);
    state.token_supply = checked_add(env, state.token_supply, tokens);
    storage::set_state(env, &state);

    let mut contribution = storage::get_contribution(env, beneficiary);
    contribution.wei += wei;
    contribution.tokens += tokens;
    contribution.refunded = false;
    storage::set_contribution(env, beneficiary, &contribution);

    let index = storage::push_purchase(
        env,
        &types::Purchase {
            buyer: payer.clone(),
            beneficiary: beneficiary.clone(),
            wei,
            tokens,
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );

    let this = env.current_contract_address();
    token::Client::new(env, &config.payment_token).transfer(payer, &this, &wei);
    token::StellarAssetClient::new(env, &config.token).mint(&this, &tokens);

    events::emit_purchased(
        env,
        presale,
        events::TokensPurchased {
            index,
            buyer: payer.clone(),
            beneficiary: beneficiary.clone(),
            wei,
            tokens,
            rate,
        },
    );
    tokens
}

/// Pay back everything credited to `contributor` and burn the tokens held
/// for them. Contributions are kept per beneficiary, so the beneficiary is
/// the one refunded, not the recorded `Purchase::buyer`.
fn refund(env: &Env, mut state: SaleState, contributor: &Address) -> i128 {
    let config = load_config(env);
    let mut contribution = storage::get_contribution(env, contributor);
    if contribution.wei <= 0 {
        panic_with_error!(env, Error::NothingToRefund);
    }
    let wei = contribution.wei;
    let tokens = contribution.tokens;

    contribution.wei = 0;
    contribution.tokens = 0;
    contribution.refunded = true;
    storage::set_contribution(env, contributor, &contribution);

    state.wei_raised -= wei;
    state.token_supply -= tokens;
    storage::set_state(env, &state);

    let this = env.current_contract_address();
    if tokens > 0 {
        token::Client::new(env, &config.token).burn(&this, &tokens);
    }
    token::Client::new(env, &config.payment_token).transfer(&this, contributor, &wei);

    events::emit_refunded(env, contributor.clone(), wei, tokens);
    wei
}

fn per_mille(env: &Env, supply: i128, per_mille: i128) -> i128 {
    checked_mul(env, supply, per_mille) / 1000
}

fn checked_mul(env: &Env, a: i128, b: i128) -> i128 {
    match a.checked_mul(b) {
        Some(v) => v,
        None => panic_with_error!(env, Error::Overflow),
    }
}

fn checked_add(env: &Env, a: i128, b: i128) -> i128 {
    match a.checked_add(b) {
        Some(v) => v,
        None => panic_with_error!(env, Error::Overflow),
    }
}
