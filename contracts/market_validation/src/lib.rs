//! # Market Validation Mechanism
//!
//! Post-sale escrow for the capital raised above the sale's soft cap. The
//! contract releases capital to the foundation period by period, following a
//! back-loaded [`distribution`] schedule, and lets any token holder burn tokens
//! for their share of the capital that is still held.
//!
//! | Phase          | Entry Point(s)                                         |
//! |----------------|--------------------------------------------------------|
//! | Deployment     | `__constructor` binds the funding sale                 |
//! | Bootstrap      | [`MarketValidation::initialize`]                       |
//! | Schedule       | `calculate_distribution_periods`, `get_periods`        |
//! | Foundation     | [`MarketValidation::claim`], `pause`, `unpause`        |
//! | Holders        | [`MarketValidation::send_tokens`]                      |
//! | Queries        | `get_current_period_index`, `get_buy_price`, `get_max_claimable_wei`, ... |
//!
//! ## Accounting
//!
//! With `acc` the accumulated distribution and `PF` the price factor:
//!
//! ```text
//! buy_price     = initial_buy_price × (PF − acc) / PF
//! max_claimable = initial_wei × acc / PF × surviving_supply / initial_supply − claimed
//! ```
//!
//! Burning tokens shrinks the surviving supply, which removes the burned
//! tokens' share from the foundation's future entitlement. Internal
//! accounting is always written before any outbound transfer.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec};

pub mod distribution;
pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use distribution::PRICE_FACTOR;
pub use types::{MvmConfig, MvmInit, MvmState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidConfig = 4,
    InvalidAmount = 5,
    MvmPaused = 6,
    ClaimExceedsMax = 7,
    InsufficientBalance = 8,
    MvmFinished = 9,
    InsufficientEscrow = 10,
    Overflow = 11,
    UnsupportedPeriods = 12,
}

#[contract]
pub struct MarketValidation;

#[contractimpl]
impl MarketValidation {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Record the only address allowed to call `initialize`.
    pub fn __constructor(env: Env, creator: Address) {
        storage::set_creator(&env, &creator);
    }

    /// Bind the escrow to its parameters. Called once by the sale at finalize,
    /// after it has transferred `initial_wei` to this contract.
    ///
    /// - `creator` must be the address bound at deployment and authorize.
    /// - `total_periods` must be 24 or 48.
    /// - The contract's payment balance must already cover `initial_wei`.
    ///
    /// The cumulative distribution table is built and stored here, once.
    pub fn initialize(env: Env, creator: Address, init: MvmInit) {
        creator.require_auth();
        if storage::get_creator(&env).as_ref() != Some(&creator) {
            panic_with_error!(&env, Error::NotAuthorized);
        }
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if distribution::deltas(init.total_periods).is_none() {
            panic_with_error!(&env, Error::UnsupportedPeriods);
        }
        if init.initial_wei <= 0 || init.initial_token_supply <= 0 || init.period_seconds == 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        let escrow = token::Client::new(&env, &init.payment_token)
            .balance(&env.current_contract_address());
        if escrow < init.initial_wei {
            panic_with_error!(&env, Error::InsufficientEscrow);
        }

        let initial_buy_price = mul_div(&env, init.initial_wei, PRICE_FACTOR, init.initial_token_supply);
        let config = MvmConfig {
            creator,
            owner: init.foundation.clone(),
            token: init.token,
            payment_token: init.payment_token,
            initial_wei: init.initial_wei,
            initial_token_supply: init.initial_token_supply,
            initial_buy_price,
            start_timestamp: init.start_timestamp,
            period_seconds: init.period_seconds,
            total_periods: init.total_periods,
        };
        storage::set_config(&env, &config);
        storage::set_state(&env, &MvmState::new());
        if distribution::load_or_calculate(&env, init.total_periods).is_none() {
            panic_with_error!(&env, Error::UnsupportedPeriods);
        }

        events::emit_initialized(
            &env,
            events::MvmInitialized {
                foundation: init.foundation,
                initial_wei: init.initial_wei,
                initial_token_supply: init.initial_token_supply,
                start_timestamp: init.start_timestamp,
                total_periods: init.total_periods,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Distribution schedule
    // ─────────────────────────────────────────────────────────

    /// Build the cumulative distribution table if it is not stored yet.
    ///
    /// Idempotent: `initialize` already stores the table, so later calls
    /// return it untouched.
    pub fn calculate_distribution_periods(env: Env) -> Vec<u32> {
        let config = load_config(&env);
        match distribution::load_or_calculate(&env, config.total_periods) {
            Some(periods) => periods,
            None => panic_with_error!(&env, Error::UnsupportedPeriods),
        }
    }

    /// Cumulative distribution per period, in parts per `PRICE_FACTOR`.
    pub fn get_periods(env: Env) -> Vec<u32> {
        load_config(&env);
        load_periods(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Index of the running period, clamped to `[0, total_periods]`.
    ///
    /// Time spent paused does not count.
    pub fn get_current_period_index(env: Env) -> u32 {
        let config = load_config(&env);
        let state = load_state(&env);
        current_period(&env, &config, &state)
    }

    /// Accumulated distribution percentage, in parts per `PRICE_FACTOR`.
    pub fn get_accumulated_pct(env: Env) -> i128 {
        let config = load_config(&env);
        let state = load_state(&env);
        accumulated(&env, &config, &state)
    }

    /// Wei paid per `PRICE_FACTOR` token units burned right now.
    pub fn get_buy_price(env: Env) -> i128 {
        let config = load_config(&env);
        let state = load_state(&env);
        buy_price(&env, &config, &state)
    }

    /// Largest amount the foundation could claim right now.
    pub fn get_max_claimable_wei(env: Env) -> i128 {
        let config = load_config(&env);
        let state = load_state(&env);
        max_claimable(&env, &config, &state)
    }

    pub fn is_finished(env: Env) -> bool {
        let config = load_config(&env);
        let state = load_state(&env);
        current_period(&env, &config, &state) >= config.total_periods
    }

    pub fn is_paused(env: Env) -> bool {
        load_state(&env).paused
    }

    pub fn get_config(env: Env) -> MvmConfig {
        load_config(&env)
    }

    pub fn get_state(env: Env) -> MvmState {
        load_state(&env)
    }

    pub fn token(env: Env) -> Address {
        load_config(&env).token
    }

    pub fn owner(env: Env) -> Address {
        load_config(&env).owner
    }

    /// Initial supply minus every token burned through this contract.
    pub fn token_supply(env: Env) -> i128 {
        let config = load_config(&env);
        let state = load_state(&env);
        config.initial_token_supply - state.total_burned_tokens
    }

    pub fn escrow_balance(env: Env) -> i128 {
        let config = load_config(&env);
        token::Client::new(&env, &config.payment_token).balance(&env.current_contract_address())
    }

    // ─────────────────────────────────────────────────────────
    // Foundation
    // ─────────────────────────────────────────────────────────

    /// Transfer `amount` of released capital to the foundation.
    ///
    /// - `caller` must be the foundation and authorize.
    /// - Fails while paused or when `amount` exceeds `get_max_claimable_wei`.
    pub fn claim(env: Env, caller: Address, amount: i128) {
        caller.require_auth();
        let config = load_config(&env);
        require_owner(&env, &config, &caller);
        let mut state = load_state(&env);
        require_not_paused(&env, &state);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if amount > max_claimable(&env, &config, &state) {
            panic_with_error!(&env, Error::ClaimExceedsMax);
        }

        state.total_wei_claimed = checked_add(&env, state.total_wei_claimed, amount);
        storage::set_state(&env, &state);

        token::Client::new(&env, &config.payment_token).transfer(
            &env.current_contract_address(),
            &config.owner,
            &amount,
        );

        let period = current_period(&env, &config, &state);
        events::emit_claimed(&env, config.owner, amount, period);
    }

    /// Freeze period progression and block claims and burns.
    ///
    /// No-op when already paused.
    pub fn pause(env: Env, caller: Address) {
        caller.require_auth();
        let config = load_config(&env);
        require_owner(&env, &config, &caller);
        let mut state = load_state(&env);
        if state.paused {
            return;
        }
        state.paused = true;
        state.paused_at = env.ledger().timestamp();
        storage::set_state(&env, &state);
        events::emit_paused(&env, caller);
    }

    /// Resume period progression, excluding the paused interval.
    ///
    /// No-op when not paused.
    pub fn unpause(env: Env, caller: Address) {
        caller.require_auth();
        let config = load_config(&env);
        require_owner(&env, &config, &caller);
        let mut state = load_state(&env);
        if !state.paused {
            return;
        }
        // Only time inside the vesting horizon shifts the schedule.
        let now = env.ledger().timestamp();
        let from = state.paused_at.max(config.start_timestamp);
        let paused_for = now.saturating_sub(from);

        state.paused_seconds += paused_for;
        state.paused = false;
        state.paused_at = 0;
        storage::set_state(&env, &state);
        events::emit_unpaused(&env, caller, paused_for);
    }

    // ─────────────────────────────────────────────────────────
    // Holders
    // ─────────────────────────────────────────────────────────

    /// Burn `tokens` held by `holder` and pay back their share of the escrow.
    ///
    /// Returns the wei sent to `holder`: `tokens × get_buy_price / PRICE_FACTOR`.
    /// Rejected once the horizon is finished.
    pub fn send_tokens(env: Env, holder: Address, tokens: i128) -> i128 {
        holder.require_auth();
        let config = load_config(&env);
        let mut state = load_state(&env);
        require_not_paused(&env, &state);

        if tokens <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if current_period(&env, &config, &state) >= config.total_periods {
            panic_with_error!(&env, Error::MvmFinished);
        }

        let token_client = token::Client::new(&env, &config.token);
        if token_client.balance(&holder) < tokens {
            panic_with_error!(&env, Error::InsufficientBalance);
        }

        let price = buy_price(&env, &config, &state);
        let wei_returned = mul_div(&env, tokens, price, PRICE_FACTOR);

        state.total_burned_tokens = checked_add(&env, state.total_burned_tokens, tokens);
        state.total_wei_returned = checked_add(&env, state.total_wei_returned, wei_returned);
        storage::set_state(&env, &state);

        token_client.burn(&holder, &tokens);
        if wei_returned > 0 {
            token::Client::new(&env, &config.payment_token).transfer(
                &env.current_contract_address(),
                &holder,
                &wei_returned,
            );
        }

        events::emit_burned(&env, holder, tokens, wei_returned, price);
        wei_returned
    }
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

fn load_config(env: &Env) -> MvmConfig {
    match storage::get_config(env) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn load_state(env: &Env) -> MvmState {
    match storage::get_state(env) {
        Some(state) => state,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn load_periods(env: &Env) -> Vec<u32> {
    match storage::get_periods(env) {
        Some(periods) => periods,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn require_owner(env: &Env, config: &MvmConfig, caller: &Address) {
    if *caller != config.owner {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

fn require_not_paused(env: &Env, state: &MvmState) {
    if state.paused {
        panic_with_error!(env, Error::MvmPaused);
    }
}

fn current_period(env: &Env, config: &MvmConfig, state: &MvmState) -> u32 {
    // A paused clock stands still at the moment of pausing.
    let now = if state.paused {
        state.paused_at
    } else {
        env.ledger().timestamp()
    };
    if now < config.start_timestamp {
        return 0;
    }
    let elapsed = (now - config.start_timestamp).saturating_sub(state.paused_seconds);
    let index = elapsed / config.period_seconds;
    index.min(u64::from(config.total_periods)) as u32
}

fn accumulated(env: &Env, config: &MvmConfig, state: &MvmState) -> i128 {
    let period = current_period(env, config, state);
    if period >= config.total_periods {
        return PRICE_FACTOR;
    }
    let periods = load_periods(env);
    distribution::accumulated_at(&periods, period, config.total_periods)
}

fn buy_price(env: &Env, config: &MvmConfig, state: &MvmState) -> i128 {
    let remaining = PRICE_FACTOR - accumulated(env, config, state);
    mul_div(env, config.initial_buy_price, remaining, PRICE_FACTOR)
}

fn max_claimable(env: &Env, config: &MvmConfig, state: &MvmState) -> i128 {
    if current_period(env, config, state) >= config.total_periods {
        let left = config.initial_wei - state.total_wei_claimed - state.total_wei_returned;
        return left.max(0);
    }
    let released = mul_div(env, config.initial_wei, accumulated(env, config, state), PRICE_FACTOR);
    let surviving = config.initial_token_supply - state.total_burned_tokens;
    let entitled = mul_div(env, released, surviving, config.initial_token_supply);
    (entitled - state.total_wei_claimed).max(0)
}

/// `a × b / c` floored, aborting with `Error::Overflow` instead of wrapping.
fn mul_div(env: &Env, a: i128, b: i128, c: i128) -> i128 {
    match a.checked_mul(b).and_then(|p| p.checked_div(c)) {
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
