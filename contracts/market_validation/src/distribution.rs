//! # Distribution Schedule
//!
//! The share of escrowed capital that becomes claimable by the foundation in
//! each period, expressed in parts per [`PRICE_FACTOR`].
//!
//! Only two horizons exist, 24 and 48 periods. Their per-period deltas are
//! fixed reference tables: the curve is back-loaded (each period unlocks more
//! than the previous one) and is not regenerated from a formula.
//!
//! The tables do not reach [`PRICE_FACTOR`] on their own. The remainder
//! ([`terminal_release`]) becomes available at the finish boundary, when the
//! accumulated percentage saturates:
//!
//! ```text
//! period:        0      1   ...   N-1        N (finished)
//! accumulated:   d0   d0+d1 ...  Σ deltas     PRICE_FACTOR
//! ```
//!
//! The cumulative table is built once, when the mechanism is initialized, and
//! memoized in instance storage, see [`load_or_calculate`]. Queries only read it.

use soroban_sdk::{Env, Vec};

use crate::{events, storage};

/// Fixed-point scale for every percentage and price ratio.
pub const PRICE_FACTOR: i128 = 100_000;

/// Per-period deltas for the 24-period horizon.
pub const DISTRIBUTION_24: [u32; 24] = [
    0, 18, 99, 234, 416, 640, 902, 1202, 1536, 1905, 2305, 2738, 3201, 3693, 4215, 4766, 5345,
    5951, 6583, 7243, 7929, 8640, 9377, 10138,
];

/// Per-period deltas for the 48-period horizon.
pub const DISTRIBUTION_48: [u32; 48] = [
    0, 3, 15, 36, 63, 97, 137, 183, 233, 289, 350, 416, 486, 561, 641, 724, 812, 904, 1000, 1101,
    1205, 1313, 1425, 1541, 1660, 1783, 1910, 2041, 2175, 2312, 2454, 2598, 2746, 2898, 3053,
    3211, 3373, 3537, 3706, 3877, 4052, 4229, 4410, 4595, 4782, 4972, 5166, 5363,
];

/// Per-period deltas for `total_periods`, or `None` for an unsupported horizon.
pub fn deltas(total_periods: u32) -> Option<&'static [u32]> {
    match total_periods {
        24 => Some(&DISTRIBUTION_24),
        48 => Some(&DISTRIBUTION_48),
        _ => None,
    }
}

/// Share released when the horizon completes, on top of the tabulated deltas.
pub fn terminal_release(total_periods: u32) -> Option<u32> {
    let table = deltas(total_periods)?;
    let tabulated: u32 = table.iter().sum();
    Some(PRICE_FACTOR as u32 - tabulated)
}

/// Pure cumulative sums of the deltas (`periods[i] = Σ deltas[0..=i]`).
pub fn cumulative(env: &Env, total_periods: u32) -> Option<Vec<u32>> {
    let table = deltas(total_periods)?;
    let mut periods = Vec::new(env);
    let mut accumulated = 0u32;
    for delta in table.iter() {
        accumulated += delta;
        periods.push_back(accumulated);
    }
    Some(periods)
}

/// Return the memoized cumulative table, building and storing it on first use.
///
/// Once stored the table is never rewritten, so repeated calls are idempotent.
/// Returns `None` when `total_periods` has no reference table.
pub fn load_or_calculate(env: &Env, total_periods: u32) -> Option<Vec<u32>> {
    if let Some(periods) = storage::get_periods(env) {
        return Some(periods);
    }
    let periods = cumulative(env, total_periods)?;
    storage::set_periods(env, &periods);
    events::emit_distribution_calculated(env, total_periods);
    Some(periods)
}

/// Accumulated distribution at `period`, saturating at [`PRICE_FACTOR`] once
/// `period >= total_periods`.
pub fn accumulated_at(periods: &Vec<u32>, period: u32, total_periods: u32) -> i128 {
    if period >= total_periods {
        return PRICE_FACTOR;
    }
    periods.get(period).map(i128::from).unwrap_or(PRICE_FACTOR)
}
