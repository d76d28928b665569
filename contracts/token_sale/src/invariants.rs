#![allow(dead_code)]

extern crate std;

use crate::types::{Finalization, Purchase, SaleState};
use crate::{FOUNDATION_PER_MILLE, FOUNDERS_PER_MILLE, TEAM_PER_MILLE};

/// INV-1: raised wei and supply are never negative, and the supply matches
/// what the caller expects.
pub fn assert_sale_invariants(state: &SaleState, expected_supply: i128) {
    assert!(state.wei_raised >= 0, "INV-1 violated: negative wei_raised {}", state.wei_raised);
    assert_eq!(
        state.token_supply, expected_supply,
        "INV-1 violated: token_supply {} != expected {}",
        state.token_supply, expected_supply
    );
}

/// INV-2: before finalization `wei_raised` and `token_supply` are exactly the
/// sums over the purchase log.
pub fn assert_matches_purchase_log(state: &SaleState, purchases: &[Purchase]) {
    let wei: i128 = purchases.iter().map(|p| p.wei).sum();
    let tokens: i128 = purchases.iter().map(|p| p.tokens).sum();
    assert_eq!(
        state.wei_raised, wei,
        "INV-2 violated: wei_raised {} != Σ purchase.wei {}",
        state.wei_raised, wei
    );
    assert_eq!(
        state.token_supply, tokens,
        "INV-2 violated: token_supply {} != Σ purchase.tokens {}",
        state.token_supply, tokens
    );
}

/// INV-3: both counters only grow while purchases are being made.
pub fn assert_monotonic(before: &SaleState, after: &SaleState) {
    assert!(
        after.wei_raised >= before.wei_raised && after.token_supply >= before.token_supply,
        "INV-3 violated: counters decreased ({}, {}) -> ({}, {})",
        before.wei_raised,
        before.token_supply,
        after.wei_raised,
        after.token_supply
    );
}

/// INV-4: allocations follow the sequential per-mille rounding policy.
pub fn assert_allocations(purchased: i128, finalization: &Finalization) {
    let mut supply = purchased;
    let founders = supply * FOUNDERS_PER_MILLE / 1000;
    supply += founders;
    let foundation = supply * FOUNDATION_PER_MILLE / 1000;
    supply += foundation;
    let team = supply * TEAM_PER_MILLE / 1000;
    supply += team;

    assert_eq!(finalization.founders_tokens, founders, "INV-4 violated: founders allocation");
    assert_eq!(finalization.foundation_tokens, foundation, "INV-4 violated: foundation allocation");
    assert_eq!(finalization.team_tokens, team, "INV-4 violated: team allocation");
    assert_eq!(finalization.total_supply, supply, "INV-4 violated: total supply");
}

/// INV-5: every raised unit went either to the foundation or into escrow.
pub fn assert_wei_split(wei_raised: i128, finalization: &Finalization) {
    assert_eq!(
        finalization.foundation_wei + finalization.mvm_wei,
        wei_raised,
        "INV-5 violated: {} + {} != {}",
        finalization.foundation_wei,
        finalization.mvm_wei,
        wei_raised
    );
}
