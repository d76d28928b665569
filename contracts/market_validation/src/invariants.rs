#![allow(dead_code)]

extern crate std;

use crate::types::{MvmConfig, MvmState};
use crate::PRICE_FACTOR;

/// INV-1: claimed capital plus capital returned for burns never exceeds the escrow.
pub fn assert_within_escrow(config: &MvmConfig, state: &MvmState) {
    assert!(
        state.total_wei_claimed + state.total_wei_returned <= config.initial_wei,
        "INV-1 violated: claimed {} + returned {} > initial {}",
        state.total_wei_claimed,
        state.total_wei_returned,
        config.initial_wei
    );
}

/// INV-2: burned tokens never exceed the supply captured at initialization.
pub fn assert_burned_within_supply(config: &MvmConfig, state: &MvmState) {
    assert!(
        state.total_burned_tokens <= config.initial_token_supply,
        "INV-2 violated: burned {} > initial supply {}",
        state.total_burned_tokens,
        config.initial_token_supply
    );
}

/// INV-3: the claim cap is never negative.
pub fn assert_claimable_non_negative(max_claimable: i128) {
    assert!(
        max_claimable >= 0,
        "INV-3 violated: negative max claimable {}",
        max_claimable
    );
}

/// INV-4: a positive claim or burn never raises the claim cap at a fixed time.
pub fn assert_claimable_non_increasing(before: i128, after: i128) {
    assert!(
        after <= before,
        "INV-4 violated: max claimable grew from {} to {}",
        before,
        after
    );
}

/// INV-5: a burn pays exactly `tokens × price / PRICE_FACTOR`, floored.
pub fn assert_burn_payout(tokens: i128, price: i128, paid: i128) {
    assert_eq!(
        paid,
        tokens * price / PRICE_FACTOR,
        "INV-5 violated: {} tokens at price {} paid {}",
        tokens,
        price,
        paid
    );
}

/// Run all stateless accounting invariants.
pub fn assert_all_mvm_invariants(config: &MvmConfig, state: &MvmState, max_claimable: i128) {
    assert_within_escrow(config, state);
    assert_burned_within_supply(config, state);
    assert_claimable_non_negative(max_claimable);
}
