extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, TryIntoVal};

use crate::events::{TokensBurned, WeiClaimed};
use crate::test::{set_time, setup, PERIOD, START};

#[test]
fn test_distribution_calculated_event() {
    let f = setup(24, 1_000_000, 1_000);
    let expected_topics = vec![&f.env, symbol_short!("dist_calc").into_val(&f.env)];

    // Emitted once by `initialize`, right before the `init` event.
    let all_events = f.env.events().all();
    let calculated: std::vec::Vec<_> = all_events
        .iter()
        .filter(|e| e.0 == f.client.address && e.1 == expected_topics)
        .collect();
    assert_eq!(calculated.len(), 1);
    let total_periods: u32 = calculated[0].2.try_into_val(&f.env).unwrap();
    assert_eq!(total_periods, 24);

    // Views and repeated calculation never emit it again.
    f.client.get_buy_price();
    f.client.calculate_distribution_periods();
    let all_events = f.env.events().all();
    if let Some(last_event) = all_events.last() {
        assert_ne!(last_event.1, expected_topics);
    }
}

#[test]
fn test_claim_event() {
    let f = setup(24, 20_000_000, 100);
    set_time(&f.env, START + 5 * PERIOD);
    f.client.claim(&f.foundation, &1_000);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("claim"), foundation)
    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("claim").into_val(&f.env),
        f.foundation.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: WeiClaimed = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        WeiClaimed {
            foundation: f.foundation.clone(),
            amount: 1_000,
            period: 5,
        }
    );
}

#[test]
fn test_burn_event() {
    let f = setup(24, 20_000_000, 100);
    set_time(&f.env, START);
    f.client.send_tokens(&f.holder, &4);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("burn"), holder)
    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("burn").into_val(&f.env),
        f.holder.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensBurned = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        TokensBurned {
            holder: f.holder.clone(),
            tokens: 4,
            wei_returned: 800_000,
            buy_price: 20_000_000_000,
        }
    );
}

#[test]
fn test_pause_events() {
    let f = setup(24, 1_000_000, 1_000);
    set_time(&f.env, START + 10);
    f.client.pause(&f.foundation);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![&f.env, symbol_short!("paused").into_val(&f.env)];
    assert_eq!(last_event.1, expected_topics);

    set_time(&f.env, START + 70);
    f.client.unpause(&f.foundation);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![&f.env, symbol_short!("unpaused").into_val(&f.env)];
    assert_eq!(last_event.1, expected_topics);
    let (owner, paused_for): (soroban_sdk::Address, u64) =
        last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(owner, f.foundation);
    assert_eq!(paused_for, 60);
}
