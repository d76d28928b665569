extern crate std;

use soroban_sdk::{symbol_short, testutils::{Address as _, Events}, token, vec, Address, IntoVal, TryIntoVal};

use crate::events::{PurchaseReturned, TokensPurchased};
use crate::test::{fund_and_buy, set_time, setup, END2, RATE1, START, WEI_PER_USD};
use crate::Finalization;

#[test]
fn test_purchase_event() {
    let f = setup();
    let buyer = Address::generate(&f.env);
    set_time(&f.env, START);
    let tokens = fund_and_buy(&f, &buyer, 2_500);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("purchase"), beneficiary)
    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("purchase").into_val(&f.env),
        buyer.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensPurchased = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        TokensPurchased {
            index: 0,
            buyer: buyer.clone(),
            beneficiary: buyer.clone(),
            wei: 2_500,
            tokens,
            rate: RATE1,
        }
    );
}

#[test]
fn test_presale_event_topic() {
    let f = setup();
    let beneficiary = Address::generate(&f.env);
    token::StellarAssetClient::new(&f.env, &f.payment.address).mint(&f.owner, &1_000);
    f.client
        .add_private_presale_payment(&f.owner, &beneficiary, &1_000, &(RATE1 * 2));

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("presale").into_val(&f.env),
        beneficiary.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_rate_set_event() {
    let f = setup();
    f.client.set_exchange_rate(&f.owner, &(WEI_PER_USD + 1));

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![&f.env, symbol_short!("rate_set").into_val(&f.env)];
    assert_eq!(last_event.1, expected_topics);
    let rate: i128 = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(rate, WEI_PER_USD + 1);
}

#[test]
fn test_finalize_event() {
    let f = setup();
    let buyer = Address::generate(&f.env);
    set_time(&f.env, START);
    fund_and_buy(&f, &buyer, 1_000);

    set_time(&f.env, END2 + 1);
    let finalization = f.client.finalize();

    let last_event = f.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("finalize").into_val(&f.env),
        false.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: Finalization = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, finalization);
}

#[test]
fn test_refund_event() {
    let f = setup();
    let buyer = Address::generate(&f.env);
    set_time(&f.env, START);
    let tokens = fund_and_buy(&f, &buyer, 4_000);
    f.client.return_purchase(&f.owner, &buyer);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("refund").into_val(&f.env),
        buyer.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: PurchaseReturned = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        PurchaseReturned {
            contributor: buyer.clone(),
            wei: 4_000,
            tokens,
        }
    );
}

#[test]
fn test_owner_set_event() {
    let f = setup();
    let new_owner = Address::generate(&f.env);
    f.client.transfer_ownership(&f.owner, &new_owner);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("owner_set").into_val(&f.env),
        new_owner.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let previous: Option<Address> = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(previous, Some(f.owner.clone()));
}
