use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Finalization;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleInitialized {
    pub owner: Address,
    pub token: Address,
    pub start_time: u64,
    pub end2_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchased {
    pub index: u32,
    pub buyer: Address,
    pub beneficiary: Address,
    pub wei: i128,
    pub tokens: i128,
    pub rate: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseReturned {
    pub contributor: Address,
    pub wei: i128,
    pub tokens: i128,
}

pub fn emit_initialized(env: &Env, data: SaleInitialized) {
    env.events().publish((symbol_short!("init"),), data);
}

pub fn emit_rate_set(env: &Env, wei_per_usd: i128) {
    env.events()
        .publish((symbol_short!("rate_set"),), wei_per_usd);
}

/// `presale` selects the `presale` topic instead of `purchase`.
pub fn emit_purchased(env: &Env, presale: bool, data: TokensPurchased) {
    let name = if presale {
        symbol_short!("presale")
    } else {
        symbol_short!("purchase")
    };
    let topics = (name, data.beneficiary.clone());
    env.events().publish(topics, data);
}

pub fn emit_paused(env: &Env, owner: Address) {
    env.events().publish((symbol_short!("paused"),), owner);
}

pub fn emit_unpaused(env: &Env, owner: Address) {
    env.events().publish((symbol_short!("unpaused"),), owner);
}

pub fn emit_finalized(env: &Env, finalization: Finalization) {
    let topics = (symbol_short!("finalize"), finalization.funded);
    env.events().publish(topics, finalization);
}

pub fn emit_refunded(env: &Env, contributor: Address, wei: i128, tokens: i128) {
    let topics = (symbol_short!("refund"), contributor.clone());
    let data = PurchaseReturned {
        contributor,
        wei,
        tokens,
    };
    env.events().publish(topics, data);
}

pub fn emit_tokens_claimed(env: &Env, beneficiary: Address, tokens: i128) {
    env.events()
        .publish((symbol_short!("tok_claim"), beneficiary), tokens);
}
