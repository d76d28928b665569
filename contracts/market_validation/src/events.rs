use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MvmInitialized {
    pub foundation: Address,
    pub initial_wei: i128,
    pub initial_token_supply: i128,
    pub start_timestamp: u64,
    pub total_periods: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeiClaimed {
    pub foundation: Address,
    pub amount: i128,
    pub period: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensBurned {
    pub holder: Address,
    pub tokens: i128,
    pub wei_returned: i128,
    pub buy_price: i128,
}

pub fn emit_initialized(env: &Env, data: MvmInitialized) {
    env.events().publish((symbol_short!("init"),), data);
}

pub fn emit_distribution_calculated(env: &Env, total_periods: u32) {
    env.events()
        .publish((symbol_short!("dist_calc"),), total_periods);
}

pub fn emit_claimed(env: &Env, foundation: Address, amount: i128, period: u32) {
    let topics = (symbol_short!("claim"), foundation.clone());
    let data = WeiClaimed {
        foundation,
        amount,
        period,
    };
    env.events().publish(topics, data);
}

pub fn emit_burned(env: &Env, holder: Address, tokens: i128, wei_returned: i128, buy_price: i128) {
    let topics = (symbol_short!("burn"), holder.clone());
    let data = TokensBurned {
        holder,
        tokens,
        wei_returned,
        buy_price,
    };
    env.events().publish(topics, data);
}

pub fn emit_paused(env: &Env, owner: Address) {
    env.events().publish((symbol_short!("paused"),), owner);
}

pub fn emit_unpaused(env: &Env, owner: Address, paused_for: u64) {
    env.events()
        .publish((symbol_short!("unpaused"),), (owner, paused_for));
}
