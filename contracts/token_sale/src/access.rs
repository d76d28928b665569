//! # Access: single-owner authorization
//!
//! The sale has exactly one privileged account, the owner. It may set the
//! exchange rate, record private presale payments, pause, return purchases
//! and hand ownership over.
//!
//! ## Storage layout
//!
//! - `AccessKey::Owner` → `Address`: the current owner.
//!
//! ## Event emissions
//!
//! | Event topic | Trigger |
//! |-------------|---------|
//! | `owner_set` | Owner set at init or transferred |
//!
//! Every guarded entry point passes the caller explicitly; the guard checks
//! both the signature (`require_auth`) and that the caller is the stored owner.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    Owner,
}

/// Read the owner, returning `None` before init.
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Owner)
}

/// Set the initial owner. Panics with `Error::AlreadyInitialized` if an owner
/// is already stored.
pub fn init_owner(env: &Env, owner: &Address) {
    if env.storage().instance().has(&AccessKey::Owner) {
        panic_with_error_access(env, Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::Owner, owner);
    emit_owner_set(env, owner, None);
}

/// Assert that `caller` signed the invocation and is the owner.
/// Panics with `Error::NotAuthorized` otherwise.
pub fn require_owner(env: &Env, caller: &Address) {
    caller.require_auth();
    match get_owner(env) {
        Some(ref owner) if owner == caller => {}
        Some(_) => panic_with_error_access(env, Error::NotAuthorized),
        None => panic_with_error_access(env, Error::NotInitialized),
    }
}

/// Hand ownership from `current` to `new_owner`.
///
/// - `current` must authorize and be the owner.
/// - The previous owner loses every privilege immediately.
pub fn transfer_ownership(env: &Env, current: &Address, new_owner: &Address) {
    require_owner(env, current);
    env.storage().instance().set(&AccessKey::Owner, new_owner);
    emit_owner_set(env, new_owner, Some(current.clone()));
}

/// Topic: `(owner_set, new_owner)`
/// Data:  `Option<previous_owner>`
fn emit_owner_set(env: &Env, owner: &Address, previous: Option<Address>) {
    env.events()
        .publish((symbol_short!("owner_set"), owner.clone()), previous);
}

#[inline(always)]
fn panic_with_error_access(env: &Env, err: Error) -> ! {
    soroban_sdk::panic_with_error!(env, err)
}
