//! Single-owner access control.
//!
//! Stores one privileged identity in instance storage and exposes the three
//! operations contracts need from it: set once at construction, guard, and
//! one-step transfer. The owner is never unset once written.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage key ──────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");

// ── Core functions ───────────────────────────────────────────────────────────

/// Records the initial owner. Callable exactly once, during contract
/// initialisation — callers must enforce their own initialised-guard first.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Returns the current owner, or `None` if the contract was never
/// initialised.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Guard: returns `true` iff `caller` is the stored owner.
///
/// Returns `false` both for a non-owner caller and for an uninitialised
/// contract; callers map either case to their own error code.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match owner(env) {
        Some(current) => *caller == current,
        None => false,
    }
}

/// Replaces the owner and returns the previous one.
///
/// Authorization is the caller's responsibility: contracts must verify the
/// invoker against [`is_owner`] before calling this.
pub fn transfer(env: &Env, new_owner: &Address) -> Option<Address> {
    let previous = owner(env);
    env.storage().instance().set(&OWNER, new_owner);
    previous
}

// ── Tests ────────────────────────────────────────────────────────────────────
