//! Whole-ledger reentrancy guard.
//!
//! Settlement calls out to the token contract, which could re-enter this
//! one. Every mutating entry point takes this single exclusive lock for
//! its full duration; a nested mutating call on *any* account fails with
//! `ReentrantCall` before touching state. The lock is one flag in
//! instance storage, so a failed invocation's rollback also releases it.

use soroban_sdk::{symbol_short, Env, Symbol};

const GUARD: Symbol = symbol_short!("GUARD");

/// Take the lock. Returns `false` if a mutating operation is already in
/// flight.
pub fn enter(env: &Env) -> bool {
    if env.storage().instance().has(&GUARD) {
        return false;
    }
    env.storage().instance().set(&GUARD, &true);
    true
}

/// Release the lock.
pub fn exit(env: &Env) {
    env.storage().instance().remove(&GUARD);
}
