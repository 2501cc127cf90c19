//! Per-account persistent storage: the stake record and the receipt
//! score, each under a `(prefix, account)` tuple key.
//!
//! The two live independent lifecycles: clearing a stake leaves the
//! account's receipt score untouched, and the score is only ever zeroed
//! by an explicit administrator reset.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const STAKE: Symbol = symbol_short!("STK");
const SCORE: Symbol = symbol_short!("SCORE");

/// One account's open stake. `amount == 0` means no active stake, in
/// which case the remaining fields are meaningless.
///
/// `start_time` and `initial_tier` are set once when the stake is opened
/// and never changed by top-ups. `last_update_time` is the score-accrual
/// checkpoint and only advances in whole-epoch increments.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    pub amount: i128,
    pub start_time: u64,
    pub initial_tier: u32,
    pub last_update_time: u64,
}

impl StakeRecord {
    pub fn empty() -> Self {
        StakeRecord {
            amount: 0,
            start_time: 0,
            initial_tier: 0,
            last_update_time: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0
    }
}

/// Read an account's stake; the empty record when none is open.
pub fn get_stake(env: &Env, account: &Address) -> StakeRecord {
    env.storage()
        .persistent()
        .get(&(STAKE, account.clone()))
        .unwrap_or_else(StakeRecord::empty)
}

pub fn put_stake(env: &Env, account: &Address, record: &StakeRecord) {
    env.storage().persistent().set(&(STAKE, account.clone()), record);
}

/// Close an account's stake. Removing the key is observably the same as
/// zeroing every field: reads fall back to the empty record.
pub fn clear_stake(env: &Env, account: &Address) {
    env.storage().persistent().remove(&(STAKE, account.clone()));
}

pub fn get_score(env: &Env, account: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(SCORE, account.clone()))
        .unwrap_or(0u64)
}

pub fn set_score(env: &Env, account: &Address, score: u64) {
    env.storage().persistent().set(&(SCORE, account.clone()), &score);
}
