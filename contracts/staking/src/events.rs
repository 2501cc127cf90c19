#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub fee_sink: Address,
    pub epoch_duration: u64,
    pub lock_epochs: u64,
    pub fee_percent: u32,
    pub timestamp: u64,
}

/// Fired when an account opens or tops up its stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws its own stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub account: Address,
    pub payout: i128,
    pub receipt_score: u64,
    pub timestamp: u64,
}

/// Fired when the administrator force-closes an account's stake.
/// Deliberately distinct from [`UnstakedEvent`] so off-chain consumers can
/// tell the two apart.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForciblyUnstakedEvent {
    pub account: Address,
    pub payout: i128,
    pub receipt_score: u64,
    pub timestamp: u64,
}

/// Fired when the administrator zeroes an account's receipt score.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptScoreResetEvent {
    pub account: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    fee_sink: Address,
    epoch_duration: u64,
    lock_epochs: u64,
    fee_percent: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            fee_sink,
            epoch_duration,
            lock_epochs,
            fee_percent,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), account.clone()),
        StakedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, account: Address, payout: i128, receipt_score: u64) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), account.clone()),
        UnstakedEvent {
            account,
            payout,
            receipt_score,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_forcibly_unstaked(env: &Env, account: Address, payout: i128, receipt_score: u64) {
    env.events().publish(
        (symbol_short!("F_UNSTKD"), account.clone()),
        ForciblyUnstakedEvent {
            account,
            payout,
            receipt_score,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_receipt_score_reset(env: &Env, account: Address) {
    env.events().publish(
        (symbol_short!("SCR_RST"), account.clone()),
        ReceiptScoreResetEvent {
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}
