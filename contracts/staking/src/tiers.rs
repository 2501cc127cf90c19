//! Tier table: ordered amount thresholds with a per-epoch score rate and a
//! display label each.
//!
//! The table is fixed at initialization. A single record type replaces the
//! three parallel threshold/score/label lists of earlier designs so the
//! aligned-index invariant holds by construction.

use soroban_sdk::{contracttype, String, Vec};

/// One classification bucket. `threshold` is the smallest staked amount
/// (in smallest token units) that places an account in this tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub threshold: i128,
    pub epoch_score: u64,
    pub label: String,
}

/// Check a candidate table: non-empty, positive strictly-increasing
/// thresholds, and a non-zero score rate on every tier.
pub fn validate(tiers: &Vec<Tier>) -> bool {
    if tiers.is_empty() {
        return false;
    }
    let mut prev: i128 = 0;
    for tier in tiers.iter() {
        if tier.threshold <= prev || tier.epoch_score == 0 {
            return false;
        }
        prev = tier.threshold;
    }
    true
}

/// The global minimum stake amount (lowest tier's threshold).
///
/// Callers must only pass a table that passed [`validate`].
pub fn minimum(tiers: &Vec<Tier>) -> i128 {
    tiers.get_unchecked(0).threshold
}

/// Index of the highest tier whose threshold does not exceed `amount`,
/// scanning from the top of the table down. `None` when the amount is
/// below the lowest threshold.
pub fn classify(tiers: &Vec<Tier>, amount: i128) -> Option<u32> {
    let mut idx = tiers.len();
    while idx > 0 {
        idx -= 1;
        if amount >= tiers.get_unchecked(idx).threshold {
            return Some(idx);
        }
    }
    None
}
