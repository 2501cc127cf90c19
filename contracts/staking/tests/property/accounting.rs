#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the accounting math.
//!
//! Invariants tested:
//! - The settlement split conserves principal exactly: `fee + payout == amount`
//! - The fee is zero at and after lock maturity, truncating `amount × pct / 100` before
//! - Accrual credits exactly `⌊elapsed / epoch⌋` whole epochs, however the
//!   elapsed time is cut into settlement calls (no double accrual, no drift)
//! - Classification returns the highest tier whose threshold the amount meets

use proptest::prelude::*;
use soroban_sdk::{vec, Env, String, Vec};
use tiered_staking::{accrual, settlement, tiers, Tier};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a small, strictly-increasing tier table from generated deltas.
fn table_from_deltas(env: &Env, deltas: &[i128]) -> Vec<Tier> {
    let mut out = vec![env];
    let mut threshold: i128 = 0;
    for (i, delta) in deltas.iter().enumerate() {
        threshold += *delta;
        out.push_back(Tier {
            threshold,
            epoch_score: (i as u64) + 1,
            label: String::from_str(env, "tier"),
        });
    }
    out
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// For any amount, elapsed time, lock, and fee percent, the split
    /// conserves the principal and the fee side is exact.
    #[test]
    fn prop_split_conserves_principal(
        amount in 0i128..=1_000_000_000_000_000i128,
        elapsed in 0u64..=10_000_000u64,
        lock in 0u64..=10_000_000u64,
        fee_percent in 0u32..=100u32,
    ) {
        let s = settlement::split(amount, elapsed, lock, fee_percent);

        prop_assert_eq!(s.fee + s.payout, amount);
        prop_assert!(s.fee >= 0);
        prop_assert!(s.payout >= 0);

        if elapsed >= lock {
            prop_assert_eq!(s.fee, 0);
        } else {
            prop_assert_eq!(s.fee, amount * fee_percent as i128 / 100);
        }
    }

    /// Cutting an observation window into two settlements never changes the
    /// number of whole epochs credited, and the checkpoint always lands on
    /// an exact epoch multiple at or before the clock.
    #[test]
    fn prop_accrual_split_invariant(
        epoch in 1u64..=1_000_000u64,
        start in 0u64..=1_000_000u64,
        mid_offset in 0u64..=50_000_000u64,
        end_offset in 0u64..=50_000_000u64,
    ) {
        let mid = start + mid_offset;
        let end = mid + end_offset;

        // One-shot settlement over the whole window.
        let direct = accrual::completed_epochs(end, start, epoch);

        // Settle at `mid`, advance the checkpoint, settle again at `end`.
        let first = accrual::completed_epochs(mid, start, epoch);
        let checkpoint = accrual::advance_checkpoint(start, first, epoch);
        let second = accrual::completed_epochs(end, checkpoint, epoch);

        prop_assert_eq!(first + second, direct);

        prop_assert!(checkpoint <= mid);
        prop_assert_eq!((checkpoint - start) % epoch, 0);

        // Settling twice at the same instant credits nothing the second time.
        prop_assert_eq!(accrual::completed_epochs(mid, checkpoint, epoch), 0);
    }

    /// Score scales linearly in completed periods at the tier's rate.
    #[test]
    fn prop_score_linear_in_periods(
        rate in 1u64..=1_000u64,
        periods in 0u64..=1_000u64,
    ) {
        prop_assert_eq!(accrual::accrued_score(rate, periods), rate * periods);
    }

    /// `classify` picks the highest tier whose threshold the amount meets,
    /// and fails exactly when the amount is under the lowest threshold.
    #[test]
    fn prop_classify_highest_matching_tier(
        deltas in prop::collection::vec(1i128..=1_000_000i128, 1..=6),
        amount in 0i128..=10_000_000i128,
    ) {
        let env = Env::default();
        let table = table_from_deltas(&env, &deltas);
        prop_assert!(tiers::validate(&table));

        match tiers::classify(&table, amount) {
            Some(idx) => {
                prop_assert!(amount >= table.get_unchecked(idx).threshold);
                if idx + 1 < table.len() {
                    prop_assert!(amount < table.get_unchecked(idx + 1).threshold);
                }
            }
            None => prop_assert!(amount < tiers::minimum(&table)),
        }
    }

    /// Classification is monotone: more stake never maps to a lower tier.
    #[test]
    fn prop_classify_monotone_in_amount(
        deltas in prop::collection::vec(1i128..=1_000_000i128, 1..=6),
        amount in 0i128..=10_000_000i128,
        bump in 0i128..=10_000_000i128,
    ) {
        let env = Env::default();
        let table = table_from_deltas(&env, &deltas);

        let low = tiers::classify(&table, amount);
        let high = tiers::classify(&table, amount + bump);

        match (low, high) {
            (Some(a), Some(b)) => prop_assert!(b >= a),
            (Some(_), None) => prop_assert!(false, "adding stake lost the tier"),
            _ => {}
        }
    }
}
