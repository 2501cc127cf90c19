//! Early-exit fee / payout split for a closing stake.
//!
//! The fee uses truncating integer percentage math (`amount * percent /
//! 100`); no floating point anywhere, so the split is exact and
//! reproducible.

/// How a closing stake's principal is divided between the staker and the
/// fee sink. `fee + payout` always equals the settled amount.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub fee: i128,
    pub payout: i128,
}

/// Split `amount` for a stake opened `elapsed` seconds ago. Before the
/// lock matures the fee applies; at or after maturity the full principal
/// is returned.
pub fn split(amount: i128, elapsed: u64, lock_duration: u64, fee_percent: u32) -> Settlement {
    if elapsed < lock_duration {
        let fee = amount.saturating_mul(fee_percent as i128) / 100;
        Settlement {
            fee,
            payout: amount - fee,
        }
    } else {
        Settlement {
            fee: 0,
            payout: amount,
        }
    }
}
