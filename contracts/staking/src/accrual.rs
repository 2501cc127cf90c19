//! Whole-epoch receipt-score accrual math.
//!
//! Score only ever accrues in completed epochs. The accrual checkpoint
//! (`last_update_time`) advances by exact epoch multiples, never to "now",
//! so the sub-epoch remainder carries over to the next settlement and no
//! partial epoch is either credited or lost.

/// Number of whole epochs completed between the checkpoint and `now`.
pub fn completed_epochs(now: u64, last_update: u64, epoch_duration: u64) -> u64 {
    if epoch_duration == 0 || now <= last_update {
        return 0;
    }
    (now - last_update) / epoch_duration
}

/// Score earned for `periods` completed epochs at the tier's rate.
pub fn accrued_score(epoch_score: u64, periods: u64) -> u64 {
    epoch_score.saturating_mul(periods)
}

/// New checkpoint after crediting `periods` epochs.
pub fn advance_checkpoint(last_update: u64, periods: u64, epoch_duration: u64) -> u64 {
    last_update.saturating_add(periods.saturating_mul(epoch_duration))
}
