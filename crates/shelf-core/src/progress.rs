//! Bounded progress arithmetic.
//!
//! The store and the in-memory snapshot apply the same clamp so that an
//! optimistic value always matches what the durable write will produce.

use crate::storage::MediaEntry;

/// Apply `delta` to `current` and clamp the result to `[0, total]`.
///
/// An absent `total` leaves the upper side unbounded. Overshooting either
/// bound is truncation, not an error.
pub fn clamp_progress(current: i64, delta: i64, total: Option<i64>) -> i64 {
    let upper = total.unwrap_or(i64::MAX).max(0);
    current.saturating_add(delta).clamp(0, upper)
}

/// Progress `entry` would have after `delta`, or `None` when nothing changes.
///
/// A zero delta is a no-op and yields `None` so callers skip the write.
pub fn next_progress(entry: &MediaEntry, delta: i64) -> Option<i64> {
    if delta == 0 {
        return None;
    }
    Some(clamp_progress(entry.progress(), delta, entry.total_units))
}
