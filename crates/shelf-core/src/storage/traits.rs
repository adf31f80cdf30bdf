//! Storage engine trait definition.
//!
//! The `MediaStore` trait is the durable side of the library. The in-memory
//! snapshot in [`crate::library`] is only a cache over it.

use super::types::{ActivityLogEntry, MediaEntry, Milestone};
use crate::error::Result;

/// Durable table of media entries and their append-only activity log.
///
/// All implementations must ensure:
/// - `initialize` is idempotent and never clears data
/// - `updated_at` is stamped by the store on every write
/// - `created_at` is set once, on first insert
/// - activity rows are only removed together with their owning entry
pub trait MediaStore: Send {
    /// Create tables if absent and bring the schema up to date.
    ///
    /// Safe to call on every process start.
    fn initialize(&mut self) -> Result<()>;

    /// Full snapshot of all entries, no implicit filtering.
    fn fetch_all(&self) -> Result<Vec<MediaEntry>>;

    /// Get an entry by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get(&self, id: &str) -> Result<Option<MediaEntry>>;

    /// Number of stored entries.
    fn count(&self) -> Result<usize>;

    /// Insert or update an entry.
    ///
    /// An existing row keeps its original `created_at`. `updated_at` is
    /// always the time of the call, whatever the caller supplied.
    ///
    /// # Returns
    ///
    /// The entry as persisted.
    ///
    /// # Errors
    ///
    /// Returns `ShelfError::Validation` if the entry breaks a field invariant.
    fn upsert(&mut self, entry: &MediaEntry) -> Result<MediaEntry>;

    /// Add `delta` to an entry's progress, clamped to `[0, total_units]`.
    ///
    /// A non-zero delta writes the clamped value, restamps `updated_at` and
    /// appends one activity row carrying the requested delta. A zero delta
    /// writes nothing.
    ///
    /// # Returns
    ///
    /// `Ok(Some(progress))` with the clamped value, `Ok(None)` if the id is
    /// unknown.
    fn increment_progress(&mut self, id: &str, delta: i64) -> Result<Option<i64>>;

    /// Delete one entry and, by cascade, its activity rows.
    ///
    /// Returns whether a row was removed.
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Delete every row of every table. Irreversible.
    fn clear_all(&mut self) -> Result<()>;

    /// Insert `entries` only if the entry table is empty.
    ///
    /// Returns the number of rows inserted.
    fn seed(&mut self, entries: &[MediaEntry]) -> Result<usize>;

    /// Activity rows for one entry, oldest first.
    fn activity_for(&self, media_id: &str) -> Result<Vec<ActivityLogEntry>>;

    /// Most recent activity rows across all entries, newest first.
    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>>;

    /// All milestones, most recently achieved first.
    fn milestones(&self) -> Result<Vec<Milestone>>;

    /// Store a milestone row.
    fn record_milestone(&mut self, milestone: &Milestone) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_boxed(_store: Box<dyn MediaStore>) {}
    }
}
