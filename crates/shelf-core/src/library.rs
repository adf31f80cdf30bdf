//! The library: a store plus the in-memory snapshot every view reads from.
//!
//! Mutations are two-phase. The snapshot changes first, then the durable
//! write runs. If the write fails the snapshot is thrown away and re-read
//! from the store, and the caller gets [`Commit::RolledBack`].

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::Utc;

use crate::aggregate::{self, MediaStats, MindfulStats};
use crate::error::Result;
use crate::progress::next_progress;
use crate::query::{self, SearchFilter, SortKey};
use crate::storage::codec;
use crate::storage::{ActivityLogEntry, MediaEntry, MediaStatus, MediaStore, MediaType, Milestone};

/// Snapshot change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    /// Snapshot replaced by a full read from the store
    Refreshed { count: usize },
    EntrySaved { id: String },
    ProgressChanged { id: String, progress: i64 },
    EntryDeleted { id: String },
    Cleared,
    /// A tentative change was discarded and the snapshot re-read
    RolledBack { id: Option<String>, reason: String },
}

/// Outcome of a two-phase mutation.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Commit<T> {
    /// The durable write succeeded and the snapshot reflects it.
    Committed(T),
    /// The durable write failed; the snapshot was re-synced from the store.
    RolledBack { reason: String },
}

impl<T> Commit<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Commit::Committed(_))
    }

    /// The committed value, if any.
    pub fn committed(self) -> Option<T> {
        match self {
            Commit::Committed(value) => Some(value),
            Commit::RolledBack { .. } => None,
        }
    }
}

/// Owns the durable store and the snapshot derived from it.
pub struct Library<S: MediaStore> {
    store: S,
    entries: Vec<MediaEntry>,
    subscribers: Vec<Sender<LibraryEvent>>,
}

impl<S: MediaStore> Library<S> {
    /// Wrap an already initialized store. The snapshot starts empty until
    /// [`Library::refresh`] runs.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Initialize the store and load the first snapshot.
    pub fn open(mut store: S) -> Result<Self> {
        store.initialize()?;
        let mut library = Self::new(store);
        library.refresh()?;
        Ok(library)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receive every subsequent snapshot change.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<LibraryEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: LibraryEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Replace the snapshot with a full read from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.entries = self.store.fetch_all()?;
        let count = self.entries.len();
        tracing::debug!(count, "snapshot refreshed");
        self.publish(LibraryEvent::Refreshed { count });
        Ok(())
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&MediaEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Discard tentative state and re-read from the store.
    ///
    /// A failure of the re-read itself is returned as `Err`.
    fn roll_back<T>(&mut self, id: Option<&str>, reason: String) -> Result<Commit<T>> {
        tracing::warn!(id = ?id, %reason, "durable write failed, re-syncing snapshot");
        self.entries = self.store.fetch_all()?;
        self.publish(LibraryEvent::RolledBack {
            id: id.map(str::to_string),
            reason: reason.clone(),
        });
        Ok(Commit::RolledBack { reason })
    }

    /// Move progress by `delta`, clamped to `[0, total]`.
    ///
    /// Returns `Committed(None)` for an unknown id and
    /// `Committed(Some(current))` for a zero delta; neither touches the store.
    pub fn bump(&mut self, id: &str, delta: i64) -> Result<Commit<Option<i64>>> {
        let Some(index) = self.position(id) else {
            return Ok(Commit::Committed(None));
        };
        let Some(tentative) = next_progress(&self.entries[index], delta) else {
            return Ok(Commit::Committed(Some(self.entries[index].progress())));
        };

        let entry = &mut self.entries[index];
        entry.progress_units = Some(tentative);
        entry.updated_at = codec::now();

        match self.store.increment_progress(id, delta) {
            Ok(Some(progress)) => {
                // adopt the durable row, including the store's updated_at
                match self.store.get(id)? {
                    Some(stored) => self.entries[index] = stored,
                    None => {
                        return self.roll_back(Some(id), format!("Entry {} no longer exists", id))
                    }
                }
                self.publish(LibraryEvent::ProgressChanged {
                    id: id.to_string(),
                    progress,
                });
                Ok(Commit::Committed(Some(progress)))
            }
            Ok(None) => self.roll_back(Some(id), format!("Entry {} no longer exists", id)),
            Err(err) => {
                tracing::error!(id, delta, error = %err, "progress write failed");
                self.roll_back(Some(id), err.to_string())
            }
        }
    }

    /// Insert or update an entry. New entries appear at the front of the
    /// snapshot.
    ///
    /// Invalid entries are rejected with `Err` before anything changes.
    pub fn save_entry(&mut self, entry: MediaEntry) -> Result<Commit<MediaEntry>> {
        entry.validate()?;
        let id = entry.id.clone();

        match self.position(&id) {
            Some(index) => self.entries[index] = entry.clone(),
            None => self.entries.insert(0, entry.clone()),
        }

        match self.store.upsert(&entry) {
            Ok(stored) => {
                if let Some(index) = self.position(&id) {
                    self.entries[index] = stored.clone();
                }
                self.publish(LibraryEvent::EntrySaved { id });
                Ok(Commit::Committed(stored))
            }
            Err(err) => {
                tracing::error!(id = %id, error = %err, "entry write failed");
                self.roll_back(Some(&id), err.to_string())
            }
        }
    }

    /// Apply `change` to a copy of the entry and save it.
    fn modify(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut MediaEntry),
    ) -> Result<Commit<Option<MediaEntry>>> {
        let Some(mut entry) = self.get(id).cloned() else {
            return Ok(Commit::Committed(None));
        };
        change(&mut entry);
        Ok(match self.save_entry(entry)? {
            Commit::Committed(stored) => Commit::Committed(Some(stored)),
            Commit::RolledBack { reason } => Commit::RolledBack { reason },
        })
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<Commit<Option<MediaEntry>>> {
        self.modify(id, |entry| entry.is_favorite = !entry.is_favorite)
    }

    /// Overwrite the status. Any status may follow any other.
    pub fn update_status(
        &mut self,
        id: &str,
        status: MediaStatus,
    ) -> Result<Commit<Option<MediaEntry>>> {
        self.modify(id, |entry| entry.status = status)
    }

    /// Remove an entry and its activity. `Committed(false)` when the id was
    /// unknown.
    pub fn delete_entry(&mut self, id: &str) -> Result<Commit<bool>> {
        self.entries.retain(|entry| entry.id != id);

        match self.store.delete(id) {
            Ok(removed) => {
                if removed {
                    self.publish(LibraryEvent::EntryDeleted { id: id.to_string() });
                }
                Ok(Commit::Committed(removed))
            }
            Err(err) => {
                tracing::error!(id, error = %err, "delete failed");
                self.roll_back(Some(id), err.to_string())
            }
        }
    }

    /// Delete everything. Irreversible.
    pub fn clear_all(&mut self) -> Result<Commit<()>> {
        self.entries.clear();

        match self.store.clear_all() {
            Ok(()) => {
                self.publish(LibraryEvent::Cleared);
                Ok(Commit::Committed(()))
            }
            Err(err) => {
                tracing::error!(error = %err, "clear failed");
                self.roll_back(None, err.to_string())
            }
        }
    }

    /// Insert sample entries if the library is empty. Returns how many were
    /// inserted.
    pub fn seed(&mut self, entries: &[MediaEntry]) -> Result<usize> {
        let inserted = self.store.seed(entries)?;
        if inserted > 0 {
            self.refresh()?;
        }
        Ok(inserted)
    }

    pub fn activity_for(&self, id: &str) -> Result<Vec<ActivityLogEntry>> {
        self.store.activity_for(id)
    }

    pub fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>> {
        self.store.recent_activity(limit)
    }

    pub fn milestones(&self) -> Result<Vec<Milestone>> {
        self.store.milestones()
    }

    pub fn record_milestone(&mut self, milestone: &Milestone) -> Result<()> {
        self.store.record_milestone(milestone)
    }

    pub fn stats(&self) -> MediaStats {
        aggregate::compute_stats(&self.entries)
    }

    pub fn trending_by_type(&self) -> BTreeMap<MediaType, Vec<MediaEntry>> {
        aggregate::trending_by_type(&self.entries)
    }

    pub fn continue_watching(&self) -> Vec<MediaEntry> {
        query::continue_watching(&self.entries)
    }

    pub fn recently_updated(&self) -> Vec<MediaEntry> {
        query::recently_updated(&self.entries)
    }

    pub fn search(&self, query: &str, filter: &SearchFilter) -> Vec<MediaEntry> {
        query::search(&self.entries, query, filter)
    }

    pub fn sorted(&self, key: SortKey) -> Vec<MediaEntry> {
        query::sort_entries(&self.entries, key)
    }

    /// Profile insights. The streak reads the full activity log.
    pub fn insights(&self) -> Result<MindfulStats> {
        let activity = self.store.recent_activity(usize::MAX)?;
        Ok(aggregate::compute_insights(
            &self.entries,
            &activity,
            Utc::now().date_naive(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfError;
    use crate::storage::SqliteStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Delegates to SQLite but fails every write while `failing` is set.
    /// Each write also waits `lag` first.
    struct FlakyStore {
        inner: SqliteStore,
        failing: Arc<AtomicBool>,
        lag: Duration,
    }

    impl FlakyStore {
        fn check(&self) -> Result<()> {
            std::thread::sleep(self.lag);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ShelfError::Storage("disk I/O error".to_string()));
            }
            Ok(())
        }
    }

    impl MediaStore for FlakyStore {
        fn initialize(&mut self) -> Result<()> {
            self.inner.initialize()
        }
        fn fetch_all(&self) -> Result<Vec<MediaEntry>> {
            self.inner.fetch_all()
        }
        fn get(&self, id: &str) -> Result<Option<MediaEntry>> {
            self.inner.get(id)
        }
        fn count(&self) -> Result<usize> {
            self.inner.count()
        }
        fn upsert(&mut self, entry: &MediaEntry) -> Result<MediaEntry> {
            self.check()?;
            self.inner.upsert(entry)
        }
        fn increment_progress(&mut self, id: &str, delta: i64) -> Result<Option<i64>> {
            self.check()?;
            self.inner.increment_progress(id, delta)
        }
        fn delete(&mut self, id: &str) -> Result<bool> {
            self.check()?;
            self.inner.delete(id)
        }
        fn clear_all(&mut self) -> Result<()> {
            self.check()?;
            self.inner.clear_all()
        }
        fn seed(&mut self, entries: &[MediaEntry]) -> Result<usize> {
            self.check()?;
            self.inner.seed(entries)
        }
        fn activity_for(&self, media_id: &str) -> Result<Vec<ActivityLogEntry>> {
            self.inner.activity_for(media_id)
        }
        fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>> {
            self.inner.recent_activity(limit)
        }
        fn milestones(&self) -> Result<Vec<Milestone>> {
            self.inner.milestones()
        }
        fn record_milestone(&mut self, milestone: &Milestone) -> Result<()> {
            self.check()?;
            self.inner.record_milestone(milestone)
        }
    }

    fn sample() -> Vec<MediaEntry> {
        vec![
            MediaEntry::new("Frieren", MediaType::Anime, MediaStatus::Watching)
                .with_id("frieren")
                .with_total_units(12)
                .with_progress(10),
            MediaEntry::new("Berserk", MediaType::Manga, MediaStatus::Reading)
                .with_id("berserk")
                .with_progress(100),
        ]
    }

    fn library() -> (Library<FlakyStore>, Arc<AtomicBool>) {
        library_with_lag(Duration::ZERO)
    }

    fn library_with_lag(lag: Duration) -> (Library<FlakyStore>, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let store = FlakyStore {
            inner: SqliteStore::open_in_memory().unwrap(),
            failing: failing.clone(),
            lag,
        };
        let mut library = Library::open(store).unwrap();
        assert_eq!(library.seed(&sample()).unwrap(), 2);
        (library, failing)
    }

    #[test]
    fn test_bump_commits_clamped_value() {
        let (mut library, _) = library();
        let events = library.subscribe();

        let commit = library.bump("frieren", 5).unwrap();
        assert_eq!(commit, Commit::Committed(Some(12)));
        assert_eq!(library.get("frieren").unwrap().progress_units, Some(12));
        assert_eq!(
            events.try_recv().unwrap(),
            LibraryEvent::ProgressChanged {
                id: "frieren".to_string(),
                progress: 12
            }
        );

        let logs = library.activity_for("frieren").unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].delta, 5);
        assert_eq!(logs[0].total_after, 12);
    }

    #[test]
    fn test_bump_snapshot_matches_stored_row() {
        let (mut library, _) = library_with_lag(Duration::from_millis(5));

        assert!(library.bump("frieren", 1).unwrap().is_committed());
        assert_eq!(library.entries(), library.store().fetch_all().unwrap());

        let logs = library.activity_for("frieren").unwrap();
        assert_eq!(
            library.get("frieren").unwrap().updated_at,
            logs[0].created_at
        );
    }

    #[test]
    fn test_bump_unknown_id_is_a_value() {
        let (mut library, _) = library();
        assert_eq!(library.bump("missing", 1).unwrap(), Commit::Committed(None));
        assert_eq!(library.store().count().unwrap(), 2);
    }

    #[test]
    fn test_bump_zero_delta_is_noop() {
        let (mut library, _) = library();
        let before = library.get("frieren").unwrap().clone();

        assert_eq!(library.bump("frieren", 0).unwrap(), Commit::Committed(Some(10)));
        assert_eq!(library.get("frieren").unwrap(), &before);
        assert!(library.activity_for("frieren").unwrap().is_empty());
    }

    #[test]
    fn test_bump_rolls_back_on_write_failure() {
        let (mut library, failing) = library();
        let events = library.subscribe();
        failing.store(true, Ordering::SeqCst);

        let commit = library.bump("frieren", 1).unwrap();
        assert!(matches!(commit, Commit::RolledBack { .. }));
        assert_eq!(library.get("frieren").unwrap().progress_units, Some(10));
        assert_eq!(library.entries(), library.store().fetch_all().unwrap());
        assert!(matches!(
            events.try_recv().unwrap(),
            LibraryEvent::RolledBack { id: Some(_), .. }
        ));
    }

    #[test]
    fn test_save_entry_prepends_new_entries() {
        let (mut library, _) = library();
        let entry = MediaEntry::new("Mushishi", MediaType::Anime, MediaStatus::Planned)
            .with_id("mushishi");

        let stored = library.save_entry(entry).unwrap().committed().unwrap();
        assert_eq!(library.entries()[0].id, "mushishi");
        assert_eq!(library.entries()[0], stored);
        assert_eq!(library.store().count().unwrap(), 3);
    }

    #[test]
    fn test_save_entry_rejects_invalid_without_touching_snapshot() {
        let (mut library, _) = library();
        let entry = MediaEntry::new("", MediaType::Anime, MediaStatus::Planned);

        assert!(matches!(
            library.save_entry(entry),
            Err(ShelfError::Validation(_))
        ));
        assert_eq!(library.entries().len(), 2);
    }

    #[test]
    fn test_toggle_favorite_and_status_overwrite() {
        let (mut library, _) = library();

        let toggled = library.toggle_favorite("berserk").unwrap().committed().unwrap();
        assert!(toggled.unwrap().is_favorite);

        let updated = library
            .update_status("berserk", MediaStatus::Dropped)
            .unwrap()
            .committed()
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, MediaStatus::Dropped);
        assert!(updated.is_favorite);

        let reread = library.store().get("berserk").unwrap().unwrap();
        assert_eq!(reread.status, MediaStatus::Dropped);

        assert_eq!(
            library.toggle_favorite("missing").unwrap(),
            Commit::Committed(None)
        );
    }

    #[test]
    fn test_failed_save_restores_snapshot() {
        let (mut library, failing) = library();
        failing.store(true, Ordering::SeqCst);

        let commit = library.toggle_favorite("frieren").unwrap();
        assert!(!commit.is_committed());
        assert!(!library.get("frieren").unwrap().is_favorite);
    }

    #[test]
    fn test_delete_and_clear() {
        let (mut library, failing) = library();
        let events = library.subscribe();

        assert_eq!(library.delete_entry("berserk").unwrap(), Commit::Committed(true));
        assert_eq!(library.delete_entry("berserk").unwrap(), Commit::Committed(false));
        assert_eq!(
            events.try_recv().unwrap(),
            LibraryEvent::EntryDeleted {
                id: "berserk".to_string()
            }
        );

        failing.store(true, Ordering::SeqCst);
        assert!(!library.clear_all().unwrap().is_committed());
        assert_eq!(library.entries().len(), 1);

        failing.store(false, Ordering::SeqCst);
        assert!(library.clear_all().unwrap().is_committed());
        assert!(library.entries().is_empty());
        assert_eq!(library.store().count().unwrap(), 0);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let (mut library, _) = library();
        let kept = library.subscribe();
        drop(library.subscribe());

        library.refresh().unwrap();
        assert_eq!(library.subscribers.len(), 1);
        assert_eq!(kept.try_recv().unwrap(), LibraryEvent::Refreshed { count: 2 });
    }

    #[test]
    fn test_seed_skips_non_empty_library() {
        let (mut library, _) = library();
        assert_eq!(library.seed(&sample()).unwrap(), 0);
        assert_eq!(library.entries().len(), 2);
    }

    #[test]
    fn test_derived_views_follow_snapshot() {
        let (mut library, _) = library();
        assert_eq!(library.stats().total_entries, 2);

        assert!(library.bump("berserk", 5).unwrap().is_committed());
        let insights = library.insights().unwrap();
        assert_eq!(insights.current_streak, 1);
        assert_eq!(insights.total_in_progress, 2);

        let found = library.search("frier", &SearchFilter::new());
        assert_eq!(found.len(), 1);
        assert_eq!(library.continue_watching().len(), 1);
        assert_eq!(library.recently_updated().len(), 2);
    }
}
