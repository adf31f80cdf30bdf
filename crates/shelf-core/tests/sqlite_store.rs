use std::path::PathBuf;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use shelf_core::storage::{
    MediaEntry, MediaStatus, MediaStore, MediaType, Milestone, SqliteStore,
};

struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("nested").join("media-tracker.db");
        Self { _dir: dir, path }
    }

    fn open(&self) -> SqliteStore {
        let mut store = SqliteStore::open(&self.path).expect("open should succeed");
        store.initialize().expect("initialize should succeed");
        store
    }
}

fn frieren() -> MediaEntry {
    MediaEntry::new("Frieren", MediaType::Anime, MediaStatus::Watching)
        .with_id("frieren")
        .with_total_units(12)
        .with_progress(10)
}

#[test]
fn test_initialize_is_idempotent_and_keeps_data() {
    let db = TempDb::new();
    let mut store = db.open();
    store.upsert(&frieren()).expect("upsert should succeed");
    drop(store);

    let mut store = db.open();
    store.initialize().expect("second initialize should succeed");
    assert!(db.path.exists());
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.fetch_all().unwrap()[0].title, "Frieren");
}

#[test]
fn test_increment_clamps_and_logs_requested_delta() {
    let db = TempDb::new();
    let mut store = db.open();
    store.upsert(&frieren()).unwrap();

    assert_eq!(store.increment_progress("frieren", 5).unwrap(), Some(12));
    assert_eq!(store.get("frieren").unwrap().unwrap().progress_units, Some(12));

    let logs = store.activity_for("frieren").unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!((logs[0].delta, logs[0].total_after), (5, 12));

    assert_eq!(store.increment_progress("frieren", -20).unwrap(), Some(0));
    let logs = store.activity_for("frieren").unwrap();
    assert_eq!((logs[1].delta, logs[1].total_after), (-20, 0));
}

#[test]
fn test_zero_delta_leaves_row_untouched() {
    let db = TempDb::new();
    let mut store = db.open();
    let stored = store.upsert(&frieren()).unwrap();

    assert_eq!(store.increment_progress("frieren", 0).unwrap(), Some(10));

    let reread = store.get("frieren").unwrap().unwrap();
    assert_eq!(reread.updated_at, stored.updated_at);
    assert!(store.activity_for("frieren").unwrap().is_empty());
}

#[test]
fn test_increment_unknown_id_creates_nothing() {
    let db = TempDb::new();
    let mut store = db.open();

    assert_eq!(store.increment_progress("ghost", 1).unwrap(), None);
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.recent_activity(10).unwrap().is_empty());
}

#[test]
fn test_upsert_preserves_created_at_and_restamps_updated_at() {
    let db = TempDb::new();
    let mut store = db.open();
    let stale = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let first = store.upsert(&frieren().with_updated_at(stale)).unwrap();
    assert!(first.updated_at > stale);
    assert_eq!(first.created_at, first.updated_at);

    let mut edited = first.clone();
    edited.title = "Sousou no Frieren".to_string();
    edited.created_at = stale;
    let second = store.upsert(&edited).unwrap();

    let reread = store.get("frieren").unwrap().unwrap();
    assert_eq!(reread.title, "Sousou no Frieren");
    assert_eq!(reread.created_at, first.created_at);
    assert!(reread.updated_at >= first.updated_at);
    assert_eq!(reread, second);
}

#[test]
fn test_seed_only_fills_empty_table() {
    let db = TempDb::new();
    let mut store = db.open();
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let demo = vec![
        frieren().with_updated_at(stamp),
        MediaEntry::new("Berserk", MediaType::Manga, MediaStatus::Reading)
            .with_id("berserk")
            .with_updated_at(stamp + Duration::hours(1)),
    ];

    assert_eq!(store.seed(&demo).unwrap(), 2);
    let seeded = store.get("berserk").unwrap().unwrap();
    assert_eq!(seeded.created_at, stamp + Duration::hours(1));
    assert_eq!(seeded.updated_at, seeded.created_at);

    let mut changed = frieren();
    changed.title = "Overwritten".to_string();
    assert_eq!(store.seed(&[changed]).unwrap(), 0);
    assert_eq!(store.get("frieren").unwrap().unwrap().title, "Frieren");
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_delete_cascades_to_activity() {
    let db = TempDb::new();
    let mut store = db.open();
    store.upsert(&frieren()).unwrap();
    store.increment_progress("frieren", 1).unwrap();
    store.increment_progress("frieren", 1).unwrap();

    assert!(store.delete("frieren").unwrap());
    assert!(!store.delete("frieren").unwrap());
    assert!(store.activity_for("frieren").unwrap().is_empty());
    assert!(store.recent_activity(10).unwrap().is_empty());
}

#[test]
fn test_clear_all_empties_every_table() {
    let db = TempDb::new();
    let mut store = db.open();
    store.upsert(&frieren()).unwrap();
    store.increment_progress("frieren", 1).unwrap();
    store
        .record_milestone(&Milestone::new("First steps", "Logged an episode", "star"))
        .unwrap();
    assert_eq!(store.milestones().unwrap().len(), 1);

    store.clear_all().unwrap();
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.recent_activity(10).unwrap().is_empty());
    assert!(store.milestones().unwrap().is_empty());
}

#[test]
fn test_recent_activity_newest_first_with_limit() {
    let db = TempDb::new();
    let mut store = db.open();
    store.upsert(&frieren().with_total_units(100)).unwrap();
    for _ in 0..3 {
        store.increment_progress("frieren", 1).unwrap();
    }

    let recent = store.recent_activity(2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].total_after, 13);
    assert_eq!(recent[1].total_after, 12);
}
