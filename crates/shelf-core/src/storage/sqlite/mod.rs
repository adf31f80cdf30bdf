//! SQLite storage backend.
//!
//! A single connection guarded by a mutex. Every multi-statement write runs
//! inside one transaction, so increments are atomic within the process.

mod row;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{Result, ShelfError};
use crate::progress::clamp_progress;
use crate::storage::codec::{self, encode_bool, encode_list, encode_timestamp, DecodePolicy};
use crate::storage::traits::MediaStore;
use crate::storage::types::{ActivityLogEntry, MediaEntry, Milestone};

use row::{ActivityRow, EntryRow, MilestoneRow, ACTIVITY_COLUMNS, ENTRY_COLUMNS, MILESTONE_COLUMNS};
pub use schema::SCHEMA_VERSION;

/// SQLite-backed media store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
    policy: DecodePolicy,
}

impl SqliteStore {
    /// Open (or create) a database file.
    ///
    /// The parent directory is created if missing. Call
    /// [`MediaStore::initialize`] before use.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ShelfError::Storage(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
            policy: DecodePolicy::default(),
        })
    }

    /// Choose how malformed list columns are handled on read.
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.lock_conn()?;
        schema::schema_version(&conn)
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ShelfError::Storage("SQLite connection poisoned".to_string()))
    }

    fn insert_entry(
        conn: &Connection,
        entry: &MediaEntry,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
    ) -> Result<()> {
        conn.execute(
            &format!(
                "INSERT INTO media_entries ({}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, \
                  ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
                ENTRY_COLUMNS
            ),
            params![
                entry.id,
                entry.title,
                entry.alternate_title,
                entry.media_type.as_str(),
                entry.status.as_str(),
                entry.total_units,
                entry.progress(),
                entry.unit_label.as_str(),
                entry.rating,
                entry.synopsis,
                entry.studio_or_author,
                entry.source,
                entry.cover_image,
                entry.banner_image,
                encode_list(&entry.genres)?,
                encode_list(&entry.platforms)?,
                entry.notes,
                entry.release_date,
                entry.year,
                entry.trending_rank,
                entry.seasonal_rank,
                entry.recommendation_rank,
                encode_bool(entry.is_favorite),
                encode_bool(entry.is_private),
                encode_timestamp(created_at),
                encode_timestamp(updated_at),
            ],
        )?;
        Ok(())
    }

    fn update_entry(conn: &Connection, entry: &MediaEntry, updated_at: &DateTime<Utc>) -> Result<()> {
        conn.execute(
            r#"
            UPDATE media_entries SET
                title = ?2,
                alternate_title = ?3,
                media_type = ?4,
                status = ?5,
                total_units = ?6,
                progress_units = ?7,
                unit_label = ?8,
                rating = ?9,
                synopsis = ?10,
                studio_or_author = ?11,
                source = ?12,
                cover_image = ?13,
                banner_image = ?14,
                genres = ?15,
                platforms = ?16,
                notes = ?17,
                release_date = ?18,
                year = ?19,
                trending_rank = ?20,
                seasonal_rank = ?21,
                recommendation_rank = ?22,
                is_favorite = ?23,
                is_private = ?24,
                updated_at = ?25
            WHERE id = ?1
            "#,
            params![
                entry.id,
                entry.title,
                entry.alternate_title,
                entry.media_type.as_str(),
                entry.status.as_str(),
                entry.total_units,
                entry.progress(),
                entry.unit_label.as_str(),
                entry.rating,
                entry.synopsis,
                entry.studio_or_author,
                entry.source,
                entry.cover_image,
                entry.banner_image,
                encode_list(&entry.genres)?,
                encode_list(&entry.platforms)?,
                entry.notes,
                entry.release_date,
                entry.year,
                entry.trending_rank,
                entry.seasonal_rank,
                entry.recommendation_rank,
                encode_bool(entry.is_favorite),
                encode_bool(entry.is_private),
                encode_timestamp(updated_at),
            ],
        )?;
        Ok(())
    }
}

impl MediaStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        let conn = self.lock_conn()?;
        schema::migrate(&conn)?;
        tracing::info!(path = ?self.path, "media store initialized");
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<MediaEntry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_entries ORDER BY rowid",
            ENTRY_COLUMNS
        ))?;
        let rows = stmt.query_map([], EntryRow::from_sql)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry(self.policy)?);
        }
        Ok(entries)
    }

    fn get(&self, id: &str) -> Result<Option<MediaEntry>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM media_entries WHERE id = ?", ENTRY_COLUMNS),
                [id],
                EntryRow::from_sql,
            )
            .optional()?;
        row.map(|row| row.into_entry(self.policy)).transpose()
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM media_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn upsert(&mut self, entry: &MediaEntry) -> Result<MediaEntry> {
        entry.validate()?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT created_at FROM media_entries WHERE id = ?",
                [&entry.id],
                |row| row.get(0),
            )
            .optional()?;

        let now = codec::now();
        let mut stored = entry.clone();
        stored.updated_at = now;

        match existing {
            Some(created_at) => {
                stored.created_at = codec::decode_timestamp(&created_at)?;
                Self::update_entry(&tx, &stored, &now)?;
            }
            None => {
                stored.created_at = now;
                Self::insert_entry(&tx, &stored, &now, &now)?;
            }
        }

        tx.commit()?;
        tracing::debug!(id = %stored.id, "entry upserted");
        Ok(stored)
    }

    fn increment_progress(&mut self, id: &str, delta: i64) -> Result<Option<i64>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let existing: Option<(Option<i64>, Option<i64>)> = tx
            .query_row(
                "SELECT progress_units, total_units FROM media_entries WHERE id = ?",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((current, total)) = existing else {
            return Ok(None);
        };
        let current = current.unwrap_or(0);

        if delta == 0 {
            return Ok(Some(current));
        }

        let progress = clamp_progress(current, delta, total);
        let now = encode_timestamp(&codec::now());

        tx.execute(
            "UPDATE media_entries SET progress_units = ?, updated_at = ? WHERE id = ?",
            params![progress, now, id],
        )?;
        tx.execute(
            &format!(
                "INSERT INTO activity_logs ({}) VALUES (?, ?, ?, ?, ?)",
                ACTIVITY_COLUMNS
            ),
            params![Uuid::new_v4().to_string(), id, delta, progress, now],
        )?;

        tx.commit()?;
        tracing::debug!(id, delta, progress, "progress incremented");
        Ok(Some(progress))
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM media_entries WHERE id = ?", [id])?;
        tracing::debug!(id, removed, "entry deleted");
        Ok(removed > 0)
    }

    fn clear_all(&mut self) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute_batch(
            r#"
            DELETE FROM activity_logs;
            DELETE FROM media_entries;
            DELETE FROM milestones;
            "#,
        )?;
        tx.commit()?;
        tracing::info!("all data cleared");
        Ok(())
    }

    fn seed(&mut self, entries: &[MediaEntry]) -> Result<usize> {
        for entry in entries {
            entry.validate()?;
        }

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM media_entries", [], |row| row.get(0))?;
        if count > 0 {
            tracing::debug!(existing = count, "seed skipped, library not empty");
            return Ok(0);
        }

        for entry in entries {
            Self::insert_entry(&tx, entry, &entry.updated_at, &entry.updated_at)?;
        }

        tx.commit()?;
        tracing::info!(inserted = entries.len(), "library seeded");
        Ok(entries.len())
    }

    fn activity_for(&self, media_id: &str) -> Result<Vec<ActivityLogEntry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM activity_logs WHERE media_id = ? ORDER BY created_at ASC, rowid ASC",
            ACTIVITY_COLUMNS
        ))?;
        let rows = stmt.query_map([media_id], ActivityRow::from_sql)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?.try_into()?);
        }
        Ok(logs)
    }

    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityLogEntry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM activity_logs ORDER BY created_at DESC, rowid DESC LIMIT ?",
            ACTIVITY_COLUMNS
        ))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map([limit], ActivityRow::from_sql)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?.try_into()?);
        }
        Ok(logs)
    }

    fn milestones(&self) -> Result<Vec<Milestone>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM milestones ORDER BY achieved_at DESC",
            MILESTONE_COLUMNS
        ))?;
        let rows = stmt.query_map([], MilestoneRow::from_sql)?;

        let mut milestones = Vec::new();
        for row in rows {
            milestones.push(row?.try_into()?);
        }
        Ok(milestones)
    }

    fn record_milestone(&mut self, milestone: &Milestone) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            &format!(
                "INSERT INTO milestones ({}) VALUES (?, ?, ?, ?, ?)",
                MILESTONE_COLUMNS
            ),
            params![
                milestone.id,
                milestone.title,
                milestone.description,
                encode_timestamp(&milestone.achieved_at),
                milestone.icon,
            ],
        )?;
        Ok(())
    }
}
