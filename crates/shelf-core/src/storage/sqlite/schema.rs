//! Table definitions and schema versioning.

use rusqlite::Connection;

use crate::error::Result;

/// Schema version recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS media_entries (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    alternate_title TEXT,
    media_type TEXT NOT NULL,
    status TEXT NOT NULL,
    total_units INTEGER,
    progress_units INTEGER DEFAULT 0,
    unit_label TEXT NOT NULL DEFAULT 'episodes',
    rating REAL,
    synopsis TEXT,
    studio_or_author TEXT,
    source TEXT,
    cover_image TEXT,
    banner_image TEXT,
    genres TEXT NOT NULL DEFAULT '[]',
    platforms TEXT NOT NULL DEFAULT '[]',
    notes TEXT,
    release_date TEXT,
    year INTEGER,
    trending_rank INTEGER,
    seasonal_rank INTEGER,
    recommendation_rank INTEGER,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    is_private INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity_logs (
    id TEXT PRIMARY KEY NOT NULL,
    media_id TEXT NOT NULL,
    delta INTEGER NOT NULL,
    total_after INTEGER NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY(media_id) REFERENCES media_entries(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS milestones (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    achieved_at TEXT NOT NULL,
    icon TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS activity_logs_media_id
ON activity_logs (media_id);
"#;

/// Create missing tables and stamp the schema version.
///
/// Never drops or rewrites existing rows.
pub fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    conn.execute_batch(CREATE_TABLES)?;

    if version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))?;
        tracing::info!(from = version, to = SCHEMA_VERSION, "schema migrated");
    }

    Ok(())
}

/// Read the recorded schema version.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}
