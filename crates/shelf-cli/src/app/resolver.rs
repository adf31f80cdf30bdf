//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, ShelfConfig};

/// Resolve the config file path, checking SHELF_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("SHELF_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path: `--db` / SHELF_DB first, then the config.
pub fn resolve_db_path(cli: &Cli, config: &ShelfConfig) -> PathBuf {
    match cli.db.clone() {
        Some(path) => path,
        None => PathBuf::from(&config.library.path),
    }
}

/// Error message when the database file is missing.
pub fn missing_library_message(path: &Path) -> String {
    format!(
        "No library found at {}\n\nRun:\n  shelf init\n\nOr specify a database path:\n  SHELF_DB=/path/to/media-tracker.db shelf init",
        path.display()
    )
}
