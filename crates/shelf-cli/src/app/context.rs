//! Application context for the Shelf CLI.
//!
//! Bundles the parsed arguments with the loaded config so handlers do not
//! thread both through every call.

use std::path::PathBuf;

use shelf_core::{Library, SqliteStore};

use crate::cli::Cli;
use crate::config::{load_config, ShelfConfig};
use crate::ui::UiContext;

use super::resolver::{missing_library_message, resolve_config_path, resolve_db_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: PathBuf,
    config: ShelfConfig,
}

impl<'a> AppContext<'a> {
    /// Load the config (or defaults when there is none yet).
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path()?;
        let config = load_config(&config_path)?;
        Ok(Self {
            cli,
            config_path,
            config,
        })
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn db_path(&self) -> PathBuf {
        resolve_db_path(self.cli, &self.config)
    }

    /// UI context for one command's output.
    pub fn ui(&self, json: bool, plain: bool) -> UiContext {
        let ascii = self.cli.ascii || !self.config.ui.unicode;
        UiContext::from_env(json, plain, self.cli.no_color, ascii)
    }

    /// Open an existing library. A missing database file is an error with
    /// a hint to run `shelf init`.
    pub fn open_library(&self) -> anyhow::Result<Library<SqliteStore>> {
        let path = self.db_path();
        if !path.exists() {
            return Err(anyhow::anyhow!(missing_library_message(&path)));
        }
        self.create_library()
    }

    /// Open the library, creating the database file if needed.
    pub fn create_library(&self) -> anyhow::Result<Library<SqliteStore>> {
        let path = self.db_path();
        let store = SqliteStore::open(&path)?.with_decode_policy(self.config.decode_policy());
        let library = Library::open(store)?;
        tracing::debug!(
            path = %path.display(),
            entries = library.entries().len(),
            "library opened"
        );
        Ok(library)
    }
}

