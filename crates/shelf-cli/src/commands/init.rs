//! Init command handler.
//!
//! Writes the config file (unless one exists), creates the database with
//! its schema, and optionally loads the demo library.

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{write_config, LibrarySection, ShelfConfig};
use crate::demo::demo_entries;
use crate::ui::{badge, blank_line, header, hint, print, receipt, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false, false);
    let config_path = ctx.config_path();
    let db_path = ctx.db_path();

    let config_written = if config_path.exists() && !args.force {
        tracing::debug!(path = %config_path.display(), "keeping existing config");
        false
    } else {
        let config = ShelfConfig {
            library: LibrarySection {
                path: db_path.to_string_lossy().to_string(),
            },
            ..ctx.config().clone()
        };
        write_config(config_path, &config)?;
        true
    };

    let mut library = ctx.create_library()?;
    let seeded = if args.demo {
        library.seed(&demo_entries())?
    } else {
        0
    };
    tracing::info!(path = %db_path.display(), seeded, "library initialized");

    if ctx.quiet() {
        return Ok(());
    }

    let db = db_path.display().to_string();
    let config = config_path.display().to_string();
    let entries = library.entries().len().to_string();
    let mut items = vec![("Library", db.as_str()), ("Entries", entries.as_str())];
    if config_written {
        items.push(("Config", config.as_str()));
    }

    print(&ui, &header(&ui, "init", None));
    blank_line(&ui);
    print(&ui, &receipt(&ui, "Library ready", &items));

    if args.demo && seeded == 0 {
        print(
            &ui,
            &badge(&ui, Badge::Warn, "Library already has entries; demo data was skipped."),
        );
    } else if !config_written {
        print(
            &ui,
            &hint(&ui, "Config already exists; pass --force to rewrite it."),
        );
    } else if library.entries().is_empty() {
        print(&ui, &hint(&ui, "shelf add \"Title\" --type anime --total 12"));
    }
    Ok(())
}
