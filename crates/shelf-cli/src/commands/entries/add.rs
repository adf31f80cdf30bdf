//! Add entry command handler.

use shelf_core::MediaEntry;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::commands::committed;
use crate::helpers::{normalize_genres, parse_platforms};
use crate::output::print_json;
use crate::ui::{format_progress, hint, print, receipt};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let entry = build_entry(args)?;

    let stored = committed(library.save_entry(entry)?)?;
    tracing::info!(id = %stored.id, media_type = %stored.media_type, "entry added");

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&stored);
    }
    if ctx.quiet() {
        println!("{}", stored.id);
        return Ok(());
    }

    let progress = format_progress(&stored);
    print(
        &ui,
        &receipt(
            &ui,
            "Added entry",
            &[
                ("ID", stored.id.as_str()),
                ("Title", stored.title.as_str()),
                ("Type", stored.media_type.as_str()),
                ("Status", stored.status.as_str()),
                ("Progress", progress.as_str()),
            ],
        ),
    );
    if ui.mode.is_pretty() {
        print(&ui, &hint(&ui, &format!("shelf bump {}", stored.id)));
    }
    Ok(())
}

fn build_entry(args: &AddArgs) -> anyhow::Result<MediaEntry> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(anyhow::anyhow!("Title cannot be empty"));
    }

    let mut entry = MediaEntry::new(title, args.media_type, args.status);
    entry.alternate_title = args.alt_title.clone();
    entry.total_units = args.total;
    entry.progress_units = args.progress;
    entry.rating = args.rating;
    entry.genres = normalize_genres(&args.genre);
    entry.platforms = parse_platforms(&args.platform)?;
    entry.studio_or_author = args.studio.clone();
    entry.year = args.year;
    entry.notes = args.notes.clone();
    entry.is_favorite = args.favorite;
    entry.is_private = args.private;
    Ok(entry)
}
