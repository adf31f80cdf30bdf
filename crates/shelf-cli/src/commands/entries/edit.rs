//! Edit entry command handler.

use shelf_core::MediaEntry;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::commands::{committed, entry_gone};
use crate::helpers::{normalize_genres, parse_platforms, resolve_entry_id};
use crate::output::print_json;
use crate::ui::{format_progress, format_rating, print, receipt};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;
    let mut entry = library.get(&id).cloned().ok_or_else(|| entry_gone(&id))?;

    if !apply_changes(&mut entry, args)? {
        return Err(anyhow::anyhow!(
            "Nothing to change\nHint: Pass at least one field, e.g. `shelf edit {} --rating 8`",
            args.id
        ));
    }

    let stored = committed(library.save_entry(entry)?)?;
    tracing::info!(id = %stored.id, "entry edited");

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&stored);
    }
    if ctx.quiet() {
        return Ok(());
    }

    let progress = format_progress(&stored);
    let rating = format_rating(stored.rating);
    print(
        &ui,
        &receipt(
            &ui,
            "Updated entry",
            &[
                ("ID", stored.id.as_str()),
                ("Title", stored.title.as_str()),
                ("Status", stored.status.as_str()),
                ("Progress", progress.as_str()),
                ("Rating", rating.as_str()),
            ],
        ),
    );
    Ok(())
}

/// Copy the given flags onto the entry. Returns false when no flag was set.
fn apply_changes(entry: &mut MediaEntry, args: &EditArgs) -> anyhow::Result<bool> {
    let mut changed = false;

    if let Some(title) = &args.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(anyhow::anyhow!("Title cannot be empty"));
        }
        entry.title = title.to_string();
        changed = true;
    }
    if let Some(status) = args.status {
        entry.status = status;
        changed = true;
    }
    if let Some(total) = args.total {
        entry.total_units = Some(total);
        changed = true;
    }
    if args.no_total {
        entry.total_units = None;
        changed = true;
    }
    if let Some(progress) = args.progress {
        entry.progress_units = Some(progress);
        changed = true;
    }
    if let Some(rating) = args.rating {
        entry.rating = Some(rating);
        changed = true;
    }
    if !args.genre.is_empty() {
        entry.genres = normalize_genres(&args.genre);
        changed = true;
    }
    if !args.platform.is_empty() {
        entry.platforms = parse_platforms(&args.platform)?;
        changed = true;
    }
    if let Some(alt) = &args.alt_title {
        entry.alternate_title = Some(alt.clone()).filter(|value| !value.trim().is_empty());
        changed = true;
    }
    if let Some(notes) = &args.notes {
        entry.notes = Some(notes.clone()).filter(|value| !value.trim().is_empty());
        changed = true;
    }
    if let Some(private) = args.private {
        entry.is_private = private;
        changed = true;
    }

    Ok(changed)
}
