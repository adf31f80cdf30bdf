//! Progress, status, and favorite updates.

use shelf_core::{MediaEntry, MediaStatus};

use crate::app::AppContext;
use crate::cli::{BumpArgs, IdArgs, StatusArgs};
use crate::commands::{committed, entry_gone};
use crate::helpers::resolve_entry_id;
use crate::ui::{format_progress, hint, print, receipt};

pub fn handle_bump(ctx: &AppContext, args: &BumpArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;

    let progress = committed(library.bump(&id, args.delta)?)?.ok_or_else(|| entry_gone(&id))?;
    let entry = library.get(&id).ok_or_else(|| entry_gone(&id))?;
    tracing::info!(id = %id, delta = args.delta, progress, "progress bumped");

    if ctx.quiet() {
        println!("{}", progress);
        return Ok(());
    }

    let ui = ctx.ui(false, false);
    let delta = format!("{:+}", args.delta);
    let shown = format_progress(entry);
    print(
        &ui,
        &receipt(
            &ui,
            "Progress updated",
            &[
                ("Title", entry.title.as_str()),
                ("Delta", delta.as_str()),
                ("Progress", shown.as_str()),
            ],
        ),
    );
    if finished_but_open(entry) {
        print(
            &ui,
            &hint(&ui, &format!("shelf status {} completed", entry.id)),
        );
    }
    Ok(())
}

/// All units consumed while the status still says otherwise.
fn finished_but_open(entry: &MediaEntry) -> bool {
    entry.status != MediaStatus::Completed
        && entry
            .total_units
            .is_some_and(|total| total > 0 && entry.progress() >= total)
}

pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;

    let entry =
        committed(library.update_status(&id, args.status)?)?.ok_or_else(|| entry_gone(&id))?;
    tracing::info!(id = %id, status = %entry.status, "status changed");

    print_update(ctx, "Status changed", &entry)
}

pub fn handle_favorite(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;

    let entry = committed(library.toggle_favorite(&id)?)?.ok_or_else(|| entry_gone(&id))?;
    tracing::info!(id = %id, favorite = entry.is_favorite, "favorite toggled");

    let title = if entry.is_favorite {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    print_update(ctx, title, &entry)
}

fn print_update(ctx: &AppContext, title: &str, entry: &MediaEntry) -> anyhow::Result<()> {
    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui(false, false);
    let favorite = if entry.is_favorite { "yes" } else { "no" };
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("Title", entry.title.as_str()),
                ("Status", entry.status.as_str()),
                ("Favorite", favorite),
            ],
        ),
    );
    Ok(())
}
