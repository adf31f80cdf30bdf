use crate::app::AppContext;
use crate::cli::{ClearArgs, DeleteArgs};
use crate::commands::{committed, entry_gone};
use crate::helpers::{confirm, resolve_entry_id};
use crate::ui::{print, receipt};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;
    let title = library
        .get(&id)
        .map(|entry| entry.title.clone())
        .ok_or_else(|| entry_gone(&id))?;

    let prompt = format!("Delete \"{}\" and its activity history?", title);
    if !confirm(&prompt, args.force)? {
        if !ctx.quiet() {
            println!("Cancelled.");
        }
        return Ok(());
    }

    if !committed(library.delete_entry(&id)?)? {
        return Err(entry_gone(&id));
    }
    tracing::info!(id = %id, "entry deleted");

    if !ctx.quiet() {
        let ui = ctx.ui(false, false);
        print(
            &ui,
            &receipt(
                &ui,
                "Deleted entry",
                &[("ID", id.as_str()), ("Title", title.as_str())],
            ),
        );
    }
    Ok(())
}

/// Wipe every entry, activity row, and milestone.
pub fn handle_clear(ctx: &AppContext, args: &ClearArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let count = library.entries().len();

    let prompt = format!(
        "Delete all {} entries, their activity, and milestones? This cannot be undone.",
        count
    );
    if !confirm(&prompt, args.force)? {
        if !ctx.quiet() {
            println!("Cancelled.");
        }
        return Ok(());
    }

    committed(library.clear_all()?)?;
    tracing::warn!(removed = count, "library cleared");

    if !ctx.quiet() {
        let ui = ctx.ui(false, false);
        let removed = count.to_string();
        print(
            &ui,
            &receipt(&ui, "Library cleared", &[("Removed", removed.as_str())]),
        );
    }
    Ok(())
}
