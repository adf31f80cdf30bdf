//! Text and table output for entries.

use shelf_core::MediaEntry;

use crate::ui::format::single_line;
use crate::ui::theme::{favorite_marker, progress_bar, status_style, styled};
use crate::ui::{
    blank_line, format_datetime, format_progress, format_rating, header, kv, print, short_id,
    simple_table, truncate, Column, UiContext,
};

use super::json::print_json;

pub const ENTRY_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("TITLE"),
    Column::new("TYPE"),
    Column::new("STATUS"),
    Column::new("PROGRESS"),
    Column::new("RATING"),
];

const TITLE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 20;

/// One table row per entry. Plain mode keeps full ids and titles.
pub fn entry_row(ctx: &UiContext, entry: &MediaEntry) -> Vec<String> {
    if !ctx.mode.is_pretty() {
        return vec![
            entry.id.clone(),
            single_line(&entry.title),
            entry.media_type.to_string(),
            entry.status.to_string(),
            format_progress(entry),
            format_rating(entry.rating),
        ];
    }

    let mut title = truncate(&single_line(&entry.title), title_width(ctx));
    if entry.is_favorite {
        title = format!("{} {}", favorite_marker(ctx.unicode), title);
    }
    vec![
        short_id(&entry.id),
        title,
        entry.media_type.to_string(),
        styled(entry.status.as_str(), status_style(entry.status), ctx.color),
        format_progress(entry),
        format_rating(entry.rating),
    ]
}

/// Titles get at most half the terminal, within sane bounds.
fn title_width(ctx: &UiContext) -> usize {
    (ctx.width / 2).clamp(16, TITLE_WIDTH)
}

pub fn print_entry_list(
    ctx: &UiContext,
    entries: &[MediaEntry],
    context: Option<&str>,
    quiet: bool,
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        return print_json(entries);
    }

    if entries.is_empty() {
        if !quiet {
            print(ctx, "No entries found.");
        }
        return Ok(());
    }

    if !quiet {
        print(ctx, &header(ctx, "list", context));
        blank_line(ctx);
    }
    let rows: Vec<Vec<String>> = entries.iter().map(|entry| entry_row(ctx, entry)).collect();
    print(ctx, &simple_table(ctx, &ENTRY_COLUMNS, &rows));
    Ok(())
}

/// Full detail view of one entry.
pub fn print_entry(ctx: &UiContext, entry: &MediaEntry, quiet: bool) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        return print_json(entry);
    }

    let pretty = ctx.mode.is_pretty();
    if pretty && !quiet {
        print(ctx, &header(ctx, "show", Some(&short_id(&entry.id))));
        blank_line(ctx);
    }

    let mut lines = vec![
        kv(ctx, "ID", &entry.id),
        kv(ctx, "Title", &entry.title),
    ];
    if let Some(alt) = &entry.alternate_title {
        lines.push(kv(ctx, "Alternate Title", alt));
    }
    lines.push(kv(ctx, "Type", entry.media_type.as_str()));
    lines.push(kv(
        ctx,
        "Status",
        &styled(entry.status.as_str(), status_style(entry.status), ctx.color),
    ));

    let mut progress = format_progress(entry);
    let bar = progress_bar(entry.progress(), entry.total_units, BAR_WIDTH, ctx.unicode);
    if pretty && !bar.is_empty() {
        progress = format!("{} {}", bar, progress);
    }
    lines.push(kv(ctx, "Progress", &progress));
    lines.push(kv(ctx, "Rating", &format_rating(entry.rating)));

    if !entry.genres.is_empty() {
        lines.push(kv(ctx, "Genres", &entry.genres.join(", ")));
    }
    for platform in &entry.platforms {
        lines.push(kv(
            ctx,
            "Platform",
            &format!("{} {}", platform.label, platform.url),
        ));
    }
    if let Some(studio) = &entry.studio_or_author {
        lines.push(kv(ctx, "Studio", studio));
    }
    if let Some(year) = entry.year {
        lines.push(kv(ctx, "Year", &year.to_string()));
    }
    if let Some(rank) = entry.trending_rank {
        lines.push(kv(ctx, "Trending", &format!("#{}", rank)));
    }
    lines.push(kv(ctx, "Favorite", if entry.is_favorite { "yes" } else { "no" }));
    if entry.is_private {
        lines.push(kv(ctx, "Private", "yes"));
    }
    lines.push(kv(ctx, "Added", &format_datetime(&entry.created_at, pretty)));
    lines.push(kv(ctx, "Updated", &format_datetime(&entry.updated_at, pretty)));

    print(ctx, &lines.join("\n"));

    if let Some(synopsis) = &entry.synopsis {
        blank_line(ctx);
        print(ctx, &kv(ctx, "Synopsis", &single_line(synopsis)));
    }
    if let Some(notes) = &entry.notes {
        blank_line(ctx);
        print(ctx, &kv(ctx, "Notes", &single_line(notes)));
    }
    Ok(())
}
