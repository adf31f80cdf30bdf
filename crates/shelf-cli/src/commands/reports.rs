//! Read-only reports: home shelves, stats, trending, activity, calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use shelf_core::aggregate::{
    achievements, activity_points, day_summary, entries_by_date, entries_on, genre_distribution,
    media_type_distribution, Achievement, ActivityPoint, DaySummary, GenreCount, MediaStats,
    MediaTypeCount, MindfulStats,
};
use shelf_core::{ActivityLogEntry, Library, MediaEntry, MediaStore, MediaType, Milestone};

use crate::app::AppContext;
use crate::cli::{ActivityArgs, CalendarArgs, ReportArgs, TrendingArgs};
use crate::helpers::resolve_entry_id;
use crate::output::{entry_row, print_json, ENTRY_COLUMNS};
use crate::ui::theme::{styled, styles};
use crate::ui::{
    badge, blank_line, format_datetime, format_rating, header, kv, print, short_id, simple_table,
    table, truncate, Badge, Column, UiContext,
};

const TITLE_WIDTH: usize = 40;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomeReport {
    continue_watching: Vec<MediaEntry>,
    recently_updated: Vec<MediaEntry>,
}

pub fn handle_home(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;
    let report = HomeReport {
        continue_watching: library.continue_watching(),
        recently_updated: library.recently_updated(),
    };

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&report);
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "home", None));
        blank_line(&ui);
    }
    print_shelf(&ui, "Continue watching", &report.continue_watching);
    blank_line(&ui);
    print_shelf(&ui, "Recently updated", &report.recently_updated);
    Ok(())
}

fn print_shelf(ui: &UiContext, title: &str, entries: &[MediaEntry]) {
    section(ui, title);
    if entries.is_empty() {
        print(ui, &kv(ui, title, "nothing here yet"));
        return;
    }
    let rows: Vec<Vec<String>> = entries.iter().map(|entry| entry_row(ui, entry)).collect();
    print(ui, &simple_table(ui, &ENTRY_COLUMNS, &rows));
}

/// Section title in pretty mode; plain output stays line-oriented.
fn section(ui: &UiContext, title: &str) {
    if ui.mode.is_pretty() {
        print(ui, &styled(title, styles::bold(), ui.color));
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    stats: MediaStats,
    insights: MindfulStats,
    achievements: Vec<Achievement>,
    media_types: Vec<MediaTypeCount>,
    genres: Vec<GenreCount>,
    activity: Vec<ActivityPoint>,
    milestones: Vec<Milestone>,
}

pub fn handle_stats(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let mut library = ctx.open_library()?;
    let insights = library.insights()?;
    let earned = achievements(&insights);
    record_new_milestones(&mut library, &earned)?;

    let entries = library.entries();
    let report = StatsReport {
        stats: library.stats(),
        insights,
        achievements: earned,
        media_types: media_type_distribution(entries),
        genres: genre_distribution(entries),
        activity: activity_points(entries),
        milestones: library.milestones()?,
    };

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&report);
    }
    print_stats(ctx, &ui, &report);
    Ok(())
}

/// Store a milestone the first time each achievement is earned.
fn record_new_milestones<S: MediaStore>(
    library: &mut Library<S>,
    earned: &[Achievement],
) -> anyhow::Result<()> {
    let known = library.milestones()?;
    for achievement in earned {
        let title = achievement.title();
        if known.iter().any(|milestone| milestone.title == title) {
            continue;
        }
        let milestone = Milestone::new(
            title,
            achievement.description(),
            achievement_icon(achievement),
        );
        library.record_milestone(&milestone)?;
        tracing::info!(title = %milestone.title, "milestone recorded");
    }
    Ok(())
}

fn achievement_icon(achievement: &Achievement) -> &'static str {
    match achievement {
        Achievement::HiddenGems { .. } => "gem",
        Achievement::Finisher { .. } => "target",
        Achievement::Streak { .. } => "flame",
    }
}

fn print_stats(ctx: &AppContext, ui: &UiContext, report: &StatsReport) {
    if !ctx.quiet() {
        print(ui, &header(ui, "stats", None));
        blank_line(ui);
    }

    let stats = &report.stats;
    section(ui, "Library");
    let lines = [
        kv(ui, "Entries", &stats.total_entries.to_string()),
        kv(ui, "Completed", &stats.completed.to_string()),
        kv(ui, "In Progress", &stats.in_progress.to_string()),
        kv(ui, "Mean Score", &format!("{:.2}", stats.mean_score)),
        kv(ui, "Episodes Watched", &stats.episodes_watched.to_string()),
        kv(ui, "Chapters Read", &stats.chapters_read.to_string()),
        kv(ui, "Days Watched", &format!("{:.1}", stats.days_watched)),
    ];
    print(ui, &lines.join("\n"));
    blank_line(ui);

    let insights = &report.insights;
    section(ui, "Insights");
    let lines = [
        kv(ui, "Completion Rate", &format!("{}%", insights.completion_rate)),
        kv(ui, "Quality Score", &format!("{:.1}", insights.quality_score)),
        kv(ui, "Genre Diversity", &insights.genre_diversity.to_string()),
        kv(ui, "Weekly Velocity", &insights.weekly_velocity.to_string()),
        kv(ui, "Efficiency", &format!("{}%", insights.efficiency_score)),
        kv(ui, "Current Streak", &format!("{} days", insights.current_streak)),
        kv(ui, "Hidden Gems", &insights.hidden_gems.to_string()),
    ];
    print(ui, &lines.join("\n"));

    if !report.media_types.is_empty() {
        blank_line(ui);
        section(ui, "By type");
        let rows: Vec<Vec<String>> = report
            .media_types
            .iter()
            .map(|row| vec![row.media_type.to_string(), row.count.to_string()])
            .collect();
        print(
            ui,
            &table(ui, &[Column::new("TYPE"), Column::new("COUNT")], &rows),
        );
    }

    if !report.genres.is_empty() {
        blank_line(ui);
        section(ui, "Top genres");
        let rows: Vec<Vec<String>> = report
            .genres
            .iter()
            .map(|row| vec![row.genre.clone(), row.count.to_string()])
            .collect();
        print(
            ui,
            &simple_table(ui, &[Column::new("GENRE"), Column::new("COUNT")], &rows),
        );
    }

    if !report.achievements.is_empty() {
        blank_line(ui);
        section(ui, "Achievements");
        for achievement in &report.achievements {
            let line = format!("{}: {}", achievement.title(), achievement.description());
            if ui.mode.is_pretty() {
                print(ui, &badge(ui, Badge::Info, &line));
            } else {
                print(ui, &kv(ui, "Achievement", &line));
            }
        }
    }
}

pub fn handle_trending(ctx: &AppContext, args: &TrendingArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;
    let mut shelves: BTreeMap<MediaType, Vec<MediaEntry>> = library.trending_by_type();
    if let Some(media_type) = args.media_type {
        shelves.retain(|kind, _| *kind == media_type);
    }

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&shelves);
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "trending", None));
        blank_line(&ui);
    }
    if shelves.is_empty() {
        if !ctx.quiet() {
            print(&ui, "No trending entries.");
        }
        return Ok(());
    }

    let columns = [
        Column::new("RANK"),
        Column::new("ID"),
        Column::new("TITLE"),
        Column::new("TYPE"),
        Column::new("RATING"),
    ];
    let mut first = true;
    for (media_type, entries) in &shelves {
        if !first {
            blank_line(&ui);
        }
        first = false;
        section(&ui, media_type.as_str());
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| {
                let rank = entry
                    .trending_rank
                    .map(|rank| format!("#{}", rank))
                    .unwrap_or_default();
                vec![
                    rank,
                    entry_id(&ui, &entry.id),
                    truncate(&entry.title, TITLE_WIDTH),
                    entry.media_type.to_string(),
                    format_rating(entry.rating),
                ]
            })
            .collect();
        print(&ui, &simple_table(&ui, &columns, &rows));
    }
    Ok(())
}

fn entry_id(ui: &UiContext, id: &str) -> String {
    if ui.mode.is_pretty() {
        short_id(id)
    } else {
        id.to_string()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityRow<'a> {
    #[serde(flatten)]
    log: &'a ActivityLogEntry,
    title: Option<&'a str>,
}

pub fn handle_activity(ctx: &AppContext, args: &ActivityArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;

    let logs = match &args.id {
        Some(needle) => {
            let id = resolve_entry_id(library.entries(), needle)?;
            let mut logs = library.activity_for(&id)?;
            logs.reverse();
            logs.truncate(args.limit);
            logs
        }
        None => library.recent_activity(args.limit)?,
    };

    let rows: Vec<ActivityRow> = logs
        .iter()
        .map(|log| ActivityRow {
            log,
            title: library.get(&log.media_id).map(|entry| entry.title.as_str()),
        })
        .collect();

    let ui = ctx.ui(args.json, false);
    if ui.mode.is_json() {
        return print_json(&rows);
    }

    if rows.is_empty() {
        if !ctx.quiet() {
            print(&ui, "No activity yet.");
        }
        return Ok(());
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "activity", None));
        blank_line(&ui);
    }
    let pretty = ui.mode.is_pretty();
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                format_datetime(&row.log.created_at, pretty),
                truncate(row.title.unwrap_or(row.log.media_id.as_str()), TITLE_WIDTH),
                format!("{:+}", row.log.delta),
                row.log.total_after.to_string(),
            ]
        })
        .collect();
    let columns = [
        Column::new("WHEN"),
        Column::new("TITLE"),
        Column::new("DELTA"),
        Column::new("TOTAL"),
    ];
    print(&ui, &simple_table(&ui, &columns, &table_rows));
    Ok(())
}

#[derive(Serialize)]
struct CalendarDay {
    date: NaiveDate,
    summary: DaySummary,
    entries: Vec<MediaEntry>,
}

pub fn handle_calendar(ctx: &AppContext, args: &CalendarArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;
    let ui = ctx.ui(args.json, false);

    match args.date {
        Some(date) => {
            let entries = entries_on(library.entries(), date);
            let day = CalendarDay {
                date,
                summary: day_summary(&entries),
                entries,
            };
            if ui.mode.is_json() {
                return print_json(&day);
            }
            print_day(ctx, &ui, &day);
        }
        None => {
            let days: Vec<CalendarDay> = entries_by_date(library.entries())
                .into_iter()
                .rev()
                .map(|(date, entries)| CalendarDay {
                    date,
                    summary: day_summary(&entries),
                    entries,
                })
                .collect();
            if ui.mode.is_json() {
                return print_json(&days);
            }
            print_overview(ctx, &ui, &days);
        }
    }
    Ok(())
}

fn print_day(ctx: &AppContext, ui: &UiContext, day: &CalendarDay) {
    let date = day.date.to_string();
    if !ctx.quiet() {
        print(ui, &header(ui, "calendar", Some(&date)));
        blank_line(ui);
    }
    let summary = [
        kv(ui, "Updated", &day.summary.total.to_string()),
        kv(ui, "Episodes", &day.summary.episodes.to_string()),
        kv(ui, "Chapters", &day.summary.chapters.to_string()),
    ];
    print(ui, &summary.join("\n"));
    if !day.entries.is_empty() {
        blank_line(ui);
        let rows: Vec<Vec<String>> = day.entries.iter().map(|entry| entry_row(ui, entry)).collect();
        print(ui, &simple_table(ui, &ENTRY_COLUMNS, &rows));
    }
}

fn print_overview(ctx: &AppContext, ui: &UiContext, days: &[CalendarDay]) {
    if days.is_empty() {
        if !ctx.quiet() {
            print(ui, "No entries yet.");
        }
        return;
    }
    if !ctx.quiet() {
        print(ui, &header(ui, "calendar", None));
        blank_line(ui);
    }
    let rows: Vec<Vec<String>> = days
        .iter()
        .map(|day| {
            vec![
                day.date.to_string(),
                day.summary.total.to_string(),
                day.summary.episodes.to_string(),
                day.summary.chapters.to_string(),
            ]
        })
        .collect();
    let columns = [
        Column::new("DATE"),
        Column::new("ENTRIES"),
        Column::new("EPISODES"),
        Column::new("CHAPTERS"),
    ];
    print(ui, &simple_table(ui, &columns, &rows));
}
