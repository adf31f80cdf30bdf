//! Profile insights: habits and quality measures beyond the raw counters.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::round_to;
use crate::storage::{ActivityLogEntry, MediaEntry, MediaStatus, UnitLabel};

/// Ratio of progress to total at which an entry counts as nearly done.
const NEAR_COMPLETION: f64 = 0.8;

/// Completed entries rated at least this are gem candidates.
const GEM_RATING: f64 = 8.0;

/// Trending ranks above this are obscure enough for a hidden gem.
const GEM_RANK: i64 = 50;

/// Episode-unit entries sampled for the daily velocity.
const VELOCITY_SAMPLE: usize = 7;

const FINISHER_RATE: i64 = 75;
const STREAK_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulStats {
    /// Percent of started entries that were completed
    pub completion_rate: i64,
    /// Mean rating of completed entries, one decimal
    pub quality_score: f64,
    pub genre_diversity: usize,
    /// Episodes per day over the sampled entries
    pub weekly_velocity: i64,
    pub efficiency_score: i64,
    /// Consecutive days with activity, ending today or yesterday
    pub current_streak: u32,
    pub hidden_gems: usize,
    pub total_completed: usize,
    pub total_in_progress: usize,
}

/// Compute every insight at once.
pub fn compute_insights(
    entries: &[MediaEntry],
    activity: &[ActivityLogEntry],
    today: NaiveDate,
) -> MindfulStats {
    MindfulStats {
        completion_rate: completion_rate(entries),
        quality_score: quality_score(entries),
        genre_diversity: genre_diversity(entries),
        weekly_velocity: weekly_velocity(entries),
        efficiency_score: efficiency_score(entries),
        current_streak: current_streak(activity, today),
        hidden_gems: hidden_gems(entries),
        total_completed: count_status(entries, |status| status == MediaStatus::Completed),
        total_in_progress: count_status(entries, |status| status.is_in_progress()),
    }
}

fn count_status(entries: &[MediaEntry], predicate: impl Fn(MediaStatus) -> bool) -> usize {
    entries.iter().filter(|entry| predicate(entry.status)).count()
}

/// Completed over everything started (completed, in progress, dropped), as a
/// rounded percentage.
pub fn completion_rate(entries: &[MediaEntry]) -> i64 {
    let completed = count_status(entries, |status| status == MediaStatus::Completed);
    let started = count_status(entries, |status| {
        matches!(
            status,
            MediaStatus::Completed | MediaStatus::Watching | MediaStatus::Reading | MediaStatus::Dropped
        )
    });
    if started == 0 {
        return 0;
    }
    (completed as f64 / started as f64 * 100.0).round() as i64
}

/// Mean rating of completed entries rated at least 1.
pub fn quality_score(entries: &[MediaEntry]) -> f64 {
    let ratings: Vec<f64> = entries
        .iter()
        .filter(|entry| entry.status == MediaStatus::Completed)
        .filter_map(|entry| entry.rating)
        .filter(|rating| *rating >= 1.0)
        .collect();
    if ratings.is_empty() {
        return 0.0;
    }
    round_to(ratings.iter().sum::<f64>() / ratings.len() as f64, 1)
}

/// Number of distinct genres across the library.
pub fn genre_diversity(entries: &[MediaEntry]) -> usize {
    entries
        .iter()
        .flat_map(|entry| entry.genres.iter())
        .collect::<HashSet<_>>()
        .len()
}

pub fn weekly_velocity(entries: &[MediaEntry]) -> i64 {
    let episodes: i64 = entries
        .iter()
        .filter(|entry| entry.unit_label == UnitLabel::Episodes)
        .take(VELOCITY_SAMPLE)
        .map(MediaEntry::progress)
        .fold(0, i64::saturating_add);
    (episodes as f64 / VELOCITY_SAMPLE as f64).round() as i64
}

/// Completed plus nearly-finished entries as a percentage of the library.
///
/// An entry can count on both sides, so the score may exceed 100.
pub fn efficiency_score(entries: &[MediaEntry]) -> i64 {
    if entries.is_empty() {
        return 0;
    }
    let completed = count_status(entries, |status| status == MediaStatus::Completed);
    let near_completion = entries.iter().filter(|entry| is_nearly_done(entry)).count();
    ((completed + near_completion) as f64 / entries.len() as f64 * 100.0).round() as i64
}

fn is_nearly_done(entry: &MediaEntry) -> bool {
    match (entry.total_units, entry.progress_units) {
        (Some(total), Some(progress)) if total > 0 && progress > 0 => {
            progress as f64 / total as f64 >= NEAR_COMPLETION
        }
        _ => false,
    }
}

/// Highly rated completed entries that are not trending.
pub fn hidden_gems(entries: &[MediaEntry]) -> usize {
    entries
        .iter()
        .filter(|entry| entry.status == MediaStatus::Completed)
        .filter(|entry| entry.rating.unwrap_or(0.0) >= GEM_RATING)
        .filter(|entry| entry.trending_rank.map_or(true, |rank| rank > GEM_RANK))
        .count()
}

/// Consecutive UTC days with at least one activity row.
///
/// The run may end today or, if nothing has been logged yet today, yesterday.
pub fn current_streak(activity: &[ActivityLogEntry], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = activity
        .iter()
        .map(|log| log.created_at.date_naive())
        .collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Badges earned from the current insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Achievement {
    HiddenGems { count: usize },
    Finisher { completion_rate: i64 },
    Streak { days: u32 },
}

impl Achievement {
    pub fn title(&self) -> String {
        match self {
            Self::HiddenGems { count } => {
                let plural = if *count > 1 { "s" } else { "" };
                format!("{} Hidden Gem{}", count, plural)
            }
            Self::Finisher { .. } => "Finisher's Mindset".to_string(),
            Self::Streak { days } => format!("{} Day Streak", days),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::HiddenGems { .. } => "Discovered underrated treasures".to_string(),
            Self::Finisher { completion_rate } => {
                format!("{}% completion rate", completion_rate)
            }
            Self::Streak { .. } => "Consistent viewing habits".to_string(),
        }
    }
}

pub fn achievements(stats: &MindfulStats) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if stats.hidden_gems > 0 {
        earned.push(Achievement::HiddenGems {
            count: stats.hidden_gems,
        });
    }
    if stats.completion_rate >= FINISHER_RATE {
        earned.push(Achievement::Finisher {
            completion_rate: stats.completion_rate,
        });
    }
    if stats.current_streak >= STREAK_DAYS {
        earned.push(Achievement::Streak {
            days: stats.current_streak,
        });
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MediaType;
    use chrono::{TimeZone, Utc};

    fn entry(status: MediaStatus) -> MediaEntry {
        MediaEntry::new("x", MediaType::Anime, status)
    }

    fn log_on(day: NaiveDate) -> ActivityLogEntry {
        let at = Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap());
        ActivityLogEntry {
            id: day.to_string(),
            media_id: "m".to_string(),
            delta: 1,
            total_after: 1,
            created_at: at,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_completion_rate() {
        let entries = vec![
            entry(MediaStatus::Completed),
            entry(MediaStatus::Completed),
            entry(MediaStatus::Completed),
            entry(MediaStatus::Watching),
            entry(MediaStatus::Dropped),
            entry(MediaStatus::Planned),
        ];
        assert_eq!(completion_rate(&entries), 60);
        assert_eq!(completion_rate(&[]), 0);
        assert_eq!(completion_rate(&[entry(MediaStatus::Planned)]), 0);
    }

    #[test]
    fn test_quality_score_matches_mean_score() {
        let entries = vec![
            entry(MediaStatus::Completed).with_rating(8.0),
            entry(MediaStatus::Completed).with_rating(9.0),
            entry(MediaStatus::Completed).with_rating(7.0),
            entry(MediaStatus::Completed).with_rating(0.5),
            entry(MediaStatus::Watching).with_rating(2.0),
        ];
        assert_eq!(quality_score(&entries), 8.0);
        assert_eq!(quality_score(&[]), 0.0);
    }

    #[test]
    fn test_efficiency_counts_near_completion() {
        let entries = vec![
            entry(MediaStatus::Completed),
            entry(MediaStatus::Watching).with_total_units(10).with_progress(8),
            entry(MediaStatus::Watching).with_total_units(10).with_progress(7),
            entry(MediaStatus::Planned),
        ];
        assert_eq!(efficiency_score(&entries), 50);
        assert_eq!(efficiency_score(&[]), 0);
    }

    #[test]
    fn test_hidden_gems() {
        let entries = vec![
            entry(MediaStatus::Completed).with_rating(9.0),
            entry(MediaStatus::Completed).with_rating(8.0).with_trending_rank(51),
            entry(MediaStatus::Completed).with_rating(9.5).with_trending_rank(50),
            entry(MediaStatus::Completed).with_rating(7.9),
            entry(MediaStatus::Watching).with_rating(10.0),
        ];
        assert_eq!(hidden_gems(&entries), 2);
    }

    #[test]
    fn test_genre_diversity_and_velocity() {
        let entries = vec![
            entry(MediaStatus::Watching)
                .with_genres(["Action", "Drama"])
                .with_progress(10),
            entry(MediaStatus::Watching)
                .with_genres(["Drama", "Sci-Fi"])
                .with_progress(11),
            MediaEntry::new("m", MediaType::Manga, MediaStatus::Reading).with_progress(500),
        ];
        assert_eq!(genre_diversity(&entries), 3);
        assert_eq!(weekly_velocity(&entries), 3);
    }

    #[test]
    fn test_velocity_survives_saturated_progress() {
        let entries = vec![
            entry(MediaStatus::Watching).with_progress(i64::MAX),
            entry(MediaStatus::Watching).with_progress(1),
        ];
        assert_eq!(
            weekly_velocity(&entries),
            (i64::MAX as f64 / 7.0).round() as i64
        );
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let today = day(2024, 5, 10);
        let logs = vec![
            log_on(day(2024, 5, 10)),
            log_on(day(2024, 5, 9)),
            log_on(day(2024, 5, 9)),
            log_on(day(2024, 5, 8)),
            log_on(day(2024, 5, 6)),
        ];
        assert_eq!(current_streak(&logs, today), 3);
    }

    #[test]
    fn test_streak_may_end_yesterday() {
        let today = day(2024, 5, 10);
        let logs = vec![log_on(day(2024, 5, 9)), log_on(day(2024, 5, 8))];
        assert_eq!(current_streak(&logs, today), 2);

        let stale = vec![log_on(day(2024, 5, 1))];
        assert_eq!(current_streak(&stale, today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }

    #[test]
    fn test_achievements() {
        let stats = MindfulStats {
            completion_rate: 80,
            hidden_gems: 1,
            current_streak: 3,
            ..Default::default()
        };
        let earned = achievements(&stats);
        assert_eq!(earned.len(), 2);
        assert_eq!(earned[0].title(), "1 Hidden Gem");
        assert_eq!(earned[1].description(), "80% completion rate");

        let streaky = MindfulStats {
            current_streak: 9,
            ..Default::default()
        };
        assert_eq!(achievements(&streaky), vec![Achievement::Streak { days: 9 }]);
    }
}
