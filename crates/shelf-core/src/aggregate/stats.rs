//! Headline library statistics.

use serde::Serialize;

use super::round_to;
use crate::storage::{MediaEntry, MediaStatus, UnitLabel};

/// Rough viewing pace used to turn episodes into days.
const EPISODES_PER_DAY: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
    pub total_entries: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Mean of ratings above zero, two decimals
    pub mean_score: f64,
    pub episodes_watched: i64,
    pub chapters_read: i64,
    /// One decimal
    pub days_watched: f64,
}

pub fn compute_stats(entries: &[MediaEntry]) -> MediaStats {
    let completed = entries
        .iter()
        .filter(|entry| entry.status == MediaStatus::Completed)
        .count();
    let in_progress = entries
        .iter()
        .filter(|entry| entry.status.is_in_progress())
        .count();

    let ratings: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.rating)
        .filter(|rating| *rating > 0.0)
        .collect();
    let mean_score = if ratings.is_empty() {
        0.0
    } else {
        round_to(ratings.iter().sum::<f64>() / ratings.len() as f64, 2)
    };

    let episodes_watched = units_consumed(entries, UnitLabel::Episodes);
    let chapters_read = units_consumed(entries, UnitLabel::Chapters);

    MediaStats {
        total_entries: entries.len(),
        completed,
        in_progress,
        mean_score,
        episodes_watched,
        chapters_read,
        days_watched: round_to(episodes_watched as f64 / EPISODES_PER_DAY, 1),
    }
}

/// Saturating sum; unbounded entries may sit at `i64::MAX`.
pub(crate) fn units_consumed(entries: &[MediaEntry], unit: UnitLabel) -> i64 {
    entries
        .iter()
        .filter(|entry| entry.unit_label == unit)
        .map(MediaEntry::progress)
        .fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MediaType;

    fn entry(media_type: MediaType, status: MediaStatus) -> MediaEntry {
        MediaEntry::new("x", media_type, status)
    }

    #[test]
    fn test_empty_library() {
        assert_eq!(compute_stats(&[]), MediaStats::default());
    }

    #[test]
    fn test_mean_score_of_completed_ratings() {
        let entries = vec![
            entry(MediaType::Anime, MediaStatus::Completed).with_rating(8.0),
            entry(MediaType::Anime, MediaStatus::Completed).with_rating(9.0),
            entry(MediaType::Anime, MediaStatus::Completed).with_rating(7.0),
        ];
        let stats = compute_stats(&entries);
        assert_eq!(stats.mean_score, 8.0);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.in_progress, 0);
    }

    #[test]
    fn test_unrated_and_zero_ratings_are_ignored() {
        let entries = vec![
            entry(MediaType::Anime, MediaStatus::Planned).with_rating(0.0),
            entry(MediaType::Anime, MediaStatus::Planned),
            entry(MediaType::Anime, MediaStatus::Planned).with_rating(7.0),
            entry(MediaType::Anime, MediaStatus::Planned).with_rating(8.0),
            entry(MediaType::Anime, MediaStatus::Planned).with_rating(8.0),
        ];
        assert_eq!(compute_stats(&entries).mean_score, 7.67);
    }

    #[test]
    fn test_unit_totals_and_days() {
        let entries = vec![
            entry(MediaType::Anime, MediaStatus::Watching).with_progress(12),
            entry(MediaType::Tv, MediaStatus::Watching).with_progress(8),
            entry(MediaType::Manga, MediaStatus::Reading).with_progress(40),
            entry(MediaType::Movie, MediaStatus::Completed).with_progress(1),
            entry(MediaType::Anime, MediaStatus::Planned),
        ];
        let stats = compute_stats(&entries);
        assert_eq!(stats.total_entries, 5);
        assert_eq!(stats.in_progress, 3);
        assert_eq!(stats.episodes_watched, 20);
        assert_eq!(stats.chapters_read, 40);
        assert_eq!(stats.days_watched, 6.7);
    }

    #[test]
    fn test_unit_totals_saturate() {
        let entries = vec![
            entry(MediaType::Anime, MediaStatus::Watching).with_progress(i64::MAX),
            entry(MediaType::Anime, MediaStatus::Watching).with_progress(1),
        ];
        let stats = compute_stats(&entries);
        assert_eq!(stats.episodes_watched, i64::MAX);
        assert!(stats.days_watched > 0.0);
    }
}
