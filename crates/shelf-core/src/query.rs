//! Search and sort over the in-memory entry collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShelfError};
use crate::storage::{MediaEntry, MediaStatus, MediaType};

/// Entries shown on the home shelves.
pub const SHELF_LIMIT: usize = 8;

/// Exact-match predicates applied on top of the text query.
///
/// `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub media_type: Option<MediaType>,
    pub status: Option<MediaStatus>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn status(mut self, status: MediaStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn matches(&self, entry: &MediaEntry) -> bool {
        self.media_type.map_or(true, |t| entry.media_type == t)
            && self.status.map_or(true, |s| entry.status == s)
    }
}

/// Case-insensitive substring search over title and alternate title.
///
/// An empty (or whitespace) query matches everything. All predicates are
/// ANDed. Input order is preserved.
pub fn search(entries: &[MediaEntry], query: &str, filter: &SearchFilter) -> Vec<MediaEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| needle.is_empty() || title_matches(entry, &needle))
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

fn title_matches(entry: &MediaEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry
            .alternate_title
            .as_ref()
            .is_some_and(|alt| alt.to_lowercase().contains(needle))
}

/// Library sort orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Rating,
    Progress,
    DateAdded,
    #[default]
    LastUpdated,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Rating,
        SortKey::Progress,
        SortKey::DateAdded,
        SortKey::LastUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::Progress => "progress",
            Self::DateAdded => "date-added",
            Self::LastUpdated => "last-updated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            "progress" => Ok(Self::Progress),
            "date-added" | "dateAdded" => Ok(Self::DateAdded),
            "last-updated" | "lastUpdated" => Ok(Self::LastUpdated),
            other => Err(ShelfError::InvalidInput(format!(
                "Unknown sort key: {} (expected title, rating, progress, date-added, last-updated)",
                other
            ))),
        }
    }
}

/// Return a sorted copy of `list`. The input is left untouched.
///
/// The sort is stable, so equal keys keep their input order.
pub fn sort_entries(list: &[MediaEntry], key: SortKey) -> Vec<MediaEntry> {
    let mut sorted = list.to_vec();
    match key {
        SortKey::Title => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::Rating => sorted.sort_by(|a, b| {
            descending_f64(a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0))
        }),
        SortKey::Progress => {
            sorted.sort_by(|a, b| descending_f64(progress_ratio(a), progress_ratio(b)))
        }
        SortKey::DateAdded => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::LastUpdated => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    sorted
}

/// Case-folded comparison first, so "apple" sorts next to "Apple" rather
/// than after "Zebra". There is no collation table: accented letters sort by
/// code point, after every unaccented one.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn descending_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Progress over total; a missing or zero total counts as 1.
fn progress_ratio(entry: &MediaEntry) -> f64 {
    let total = match entry.total_units {
        Some(total) if total > 0 => total,
        _ => 1,
    };
    entry.progress() as f64 / total as f64
}

/// Unfinished entries, most recently touched first.
pub fn continue_watching(entries: &[MediaEntry]) -> Vec<MediaEntry> {
    let unfinished: Vec<MediaEntry> = entries
        .iter()
        .filter(|entry| entry.total_units.unwrap_or(0) > entry.progress())
        .cloned()
        .collect();
    let mut sorted = sort_entries(&unfinished, SortKey::LastUpdated);
    sorted.truncate(SHELF_LIMIT);
    sorted
}

pub fn recently_updated(entries: &[MediaEntry]) -> Vec<MediaEntry> {
    let mut sorted = sort_entries(entries, SortKey::LastUpdated);
    sorted.truncate(SHELF_LIMIT);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn entry(title: &str) -> MediaEntry {
        MediaEntry::new(title, MediaType::Anime, MediaStatus::Watching).with_id(title)
    }

    fn titles(entries: &[MediaEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.title.as_str()).collect()
    }

    #[test]
    fn test_search_substring_case_insensitive() {
        let entries = vec![entry("Lorem Ipsum"), entry("Ipsum Only")];
        let found = search(&entries, "orem", &SearchFilter::new());
        assert_eq!(titles(&found), vec!["Lorem Ipsum"]);

        let found = search(&entries, "IPSUM", &SearchFilter::new());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let entries = vec![entry("A"), entry("B")];
        assert_eq!(search(&entries, "", &SearchFilter::new()).len(), 2);
        assert_eq!(search(&entries, "   ", &SearchFilter::new()).len(), 2);
    }

    #[test]
    fn test_search_alternate_title() {
        let entries = vec![entry("Shingeki no Kyojin").with_alternate_title("Attack on Titan")];
        let found = search(&entries, "titan", &SearchFilter::new());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_search_filters_are_anded() {
        let entries = vec![
            entry("Monster"),
            MediaEntry::new("Monster", MediaType::Manga, MediaStatus::Reading),
            MediaEntry::new("Monster", MediaType::Manga, MediaStatus::Completed),
        ];
        let filter = SearchFilter::new()
            .media_type(MediaType::Manga)
            .status(MediaStatus::Reading);
        let found = search(&entries, "monster", &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, MediaStatus::Reading);
    }

    #[test]
    fn test_sort_title_is_case_folded() {
        let entries = vec![entry("zebra"), entry("Apple"), entry("banana")];
        let sorted = sort_entries(&entries, SortKey::Title);
        assert_eq!(titles(&sorted), vec!["Apple", "banana", "zebra"]);
    }

    #[test]
    fn test_sort_title_accents_follow_code_points() {
        let entries = vec![entry("Élan"), entry("Zeta"), entry("eden")];
        let sorted = sort_entries(&entries, SortKey::Title);
        assert_eq!(titles(&sorted), vec!["eden", "Zeta", "Élan"]);
    }

    #[test]
    fn test_sort_rating_descending_absent_as_zero() {
        let entries = vec![
            entry("none"),
            entry("low").with_rating(3.0),
            entry("high").with_rating(9.0),
        ];
        let sorted = sort_entries(&entries, SortKey::Rating);
        assert_eq!(titles(&sorted), vec!["high", "low", "none"]);
    }

    #[test]
    fn test_sort_progress_ratio() {
        let entries = vec![
            entry("half").with_total_units(10).with_progress(5),
            entry("done").with_total_units(4).with_progress(4),
            entry("unbounded").with_progress(2),
            entry("fresh").with_total_units(12),
        ];
        let sorted = sort_entries(&entries, SortKey::Progress);
        assert_eq!(titles(&sorted), vec!["unbounded", "done", "half", "fresh"]);
    }

    #[test]
    fn test_sort_dates_descending() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut old = entry("old").with_updated_at(base + Duration::days(5));
        old.created_at = base;
        let mut new = entry("new").with_updated_at(base + Duration::days(1));
        new.created_at = base + Duration::days(1);
        let entries = vec![old, new];

        assert_eq!(
            titles(&sort_entries(&entries, SortKey::LastUpdated)),
            vec!["old", "new"]
        );
        assert_eq!(
            titles(&sort_entries(&entries, SortKey::DateAdded)),
            vec!["new", "old"]
        );
    }

    #[test]
    fn test_sort_is_pure_and_repeatable() {
        let entries = vec![
            entry("b").with_rating(5.0),
            entry("a").with_rating(5.0),
            entry("c").with_rating(7.0),
        ];
        let snapshot = entries.clone();

        let first = sort_entries(&entries, SortKey::Rating);
        let second = sort_entries(&entries, SortKey::Rating);
        assert_eq!(first, second);
        assert_eq!(entries, snapshot);
        assert_eq!(titles(&first), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_key_parsing() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("lastUpdated".parse::<SortKey>().unwrap(), SortKey::LastUpdated);
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_continue_watching_skips_finished_and_unbounded() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            entry("finished")
                .with_total_units(12)
                .with_progress(12)
                .with_updated_at(base),
            entry("unbounded").with_progress(3).with_updated_at(base),
            entry("older")
                .with_total_units(12)
                .with_progress(2)
                .with_updated_at(base),
            entry("newer")
                .with_total_units(24)
                .with_updated_at(base + Duration::hours(1)),
        ];
        assert_eq!(titles(&continue_watching(&entries)), vec!["newer", "older"]);
    }

    #[test]
    fn test_recently_updated_limit() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entries: Vec<MediaEntry> = (0..10)
            .map(|i| entry(&format!("e{}", i)).with_updated_at(base + Duration::minutes(i)))
            .collect();
        let recent = recently_updated(&entries);
        assert_eq!(recent.len(), SHELF_LIMIT);
        assert_eq!(recent[0].title, "e9");
    }
}
