//! Calendar grouping by the UTC day an entry was last updated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::stats::units_consumed;
use crate::storage::{MediaEntry, UnitLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DaySummary {
    pub episodes: i64,
    pub chapters: i64,
    pub total: usize,
}

pub fn entries_by_date(entries: &[MediaEntry]) -> BTreeMap<NaiveDate, Vec<MediaEntry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<MediaEntry>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.updated_at.date_naive())
            .or_default()
            .push(entry.clone());
    }
    grouped
}

pub fn entries_on(entries: &[MediaEntry], date: NaiveDate) -> Vec<MediaEntry> {
    entries
        .iter()
        .filter(|entry| entry.updated_at.date_naive() == date)
        .cloned()
        .collect()
}

/// Units consumed by the given entries, for a calendar day or the whole list.
pub fn day_summary(entries: &[MediaEntry]) -> DaySummary {
    DaySummary {
        episodes: units_consumed(entries, UnitLabel::Episodes),
        chapters: units_consumed(entries, UnitLabel::Chapters),
        total: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MediaStatus, MediaType};
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_grouping_by_utc_day() {
        let entries = vec![
            MediaEntry::new("a", MediaType::Anime, MediaStatus::Watching)
                .with_progress(4)
                .with_updated_at(at(1, 1)),
            MediaEntry::new("b", MediaType::Manga, MediaStatus::Reading)
                .with_progress(30)
                .with_updated_at(at(1, 23)),
            MediaEntry::new("c", MediaType::Anime, MediaStatus::Watching)
                .with_progress(2)
                .with_updated_at(at(2, 0)),
        ];

        let grouped = entries_by_date(&entries);
        assert_eq!(grouped.len(), 2);
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(grouped[&first].len(), 2);

        let on_first = entries_on(&entries, first);
        assert_eq!(
            day_summary(&on_first),
            DaySummary {
                episodes: 4,
                chapters: 30,
                total: 2
            }
        );
    }
}
