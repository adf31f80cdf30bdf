//! Grouped views: trending shelves, type and genre breakdowns, activity points.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::storage::codec::encode_timestamp;
use crate::storage::{MediaEntry, MediaType};

/// Entries kept per media type on a trending shelf.
pub const TRENDING_LIMIT: usize = 6;

/// Genres kept in the genre breakdown.
pub const GENRE_LIMIT: usize = 5;

/// Entries sampled for the activity heatmap.
pub const ACTIVITY_SAMPLE: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeCount {
    pub media_type: MediaType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    /// `updated_at` and entry id joined, unique per entry
    pub date: String,
    pub value: i64,
}

/// Top entries per media type, most prominent trending rank first.
///
/// Unranked entries sort after every ranked one. Ties keep input order.
pub fn trending_by_type(entries: &[MediaEntry]) -> BTreeMap<MediaType, Vec<MediaEntry>> {
    let mut groups: BTreeMap<MediaType, Vec<MediaEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.media_type).or_default().push(entry.clone());
    }

    for group in groups.values_mut() {
        group.sort_by_key(|entry| (entry.trending_rank.is_none(), entry.trending_rank));
        group.truncate(TRENDING_LIMIT);
    }
    groups
}

/// One bucket per media type present, in order of first appearance.
pub fn media_type_distribution(entries: &[MediaEntry]) -> Vec<MediaTypeCount> {
    let mut buckets: Vec<MediaTypeCount> = Vec::new();
    for entry in entries {
        match buckets
            .iter_mut()
            .find(|bucket| bucket.media_type == entry.media_type)
        {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(MediaTypeCount {
                media_type: entry.media_type,
                count: 1,
            }),
        }
    }
    buckets
}

/// Most frequent genres across all entries, at most [`GENRE_LIMIT`].
///
/// Sorted by count descending; equal counts keep first-encountered order.
pub fn genre_distribution(entries: &[MediaEntry]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for genre in entries.iter().flat_map(|entry| entry.genres.iter()) {
        match index.get(genre.as_str()) {
            Some(&position) => counts[position].count += 1,
            None => {
                index.insert(genre.as_str(), counts.len());
                counts.push(GenreCount {
                    genre: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(GENRE_LIMIT);
    counts
}

/// Heatmap points for the first [`ACTIVITY_SAMPLE`] entries, in the given order.
pub fn activity_points(entries: &[MediaEntry]) -> Vec<ActivityPoint> {
    entries
        .iter()
        .take(ACTIVITY_SAMPLE)
        .map(|entry| ActivityPoint {
            date: format!("{}-{}", encode_timestamp(&entry.updated_at), entry.id),
            value: entry.progress(),
        })
        .collect()
}
