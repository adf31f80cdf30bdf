//! Core data types for the storage layer.
//!
//! Entries serialize in camelCase with kebab-case enum values so that seed
//! files written for the mobile app load without conversion.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ShelfError};

/// Kind of work being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Anime,
    Manga,
    LightNovel,
    Novel,
    Movie,
    Tv,
    Drama,
    Game,
    Other,
}

impl MediaType {
    pub const ALL: [MediaType; 9] = [
        MediaType::Anime,
        MediaType::Manga,
        MediaType::LightNovel,
        MediaType::Novel,
        MediaType::Movie,
        MediaType::Tv,
        MediaType::Drama,
        MediaType::Game,
        MediaType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::LightNovel => "light-novel",
            Self::Novel => "novel",
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Drama => "drama",
            Self::Game => "game",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str() == s)
            .ok_or_else(|| ShelfError::InvalidInput(format!("Unknown media type: {}", s)))
    }
}

/// Where the user is with a work. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaStatus {
    Watching,
    Reading,
    Completed,
    Planned,
    OnHold,
    Dropped,
}

impl MediaStatus {
    pub const ALL: [MediaStatus; 6] = [
        MediaStatus::Watching,
        MediaStatus::Reading,
        MediaStatus::Completed,
        MediaStatus::Planned,
        MediaStatus::OnHold,
        MediaStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Planned => "planned",
            Self::OnHold => "on-hold",
            Self::Dropped => "dropped",
        }
    }

    /// Watching and reading both count as "in progress".
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Watching | Self::Reading)
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str() == s)
            .ok_or_else(|| ShelfError::InvalidInput(format!("Unknown status: {}", s)))
    }
}

/// Display unit for progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitLabel {
    #[default]
    Episodes,
    Chapters,
    Volumes,
    Entries,
}

impl UnitLabel {
    pub const ALL: [UnitLabel; 4] = [
        UnitLabel::Episodes,
        UnitLabel::Chapters,
        UnitLabel::Volumes,
        UnitLabel::Entries,
    ];

    /// Unit assigned to a newly created entry of the given type.
    pub fn for_media_type(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Manga | MediaType::LightNovel | MediaType::Novel => Self::Chapters,
            MediaType::Movie => Self::Entries,
            _ => Self::Episodes,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Episodes => "episodes",
            Self::Chapters => "chapters",
            Self::Volumes => "volumes",
            Self::Entries => "entries",
        }
    }
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitLabel {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str() == s)
            .ok_or_else(|| ShelfError::InvalidInput(format!("Unknown unit label: {}", s)))
    }
}

/// Where a work can be watched or read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLink {
    pub label: String,
    pub url: String,
}

impl PlatformLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One tracked work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    /// Immutable identifier
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_title: Option<String>,

    pub media_type: MediaType,

    pub status: MediaStatus,

    /// Upper bound for progress; `None` means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_units: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_units: Option<i64>,

    #[serde(default)]
    pub unit_label: UnitLabel,

    /// Score in `[0, 10]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio_or_author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,

    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default)]
    pub platforms: Vec<PlatformLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Lower is more prominent; absent sorts last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending_rank: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_rank: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_rank: Option<i64>,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    pub is_private: bool,

    /// Set once by the store on first insert
    #[serde(default)]
    pub created_at: DateTime<Utc>,

    /// Restamped by the store on every write
    pub updated_at: DateTime<Utc>,
}

impl MediaEntry {
    /// Create an entry with a fresh id and the unit label implied by its type.
    pub fn new(title: impl Into<String>, media_type: MediaType, status: MediaStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            alternate_title: None,
            media_type,
            status,
            total_units: None,
            progress_units: None,
            unit_label: UnitLabel::for_media_type(media_type),
            rating: None,
            synopsis: None,
            studio_or_author: None,
            source: None,
            cover_image: None,
            banner_image: None,
            genres: Vec::new(),
            platforms: Vec::new(),
            notes: None,
            release_date: None,
            year: None,
            trending_rank: None,
            seasonal_rank: None,
            recommendation_rank: None,
            is_favorite: false,
            is_private: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_alternate_title(mut self, title: impl Into<String>) -> Self {
        self.alternate_title = Some(title.into());
        self
    }

    pub fn with_total_units(mut self, total: i64) -> Self {
        self.total_units = Some(total);
        self
    }

    pub fn with_progress(mut self, progress: i64) -> Self {
        self.progress_units = Some(progress);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_genres<I, G>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<PlatformLink>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_trending_rank(mut self, rank: i64) -> Self {
        self.trending_rank = Some(rank);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    /// Current progress, treating an absent counter as zero.
    pub fn progress(&self) -> i64 {
        self.progress_units.unwrap_or(0)
    }

    /// Check the invariants the store enforces on write.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ShelfError::Validation("Entry id is empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(ShelfError::Validation("Entry title is empty".to_string()));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=10.0).contains(&rating) {
                return Err(ShelfError::Validation(format!(
                    "Rating {} is outside 0-10",
                    rating
                )));
            }
        }
        if let Some(total) = self.total_units {
            if total < 0 {
                return Err(ShelfError::Validation(
                    "Total units cannot be negative".to_string(),
                ));
            }
        }
        if let Some(progress) = self.progress_units {
            if progress < 0 {
                return Err(ShelfError::Validation(
                    "Progress cannot be negative".to_string(),
                ));
            }
            if let Some(total) = self.total_units {
                if progress > total {
                    return Err(ShelfError::Validation(format!(
                        "Progress {} exceeds total {}",
                        progress, total
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Append-only record of one progress change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,

    /// Owning entry; rows are removed with it
    pub media_id: String,

    /// Delta as requested, not the clamped effective change
    pub delta: i64,

    /// Progress after clamping
    pub total_after: i64,

    pub created_at: DateTime<Utc>,
}

/// An achievement row. The core stores these but never creates them itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub achieved_at: DateTime<Utc>,
    pub icon: String,
}

impl Milestone {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            achieved_at: Utc::now(),
            icon: icon.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_label_follows_media_type() {
        assert_eq!(UnitLabel::for_media_type(MediaType::Anime), UnitLabel::Episodes);
        assert_eq!(UnitLabel::for_media_type(MediaType::Manga), UnitLabel::Chapters);
        assert_eq!(
            UnitLabel::for_media_type(MediaType::LightNovel),
            UnitLabel::Chapters
        );
        assert_eq!(UnitLabel::for_media_type(MediaType::Novel), UnitLabel::Chapters);
        assert_eq!(UnitLabel::for_media_type(MediaType::Movie), UnitLabel::Entries);
        assert_eq!(UnitLabel::for_media_type(MediaType::Game), UnitLabel::Episodes);

        let entry = MediaEntry::new("Berserk", MediaType::Manga, MediaStatus::Reading);
        assert_eq!(entry.unit_label, UnitLabel::Chapters);
    }

    #[test]
    fn test_enum_names_round_trip_through_from_str() {
        for media_type in MediaType::ALL {
            assert_eq!(media_type.as_str().parse::<MediaType>().unwrap(), media_type);
        }
        for status in MediaStatus::ALL {
            assert_eq!(status.as_str().parse::<MediaStatus>().unwrap(), status);
        }
        assert!("podcast".parse::<MediaType>().is_err());
        assert!("paused".parse::<MediaStatus>().is_err());
    }

    #[test]
    fn test_entry_deserializes_from_app_json() {
        let json = r#"{
            "id": "frieren",
            "title": "Frieren",
            "mediaType": "anime",
            "status": "on-hold",
            "totalUnits": 28,
            "progressUnits": 10,
            "unitLabel": "episodes",
            "genres": ["Fantasy", "Drama"],
            "platforms": [{"label": "Crunchyroll", "url": "https://example.com"}],
            "isFavorite": true,
            "updatedAt": "2024-03-01T10:00:00.000Z"
        }"#;

        let entry: MediaEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, MediaStatus::OnHold);
        assert_eq!(entry.total_units, Some(28));
        assert_eq!(entry.genres, vec!["Fantasy", "Drama"]);
        assert_eq!(entry.platforms[0].label, "Crunchyroll");
        assert!(entry.is_favorite);
        assert!(!entry.is_private);
    }

    #[test]
    fn test_validate_rejects_progress_past_total() {
        let entry = MediaEntry::new("A", MediaType::Anime, MediaStatus::Watching)
            .with_total_units(12)
            .with_progress(13);
        assert!(matches!(entry.validate(), Err(ShelfError::Validation(_))));

        let entry = MediaEntry::new("A", MediaType::Anime, MediaStatus::Watching).with_rating(11.0);
        assert!(entry.validate().is_err());

        let entry = MediaEntry::new("A", MediaType::Anime, MediaStatus::Watching)
            .with_total_units(12)
            .with_progress(12)
            .with_rating(10.0);
        assert!(entry.validate().is_ok());
    }
}
