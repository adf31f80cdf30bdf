//! Row types for database queries.

use crate::error::{Result, ShelfError};
use crate::storage::codec::{decode_bool, decode_list, decode_timestamp, DecodePolicy};
use crate::storage::types::{
    ActivityLogEntry, MediaEntry, MediaStatus, MediaType, Milestone, UnitLabel,
};

/// Column list shared by every `media_entries` SELECT, in `EntryRow` order.
pub const ENTRY_COLUMNS: &str = "id, title, alternate_title, media_type, status, total_units, \
     progress_units, unit_label, rating, synopsis, studio_or_author, source, cover_image, \
     banner_image, genres, platforms, notes, release_date, year, trending_rank, seasonal_rank, \
     recommendation_rank, is_favorite, is_private, created_at, updated_at";

pub const ACTIVITY_COLUMNS: &str = "id, media_id, delta, total_after, created_at";

pub const MILESTONE_COLUMNS: &str = "id, title, description, achieved_at, icon";

/// Raw row data from the media_entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: String,
    pub title: String,
    pub alternate_title: Option<String>,
    pub media_type: String,
    pub status: String,
    pub total_units: Option<i64>,
    pub progress_units: Option<i64>,
    pub unit_label: Option<String>,
    pub rating: Option<f64>,
    pub synopsis: Option<String>,
    pub studio_or_author: Option<String>,
    pub source: Option<String>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub genres: Option<String>,
    pub platforms: Option<String>,
    pub notes: Option<String>,
    pub release_date: Option<String>,
    pub year: Option<i32>,
    pub trending_rank: Option<i64>,
    pub seasonal_rank: Option<i64>,
    pub recommendation_rank: Option<i64>,
    pub is_favorite: i64,
    pub is_private: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl EntryRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            alternate_title: row.get(2)?,
            media_type: row.get(3)?,
            status: row.get(4)?,
            total_units: row.get(5)?,
            progress_units: row.get(6)?,
            unit_label: row.get(7)?,
            rating: row.get(8)?,
            synopsis: row.get(9)?,
            studio_or_author: row.get(10)?,
            source: row.get(11)?,
            cover_image: row.get(12)?,
            banner_image: row.get(13)?,
            genres: row.get(14)?,
            platforms: row.get(15)?,
            notes: row.get(16)?,
            release_date: row.get(17)?,
            year: row.get(18)?,
            trending_rank: row.get(19)?,
            seasonal_rank: row.get(20)?,
            recommendation_rank: row.get(21)?,
            is_favorite: row.get(22)?,
            is_private: row.get(23)?,
            created_at: row.get(24)?,
            updated_at: row.get(25)?,
        })
    }

    pub fn into_entry(self, policy: DecodePolicy) -> Result<MediaEntry> {
        let media_type: MediaType = self
            .media_type
            .parse()
            .map_err(|_| decode_err(&self.id, "media_type", &self.media_type))?;
        let status: MediaStatus = self
            .status
            .parse()
            .map_err(|_| decode_err(&self.id, "status", &self.status))?;
        let unit_label: UnitLabel = match self.unit_label.as_deref() {
            Some(value) => value
                .parse()
                .map_err(|_| decode_err(&self.id, "unit_label", value))?,
            None => UnitLabel::default(),
        };
        let genres = decode_list(self.genres.as_deref(), "genres", &self.id, policy)?;
        let platforms = decode_list(self.platforms.as_deref(), "platforms", &self.id, policy)?;
        let created_at = decode_timestamp(&self.created_at)?;
        let updated_at = decode_timestamp(&self.updated_at)?;

        Ok(MediaEntry {
            id: self.id,
            title: self.title,
            alternate_title: self.alternate_title,
            media_type,
            status,
            total_units: self.total_units,
            progress_units: self.progress_units,
            unit_label,
            rating: self.rating,
            synopsis: self.synopsis,
            studio_or_author: self.studio_or_author,
            source: self.source,
            cover_image: self.cover_image,
            banner_image: self.banner_image,
            genres,
            platforms,
            notes: self.notes,
            release_date: self.release_date,
            year: self.year,
            trending_rank: self.trending_rank,
            seasonal_rank: self.seasonal_rank,
            recommendation_rank: self.recommendation_rank,
            is_favorite: decode_bool(self.is_favorite),
            is_private: decode_bool(self.is_private),
            created_at,
            updated_at,
        })
    }
}

fn decode_err(id: &str, column: &str, value: &str) -> ShelfError {
    ShelfError::Decode(format!("Invalid {} {:?} for entry {}", column, value, id))
}

/// Raw row data from the activity_logs table.
#[derive(Debug)]
pub struct ActivityRow {
    pub id: String,
    pub media_id: String,
    pub delta: i64,
    pub total_after: i64,
    pub created_at: String,
}

impl ActivityRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            media_id: row.get(1)?,
            delta: row.get(2)?,
            total_after: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl TryFrom<ActivityRow> for ActivityLogEntry {
    type Error = ShelfError;

    fn try_from(row: ActivityRow) -> Result<Self> {
        let created_at = decode_timestamp(&row.created_at)?;
        Ok(ActivityLogEntry {
            id: row.id,
            media_id: row.media_id,
            delta: row.delta,
            total_after: row.total_after,
            created_at,
        })
    }
}

/// Raw row data from the milestones table.
#[derive(Debug)]
pub struct MilestoneRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub achieved_at: String,
    pub icon: String,
}

impl MilestoneRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            achieved_at: row.get(3)?,
            icon: row.get(4)?,
        })
    }
}

impl TryFrom<MilestoneRow> for Milestone {
    type Error = ShelfError;

    fn try_from(row: MilestoneRow) -> Result<Self> {
        let achieved_at = decode_timestamp(&row.achieved_at)?;
        Ok(Milestone {
            id: row.id,
            title: row.title,
            description: row.description,
            achieved_at,
            icon: row.icon,
        })
    }
}
