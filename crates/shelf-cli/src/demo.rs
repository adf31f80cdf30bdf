//! Sample entries for `shelf init --demo`.

use chrono::{Duration, Utc};

use shelf_core::{MediaEntry, MediaStatus, MediaType, PlatformLink};

/// A small mixed library. Timestamps are spread over the past week so the
/// calendar and shelves have something to show.
pub fn demo_entries() -> Vec<MediaEntry> {
    let now = Utc::now();
    vec![
        MediaEntry::new("Frieren: Beyond Journey's End", MediaType::Anime, MediaStatus::Watching)
            .with_alternate_title("Sousou no Frieren")
            .with_total_units(28)
            .with_progress(19)
            .with_rating(9.4)
            .with_genres(["Adventure", "Drama", "Fantasy"])
            .with_platforms(vec![PlatformLink::new(
                "Crunchyroll",
                "https://www.crunchyroll.com/series/GG5H5XQX4/frieren-beyond-journeys-end",
            )])
            .with_trending_rank(1)
            .with_favorite(true)
            .with_updated_at(now - Duration::hours(2)),
        MediaEntry::new("Mushishi", MediaType::Anime, MediaStatus::Completed)
            .with_total_units(26)
            .with_progress(26)
            .with_rating(9.0)
            .with_genres(["Mystery", "Slice of Life", "Supernatural"])
            .with_trending_rank(88)
            .with_updated_at(now - Duration::days(3)),
        MediaEntry::new("Dungeon Meshi", MediaType::Anime, MediaStatus::Planned)
            .with_alternate_title("Delicious in Dungeon")
            .with_total_units(24)
            .with_genres(["Adventure", "Comedy", "Fantasy"])
            .with_trending_rank(4)
            .with_updated_at(now - Duration::days(1)),
        MediaEntry::new("Vinland Saga", MediaType::Manga, MediaStatus::Reading)
            .with_progress(190)
            .with_rating(8.8)
            .with_genres(["Action", "Drama", "Historical"])
            .with_trending_rank(7)
            .with_updated_at(now - Duration::hours(20)),
        MediaEntry::new("Yotsuba&!", MediaType::Manga, MediaStatus::OnHold)
            .with_total_units(112)
            .with_progress(64)
            .with_rating(8.5)
            .with_genres(["Comedy", "Slice of Life"])
            .with_updated_at(now - Duration::days(6)),
        MediaEntry::new("The Apothecary Diaries", MediaType::LightNovel, MediaStatus::Reading)
            .with_alternate_title("Kusuriya no Hitorigoto")
            .with_total_units(60)
            .with_progress(12)
            .with_genres(["Drama", "Mystery"])
            .with_trending_rank(2)
            .with_updated_at(now - Duration::days(2)),
        MediaEntry::new("Perfect Days", MediaType::Movie, MediaStatus::Completed)
            .with_total_units(1)
            .with_progress(1)
            .with_rating(8.2)
            .with_genres(["Drama"])
            .with_updated_at(now - Duration::days(4)),
        MediaEntry::new("Outer Wilds", MediaType::Game, MediaStatus::Dropped)
            .with_rating(6.0)
            .with_genres(["Adventure", "Mystery"])
            .with_trending_rank(30)
            .with_updated_at(now - Duration::days(5)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_entries_are_valid() {
        let entries = demo_entries();
        assert_eq!(entries.len(), 8);
        for entry in &entries {
            entry.validate().unwrap();
        }
    }
}
