//! Aggregation engine: pure reductions over the current entry collection.
//!
//! Nothing here caches. Every function takes the entries (and, where needed,
//! activity rows) and returns freshly computed values.

pub mod calendar;
pub mod distribution;
pub mod insights;
pub mod stats;

pub use calendar::{day_summary, entries_by_date, entries_on, DaySummary};
pub use distribution::{
    activity_points, genre_distribution, media_type_distribution, trending_by_type, ActivityPoint,
    GenreCount, MediaTypeCount, ACTIVITY_SAMPLE, GENRE_LIMIT, TRENDING_LIMIT,
};
pub use insights::{achievements, compute_insights, Achievement, MindfulStats};
pub use stats::{compute_stats, MediaStats};

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.0, 2), 8.0);
        assert_eq!(round_to(7.666_666, 2), 7.67);
        assert_eq!(round_to(3.333_333, 1), 3.3);
        assert_eq!(round_to(0.0, 1), 0.0);
    }
}
