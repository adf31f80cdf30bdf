//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

use shelf_core::MediaEntry;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First 8 characters of an id, enough to type back as a prefix.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// "10/12 episodes", or "10 chapters" when unbounded.
pub fn format_progress(entry: &MediaEntry) -> String {
    match entry.total_units {
        Some(total) => format!("{}/{} {}", entry.progress(), total, entry.unit_label),
        None => format!("{} {}", entry.progress(), entry.unit_label),
    }
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.1}", value),
        None => "-".to_string(),
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}
