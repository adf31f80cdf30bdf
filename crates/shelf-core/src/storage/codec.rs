//! Column codec for values SQLite has no native type for.
//!
//! Collections are JSON arrays in TEXT columns, booleans are 0/1 integers,
//! timestamps are RFC 3339 UTC text with millisecond precision.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, ShelfError};

/// What to do when a stored JSON collection cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Substitute an empty collection and log a warning.
    #[default]
    Lenient,
    /// Fail the read with `ShelfError::Decode`.
    Strict,
}

pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items)
        .map_err(|e| ShelfError::Storage(format!("Failed to serialize list: {}", e)))
}

/// Decode a JSON array column. `NULL` decodes to an empty list.
pub fn decode_list<T: DeserializeOwned>(
    raw: Option<&str>,
    column: &str,
    entry_id: &str,
    policy: DecodePolicy,
) -> Result<Vec<T>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(raw) {
        Ok(items) => Ok(items),
        Err(err) => match policy {
            DecodePolicy::Lenient => {
                tracing::warn!(
                    entry_id,
                    column,
                    error = %err,
                    "malformed list column, using empty list"
                );
                Ok(Vec::new())
            }
            DecodePolicy::Strict => Err(ShelfError::Decode(format!(
                "Invalid {} JSON for entry {}: {}",
                column, entry_id, err
            ))),
        },
    }
}

pub fn encode_bool(value: bool) -> i64 {
    i64::from(value)
}

pub fn decode_bool(value: i64) -> bool {
    value != 0
}

pub fn encode_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| ShelfError::Decode(format!("Invalid timestamp {:?}: {}", value, e)))
}

/// Current time truncated to what the timestamp column can hold.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
