//! Parsing helpers for arguments and seed files.

use std::path::Path;

use shelf_core::{MediaEntry, PlatformLink};

/// Parse repeated `LABEL=URL` arguments.
pub fn parse_platforms(values: &[String]) -> anyhow::Result<Vec<PlatformLink>> {
    values
        .iter()
        .map(|value| {
            let (label, url) = value.split_once('=').ok_or_else(|| {
                anyhow::anyhow!("Invalid platform: {} (expected LABEL=URL)", value)
            })?;
            let (label, url) = (label.trim(), url.trim());
            if label.is_empty() || url.is_empty() {
                return Err(anyhow::anyhow!(
                    "Invalid platform: {} (label and URL are required)",
                    value
                ));
            }
            Ok(PlatformLink::new(label, url))
        })
        .collect()
}

/// Trim genre arguments, dropping blanks and repeats while keeping order.
pub fn normalize_genres(values: &[String]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for value in values {
        let genre = value.trim();
        if !genre.is_empty() && !genres.iter().any(|existing| existing == genre) {
            genres.push(genre.to_string());
        }
    }
    genres
}

/// Find the entry whose id equals `needle` or uniquely starts with it.
pub fn resolve_entry_id(entries: &[MediaEntry], needle: &str) -> anyhow::Result<String> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Err(anyhow::anyhow!("Entry ID cannot be empty"));
    }
    if let Some(entry) = entries.iter().find(|entry| entry.id == needle) {
        return Ok(entry.id.clone());
    }

    let matches: Vec<&MediaEntry> = entries
        .iter()
        .filter(|entry| entry.id.starts_with(needle))
        .collect();
    match matches.as_slice() {
        [entry] => Ok(entry.id.clone()),
        [] => Err(anyhow::anyhow!(
            "Entry not found: {}\nHint: Run `shelf list` to see IDs.",
            needle
        )),
        many => Err(anyhow::anyhow!(
            "ID prefix {} is ambiguous ({} matches); use more characters",
            needle,
            many.len()
        )),
    }
}

/// Read a JSON array of entries, as exported by `shelf export`.
pub fn read_seed_file(path: &Path) -> anyhow::Result<Vec<MediaEntry>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
}
