//! # Shelf Core
//!
//! Core library for Shelf - a local-first media tracker for anime, manga,
//! books, and everything else with episodes or chapters.
//!
//! This crate provides the storage layer, progress rules, and derived
//! statistics independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: `MediaStore` trait and the SQLite implementation
//! - **progress**: bounded increments shared by store and snapshot
//! - **aggregate**: stats, trending buckets, distributions, insights
//! - **query**: search and sort over the snapshot
//! - **library**: the snapshot owner with two-phase mutations

pub mod aggregate;
pub mod error;
pub mod library;
pub mod progress;
pub mod query;
pub mod storage;

pub use error::{Result, ShelfError};
pub use library::{Commit, Library, LibraryEvent};
pub use query::{SearchFilter, SortKey};
pub use storage::{
    ActivityLogEntry, DecodePolicy, MediaEntry, MediaStatus, MediaStore, MediaType, Milestone,
    PlatformLink, SqliteStore, UnitLabel,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
