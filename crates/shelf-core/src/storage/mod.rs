//! Storage layer: the durable entity store and its data types.

pub mod codec;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use codec::DecodePolicy;
pub use sqlite::SqliteStore;
pub use traits::MediaStore;
pub use types::{
    ActivityLogEntry, MediaEntry, MediaStatus, MediaType, Milestone, PlatformLink, UnitLabel,
};
