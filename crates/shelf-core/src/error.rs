//! Error types for Shelf core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages.

use thiserror::Error;

/// Result type alias for Shelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf operations.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Storage backend error (failed read or durable write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data could not be decoded into domain types
    #[error("Decode error: {0}")]
    Decode(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for ShelfError {
    fn from(err: rusqlite::Error) -> Self {
        ShelfError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        ShelfError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(err: serde_json::Error) -> Self {
        ShelfError::Decode(err.to_string())
    }
}
