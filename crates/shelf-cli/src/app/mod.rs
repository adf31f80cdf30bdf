//! Application-level utilities for the Shelf CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - The per-invocation context that opens the library

mod context;
mod resolver;

pub use context::AppContext;
