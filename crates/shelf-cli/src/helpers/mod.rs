//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Confirmation prompts for destructive commands (`input`)
//! - Argument parsing and entry lookup (`parsing`)

mod input;
mod parsing;

pub use input::confirm;
pub use parsing::{normalize_genres, parse_platforms, read_seed_file, resolve_entry_id};
