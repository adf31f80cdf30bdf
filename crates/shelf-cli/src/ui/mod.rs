//! UI primitives for the Shelf CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges, status colors, progress bars
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, ids, dates, progress)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, receipt, simple_table, table, Column,
};

pub use format::{format_datetime, format_progress, format_rating, short_id, truncate};
