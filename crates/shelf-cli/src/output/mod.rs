//! Output formatting helpers for the CLI.
//!
//! Entries render as JSON, a table, or tab-separated plain text depending
//! on the resolved output mode.

mod json;
mod text;

pub use json::print_json;
pub use text::{entry_row, print_entry, print_entry_list, ENTRY_COLUMNS};
