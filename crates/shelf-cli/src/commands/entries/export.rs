//! Export command handler.
//!
//! `json` writes an array that `shelf seed` reads back; `jsonl` writes one
//! entry per line.

use serde::Serialize;

use shelf_core::{ActivityLogEntry, MediaEntry};

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::output::print_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportWithActivity<'a> {
    entries: &'a [MediaEntry],
    activity: Vec<ActivityLogEntry>,
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;
    let entries = library.entries();

    match args.format.as_str() {
        "json" if args.with_activity => {
            let mut activity = library.recent_activity(usize::MAX)?;
            activity.reverse();
            print_json(&ExportWithActivity { entries, activity })
        }
        "json" => print_json(entries),
        "jsonl" => {
            if args.with_activity {
                return Err(anyhow::anyhow!("--with-activity requires --format json"));
            }
            for entry in entries {
                println!("{}", serde_json::to_string(entry)?);
            }
            Ok(())
        }
        other => Err(anyhow::anyhow!(
            "Unsupported export format: {}\nHint: Use --format json or --format jsonl",
            other
        )),
    }
}
