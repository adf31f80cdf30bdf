use shelf_core::query::sort_entries;
use shelf_core::SearchFilter;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::print_entry_list;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;

    let mut filter = SearchFilter::new();
    if let Some(media_type) = args.media_type {
        filter = filter.media_type(media_type);
    }
    if let Some(status) = args.status {
        filter = filter.status(status);
    }

    let query = args.query.as_deref().unwrap_or("");
    let mut found = library.search(query, &filter);
    if args.favorites {
        found.retain(|entry| entry.is_favorite);
    }

    let mut entries = sort_entries(&found, args.sort);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    let context = format!("sorted by {}", args.sort.as_str());
    let ui = ctx.ui(args.json, args.plain);
    print_entry_list(&ui, &entries, Some(&context), ctx.quiet())
}
