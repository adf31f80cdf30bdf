use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::commands::entry_gone;
use crate::helpers::resolve_entry_id;
use crate::output::print_entry;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let library = ctx.open_library()?;
    let id = resolve_entry_id(library.entries(), &args.id)?;
    let entry = library.get(&id).ok_or_else(|| entry_gone(&id))?;

    let ui = ctx.ui(args.json, false);
    print_entry(&ui, entry, ctx.quiet())
}
