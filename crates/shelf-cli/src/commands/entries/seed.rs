use crate::app::AppContext;
use crate::cli::SeedArgs;
use crate::helpers::read_seed_file;
use crate::ui::{badge, print, receipt, Badge};

/// Load entries from a file. Only an empty library is filled.
pub fn handle_seed(ctx: &AppContext, args: &SeedArgs) -> anyhow::Result<()> {
    let entries = read_seed_file(&args.file)?;
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid entry {} in seed file: {}", entry.id, e))?;
    }

    let mut library = ctx.create_library()?;
    let inserted = library.seed(&entries)?;
    tracing::info!(file = %args.file.display(), inserted, "seed finished");

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui(false, false);
    if inserted == 0 && !entries.is_empty() {
        print(
            &ui,
            &badge(&ui, Badge::Warn, "Library already has entries; nothing was seeded."),
        );
        return Ok(());
    }
    let inserted = inserted.to_string();
    let file = args.file.display().to_string();
    print(
        &ui,
        &receipt(
            &ui,
            "Seeded library",
            &[("File", file.as_str()), ("Inserted", inserted.as_str())],
        ),
    );
    Ok(())
}
