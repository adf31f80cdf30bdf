//! Shelf CLI - a local-first media tracker for the terminal
//!
//! Thin command layer over `shelf-core`: argument parsing, config, and
//! rendering live here; storage and statistics live in the core.

mod app;
mod cli;
mod commands;
mod config;
mod demo;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;

use shelf_core::VERSION;

use app::AppContext;
use cli::{Cli, Commands};
use ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        let ui = UiContext::from_env(false, false, cli.no_color, cli.ascii);
        let message = format!("{:#}", err);
        let (message, error_hint) = match message.split_once("\nHint: ") {
            Some((message, error_hint)) => (message.to_string(), Some(error_hint.to_string())),
            None => (message, None),
        };
        print_error(&ui, &message, error_hint.as_deref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli)?;
    logging::init(ctx.config().log.level.as_deref());
    tracing::debug!(config = %ctx.config_path().display(), "config resolved");

    let Some(command) = &cli.command else {
        if !cli.quiet {
            println!("shelf {}", VERSION);
            println!("Run `shelf init --demo` to get started, or `shelf --help` for commands.");
        }
        return Ok(());
    };

    match command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::Edit(args) => commands::handle_edit(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Bump(args) => commands::handle_bump(&ctx, args),
        Commands::Status(args) => commands::handle_status(&ctx, args),
        Commands::Favorite(args) => commands::handle_favorite(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Home(args) => commands::handle_home(&ctx, args),
        Commands::Stats(args) => commands::handle_stats(&ctx, args),
        Commands::Trending(args) => commands::handle_trending(&ctx, args),
        Commands::Activity(args) => commands::handle_activity(&ctx, args),
        Commands::Calendar(args) => commands::handle_calendar(&ctx, args),
        Commands::Seed(args) => commands::handle_seed(&ctx, args),
        Commands::Export(args) => commands::handle_export(&ctx, args),
        Commands::Clear(args) => commands::handle_clear(&ctx, args),
        Commands::Completions(args) => commands::handle_completions(args),
    }
}
