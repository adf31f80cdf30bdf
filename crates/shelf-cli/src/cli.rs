use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use shelf_core::{MediaStatus, MediaType, SortKey, VERSION};

/// Shelf - track anime, manga, books, and movies from the terminal
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the library database
    #[arg(long, global = true, env = "SHELF_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII instead of unicode symbols
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Load a handful of sample entries into an empty library
    #[arg(long)]
    pub demo: bool,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Title of the work
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Media type (anime, manga, light-novel, novel, movie, tv, drama, game, other)
    #[arg(short = 't', long = "type", default_value = "anime")]
    pub media_type: MediaType,

    /// Status (watching, reading, completed, planned, on-hold, dropped)
    #[arg(short, long, default_value = "planned")]
    pub status: MediaStatus,

    /// Total episodes or chapters
    #[arg(long)]
    pub total: Option<i64>,

    /// Starting progress
    #[arg(long)]
    pub progress: Option<i64>,

    /// Rating from 0 to 10
    #[arg(long)]
    pub rating: Option<f64>,

    /// Genre (repeatable)
    #[arg(short, long, value_name = "GENRE")]
    pub genre: Vec<String>,

    /// Where to watch or read, as LABEL=URL (repeatable)
    #[arg(long, value_name = "LABEL=URL")]
    pub platform: Vec<String>,

    /// Alternate or original-language title
    #[arg(long)]
    pub alt_title: Option<String>,

    #[arg(long)]
    pub studio: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,

    /// Hide from shared views
    #[arg(long)]
    pub private: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub status: Option<MediaStatus>,

    #[arg(long)]
    pub total: Option<i64>,

    /// Remove the total, making progress unbounded
    #[arg(long, conflicts_with = "total")]
    pub no_total: bool,

    #[arg(long)]
    pub progress: Option<i64>,

    #[arg(long)]
    pub rating: Option<f64>,

    /// Replace genres (repeatable)
    #[arg(short, long, value_name = "GENRE")]
    pub genre: Vec<String>,

    /// Replace platforms, as LABEL=URL (repeatable)
    #[arg(long, value_name = "LABEL=URL")]
    pub platform: Vec<String>,

    #[arg(long)]
    pub alt_title: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Set private flag
    #[arg(long)]
    pub private: Option<bool>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Text to match against titles
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Filter by media type
    #[arg(short = 't', long = "type")]
    pub media_type: Option<MediaType>,

    /// Filter by status
    #[arg(short, long)]
    pub status: Option<MediaStatus>,

    /// Sort order (title, rating, progress, date-added, last-updated)
    #[arg(long, default_value = "last-updated")]
    pub sort: SortKey,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Plain output even on a terminal
    #[arg(long)]
    pub plain: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `bump` command
#[derive(Args)]
pub struct BumpArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Units to add; negative to step back
    #[arg(value_name = "DELTA", default_value_t = 1, allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New status
    #[arg(value_name = "STATUS")]
    pub status: MediaStatus,
}

/// Arguments for commands that only take an entry ID
#[derive(Args)]
pub struct IdArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for read-only report commands
#[derive(Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `trending` command
#[derive(Args)]
pub struct TrendingArgs {
    /// Only this media type
    #[arg(short = 't', long = "type")]
    pub media_type: Option<MediaType>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `activity` command
#[derive(Args)]
pub struct ActivityArgs {
    /// Only this entry (full or prefix)
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Limit number of rows
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `calendar` command
#[derive(Args)]
pub struct CalendarArgs {
    /// Day to show (YYYY-MM-DD); omit for an overview of every day
    #[arg(value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `seed` command
#[derive(Args)]
pub struct SeedArgs {
    /// JSON file with an array of entries
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Output format (json, jsonl)
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Include activity logs (json only)
    #[arg(long)]
    pub with_activity: bool,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and library database
    Init(InitArgs),

    /// Add a new entry
    Add(AddArgs),

    /// Edit fields of an existing entry
    Edit(EditArgs),

    /// List, search, and sort entries
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Move progress forward (or back) and log it
    Bump(BumpArgs),

    /// Change the status of an entry
    Status(StatusArgs),

    /// Toggle the favorite flag
    Favorite(IdArgs),

    /// Delete an entry and its activity
    Delete(DeleteArgs),

    /// Continue-watching and recently-updated shelves
    Home(ReportArgs),

    /// Library statistics, distributions, and insights
    Stats(ReportArgs),

    /// Top trending entries per media type
    Trending(TrendingArgs),

    /// Progress history
    Activity(ActivityArgs),

    /// Entries grouped by the day they were last updated
    Calendar(CalendarArgs),

    /// Load entries from a JSON file into an empty library
    Seed(SeedArgs),

    /// Export entries (portable formats, you own your data)
    Export(ExportArgs),

    /// Delete every entry, activity row, and milestone
    Clear(ClearArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
