//! Command handlers, one module per command group.

mod entries;
mod init;
mod maintenance;
mod misc;
mod reports;
mod tracking;

pub use entries::{handle_add, handle_edit, handle_export, handle_list, handle_seed, handle_show};
pub use init::handle_init;
pub use maintenance::{handle_clear, handle_delete};
pub use misc::handle_completions;
pub use reports::{handle_activity, handle_calendar, handle_home, handle_stats, handle_trending};
pub use tracking::{handle_bump, handle_favorite, handle_status};

use shelf_core::Commit;

/// Unwrap a commit, turning a rollback into a command error.
pub(crate) fn committed<T>(commit: Commit<T>) -> anyhow::Result<T> {
    match commit {
        Commit::Committed(value) => Ok(value),
        Commit::RolledBack { reason } => Err(anyhow::anyhow!(
            "Change was not saved: {}\nHint: The library was reloaded from disk; nothing changed.",
            reason
        )),
    }
}

/// Error for an id that vanished between lookup and write.
pub(crate) fn entry_gone(id: &str) -> anyhow::Error {
    anyhow::anyhow!("Entry not found: {}\nHint: Run `shelf list` to see IDs.", id)
}
