//! Entry commands: add, edit, list, show, seed, export.

mod add;
mod edit;
mod export;
mod list;
mod seed;
mod show;

pub use add::handle_add;
pub use edit::handle_edit;
pub use export::handle_export;
pub use list::handle_list;
pub use seed::handle_seed;
pub use show::handle_show;
