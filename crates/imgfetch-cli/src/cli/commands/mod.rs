//! CLI command handlers. Each command is in its own file.

mod checksum;
mod docs;
mod fetch;

pub use checksum::run_checksum;
pub use docs::{run_completions, run_man};
pub use fetch::run_fetch;
