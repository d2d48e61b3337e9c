//! Command implementations for overwatch-cli

pub mod completions;
pub mod context;
pub mod history;
pub mod list;
pub mod record;
pub mod start;
pub mod status;

pub use completions::run_completions;
pub use context::run_context;
pub use history::{HistoryArgs, run_history};
pub use list::run_list;
pub use record::run_record;
pub use start::run_start;
pub use status::{run_pause, run_resume};
