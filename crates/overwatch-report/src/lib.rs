//! Markdown run reports for Overwatch agents
//!
//! Rendering is a pure function of an [`AgentRunLog`](overwatch_core::AgentRunLog):
//! no I/O, no failure modes. The only non-deterministic input is the
//! "Generated" timestamp, which [`generate_run_report_at`] takes explicitly.

pub mod format;
pub mod history;
pub mod report;

pub use history::generate_history_overview;
pub use report::{generate_run_report, generate_run_report_at};
