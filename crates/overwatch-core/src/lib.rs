//! Agent store and context manager for Overwatch
//!
//! This crate owns everything Overwatch persists about an agent:
//!
//! - **Model**: [`Agent`], [`AgentRunLog`] and the records nested in a run
//! - **Store**: how an agent maps onto `agents/<name>/` in a workspace
//! - **Context manager**: creation, listing, status transitions, run
//!   recording and history retrieval, with per-agent locking
//! - **Config**: optional `overwatch.toml` workspace settings
//!
//! # Architecture
//!
//! ```text
//!        overwatch-cli      overwatch-report
//!              |                  |
//!              +--- overwatch-core
//!                        |
//!                   overwatch-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use overwatch_core::{AgentContextManager, AgentRunLog, AgentStatus};
//!
//! fn example() -> overwatch_core::Result<()> {
//!     let manager = AgentContextManager::open("/srv/monitoring")?;
//!     manager.create_agent("disk-watch", "Alert when any volume exceeds 90%")?;
//!     manager.record_run("disk-watch", AgentRunLog::new(chrono::Utc::now()))?;
//!     manager.set_agent_status("disk-watch", AgentStatus::Paused)?;
//!     let latest = manager.get_history("disk-watch", Some(1))?;
//!     assert_eq!(latest[0].run_id, 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod store;

pub use config::WorkspaceConfig;
pub use error::{Error, Result};
pub use manager::AgentContextManager;
pub use model::{
    ActionStatus, Agent, AgentAction, AgentRunLog, AgentState, AgentStatus, LlmUsage, OpenMap,
    RunContext, StateChanges, StateSnapshot, ToolCallEntry,
};
pub use store::AgentStore;
