//! Data model shared by the store, the context manager and the renderer
//!
//! Everything here serializes to JSON with camelCase field names, which is
//! the on-disk format of `state.json` and of each run record.

mod agent;
mod run;

pub use agent::{Agent, AgentState, AgentStatus, RunContext};
pub use run::{
    ActionStatus, AgentAction, AgentRunLog, LlmUsage, OpenMap, StateChanges, StateSnapshot,
    ToolCallEntry,
};
