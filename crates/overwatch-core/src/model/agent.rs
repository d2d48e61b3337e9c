//! Agent identity, status and persisted counters

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StateSnapshot;

/// Whether an agent is eligible to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// The agent runs whenever the driver schedules it
    #[default]
    Active,
    /// The agent is skipped until resumed
    Paused,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            other => Err(format!("Unknown agent status: {}", other)),
        }
    }
}

/// Contents of `state.json`.
///
/// Counters are only ever written after a run record has been published,
/// so they always describe the last completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub status: AgentStatus,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub active_issue_count: u64,
    #[serde(default)]
    pub run_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
}

impl AgentState {
    /// Fresh state for a newly created agent.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            status: AgentStatus::Active,
            summary: String::new(),
            active_issue_count: 0,
            run_count: 0,
            created_at: now,
            updated_at: now,
            last_run_at: None,
        }
    }

    /// The counters a run starting now would see.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            summary: self.summary.clone(),
            active_issue_count: self.active_issue_count,
            run_count: self.run_count,
        }
    }
}

/// An agent as seen by callers: identity plus its current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub instruction: String,
    pub status: AgentStatus,
    pub run_count: u64,
    pub summary: String,
    pub active_issue_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
}

impl Agent {
    pub fn from_parts(name: impl Into<String>, instruction: impl Into<String>, state: AgentState) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            status: state.status,
            run_count: state.run_count,
            summary: state.summary,
            active_issue_count: state.active_issue_count,
            created_at: state.created_at,
            updated_at: state.updated_at,
            last_run_at: state.last_run_at,
        }
    }
}

/// What a driver needs to know before starting a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunContext {
    pub agent_name: String,
    pub instruction: String,
    pub status: AgentStatus,
    pub state_at_start: StateSnapshot,
    pub next_run_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AgentStatus::Paused).unwrap(), "\"paused\"");
        assert_eq!("Active".parse::<AgentStatus>().unwrap(), AgentStatus::Active);
        assert!("stopped".parse::<AgentStatus>().is_err());
    }

    #[test]
    fn state_json_uses_camel_case() {
        let state = AgentState::new(Utc::now());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["activeIssueCount"], 0);
        assert_eq!(json["runCount"], 0);
        assert!(json.get("lastRunAt").is_none());
    }
}
