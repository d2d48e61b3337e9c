//! Run records: one immutable `AgentRunLog` per completed run

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value mapping for tool arguments and action details.
///
/// Keys are unique and kept sorted so serialized records are stable.
pub type OpenMap = BTreeMap<String, Value>;

/// Agent counters captured before a run started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub active_issue_count: u64,
    #[serde(default)]
    pub run_count: u64,
}

/// Language-model usage for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmUsage {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub tool_call_count: u64,
}

/// One tool invocation made during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallEntry {
    /// 1-based position within the run
    pub sequence: u32,
    pub tool: String,
    #[serde(default)]
    pub args: OpenMap,
    #[serde(default)]
    pub result_summary: String,
    #[serde(default)]
    pub duration_ms: u64,
}

impl ToolCallEntry {
    pub fn new(sequence: u32, tool: impl Into<String>) -> Self {
        Self {
            sequence,
            tool: tool.into(),
            args: OpenMap::new(),
            result_summary: String::new(),
            duration_ms: 0,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn with_result(mut self, summary: impl Into<String>) -> Self {
        self.result_summary = summary.into();
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Reported outcome of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Sent,
    Failed,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound notification triggered by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAction {
    /// Run id that produced this action; assigned when the run is recorded
    #[serde(default)]
    pub run: u64,
    /// Channel identifier, e.g. `teams` or `email`
    #[serde(rename = "type")]
    pub action_type: String,
    pub timestamp: DateTime<Utc>,
    pub status: ActionStatus,
    /// Conventionally carries `title` and `channel`
    #[serde(default)]
    pub details: OpenMap,
}

impl AgentAction {
    pub fn new(action_type: impl Into<String>, status: ActionStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            run: 0,
            action_type: action_type.into(),
            timestamp,
            status,
            details: OpenMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// String value of a detail key, if present.
    pub fn detail_str(&self, key: &str) -> Option<String> {
        match self.details.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Issue identifiers touched by a run, plus whether it rewrote the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChanges {
    #[serde(default)]
    pub created: BTreeSet<String>,
    #[serde(default)]
    pub updated: BTreeSet<String>,
    #[serde(default)]
    pub resolved: BTreeSet<String>,
    #[serde(default)]
    pub summary_updated: bool,
}

impl StateChanges {
    /// True when no issue was touched and the summary was kept.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.updated.is_empty()
            && self.resolved.is_empty()
            && !self.summary_updated
    }

    pub fn with_created<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.created.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_updated<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.updated.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_resolved<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolved.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_summary_updated(mut self, updated: bool) -> Self {
        self.summary_updated = updated;
        self
    }
}

/// The immutable record of one completed run.
///
/// `run_id`, `agent_name`, `state_at_start` and each action's `run` are
/// assigned by the context manager when the record is stored; values
/// supplied by the producer are overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRunLog {
    #[serde(default)]
    pub run_id: u64,
    #[serde(default)]
    pub agent_name: String,
    /// Run start time
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub state_at_start: StateSnapshot,
    #[serde(default)]
    pub llm: LlmUsage,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallEntry>,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub actions: Vec<AgentAction>,
    #[serde(default)]
    pub state_changes: StateChanges,
    /// Summary text produced by this run, applied when `summaryUpdated` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AgentRunLog {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_llm(mut self, llm: LlmUsage) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_tool_call(mut self, entry: ToolCallEntry) -> Self {
        self.tool_calls.push(entry);
        self
    }

    pub fn with_action(mut self, action: AgentAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_findings(mut self, findings: impl Into<String>) -> Self {
        self.findings = findings.into();
        self
    }

    pub fn with_assessment(mut self, assessment: impl Into<String>) -> Self {
        self.assessment = assessment.into();
        self
    }

    pub fn with_state_changes(mut self, changes: StateChanges) -> Self {
        self.state_changes = changes;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Summary the agent should carry after this run, if the run changed it.
    ///
    /// Falls back to the trimmed assessment when the producer set the flag
    /// without supplying a summary.
    pub fn resulting_summary(&self) -> Option<String> {
        if !self.state_changes.summary_updated {
            return None;
        }
        Some(
            self.summary
                .clone()
                .unwrap_or_else(|| self.assessment.trim().to_string()),
        )
    }
}
