//! Agent context manager
//!
//! Business rules on top of [`AgentStore`]: name validation, uniqueness,
//! status transitions, run id assignment and counter derivation. Every call
//! re-reads the disk; nothing is cached between calls.

use std::collections::BTreeSet;

use chrono::Utc;
use overwatch_fs::{NormalizedPath, RobustnessConfig, validate_path_identifier};

use crate::config::WorkspaceConfig;
use crate::model::{Agent, AgentRunLog, AgentState, AgentStatus, RunContext};
use crate::store::AgentStore;
use crate::{Error, Result};

/// Owns the agents of one workspace.
#[derive(Debug, Clone)]
pub struct AgentContextManager {
    store: AgentStore,
}

impl AgentContextManager {
    /// Bind to a workspace root with default I/O settings.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            store: AgentStore::new(root.into(), RobustnessConfig::default()),
        }
    }

    /// Bind to a workspace root using the settings of a loaded config.
    pub fn with_config(root: impl Into<NormalizedPath>, config: &WorkspaceConfig) -> Self {
        Self {
            store: AgentStore::new(root.into(), config.robustness()),
        }
    }

    /// Bind to a workspace root, reading `overwatch.toml` if present.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let config = WorkspaceConfig::load(&root)?;
        Ok(Self::with_config(root, &config))
    }

    pub fn store(&self) -> &AgentStore {
        &self.store
    }

    pub fn workspace_root(&self) -> &NormalizedPath {
        self.store.root()
    }

    /// All agents in the workspace, sorted by name.
    ///
    /// A workspace without an `agents` directory has no agents.
    pub fn list_agents(&self) -> Result<Vec<Agent>> {
        self.ensure_workspace()?;

        let mut agents = Vec::new();
        for name in self.store.list_agent_names()? {
            if !self.store.has_agent(&name) {
                tracing::warn!(agent = %name, "Skipping agent directory without state.json");
                continue;
            }
            agents.push(self.load_agent(&name)?);
        }
        Ok(agents)
    }

    /// Create an agent with status `active`, zeroed counters and no runs.
    pub fn create_agent(&self, name: &str, instruction: &str) -> Result<Agent> {
        validate_path_identifier(name, "Agent name")
            .map_err(|message| Error::InvalidName { message })?;
        self.ensure_workspace()?;

        let _lock = self.store.lock_workspace()?;
        if self.store.agent_dir_exists(name) {
            return Err(Error::AlreadyExists {
                name: name.to_string(),
            });
        }

        let state = AgentState::new(Utc::now());
        self.store.materialize_agent(name, instruction, &state)?;
        tracing::info!(agent = name, "Created agent");

        Ok(Agent::from_parts(name, instruction, state))
    }

    /// Current state of an agent.
    pub fn get_agent(&self, name: &str) -> Result<Agent> {
        self.ensure_agent(name)?;
        self.load_agent(name)
    }

    /// Set an agent's status. Setting the current status is a no-op.
    pub fn set_agent_status(&self, name: &str, status: AgentStatus) -> Result<Agent> {
        self.ensure_agent(name)?;

        let _lock = self.store.lock_agent(name)?;
        let mut state = self.store.read_state(name)?;
        if state.status != status {
            let previous = state.status;
            state.status = status;
            state.updated_at = Utc::now();
            self.store.write_state(name, &state)?;
            tracing::info!(agent = name, from = %previous, to = %status, "Changed agent status");
        } else {
            tracing::debug!(agent = name, status = %status, "Status unchanged");
        }

        let instruction = self.store.read_instruction(name)?;
        Ok(Agent::from_parts(name, instruction, state))
    }

    /// Snapshot a driver takes before starting a run.
    pub fn run_context(&self, name: &str) -> Result<RunContext> {
        let agent = self.get_agent(name)?;
        let history = self.store.read_runs(name)?;

        Ok(RunContext {
            agent_name: agent.name,
            instruction: agent.instruction,
            status: agent.status,
            state_at_start: crate::model::StateSnapshot {
                summary: agent.summary,
                active_issue_count: open_issues(history.iter()).len() as u64,
                run_count: history.len() as u64,
            },
            next_run_id: next_run_id(&history),
        })
    }

    /// Store a completed run and update the agent's counters.
    ///
    /// The manager assigns the run id, the agent name, the start snapshot and
    /// each action's run id; the record is then published before the agent
    /// state, so the state never runs ahead of the history. Counters are
    /// re-derived from the full history each time.
    pub fn record_run(&self, name: &str, mut run: AgentRunLog) -> Result<AgentRunLog> {
        self.ensure_agent(name)?;

        let _lock = self.store.lock_agent(name)?;
        let mut state = self.store.read_state(name)?;
        let history = self.store.read_runs(name)?;

        // state.json may lag the history if a previous record stopped after
        // publishing its run, so counters always come from the history.
        state.run_count = history.len() as u64;
        state.active_issue_count = open_issues(history.iter()).len() as u64;

        run.run_id = next_run_id(&history);
        run.agent_name = name.to_string();
        run.state_at_start = state.snapshot();
        if run.instruction.is_empty() {
            run.instruction = self.store.read_instruction(name)?;
        }
        for action in &mut run.actions {
            action.run = run.run_id;
        }

        self.store.write_run(name, &run)?;

        state.run_count = history.len() as u64 + 1;
        state.active_issue_count =
            open_issues(history.iter().chain(std::iter::once(&run))).len() as u64;
        if let Some(summary) = run.resulting_summary() {
            state.summary = summary;
        }
        state.last_run_at = Some(run.timestamp);
        state.updated_at = Utc::now();
        self.store.write_state(name, &state)?;

        tracing::info!(
            agent = name,
            run_id = run.run_id,
            active_issues = state.active_issue_count,
            "Recorded run"
        );
        Ok(run)
    }

    /// Run history, most recent first, optionally capped at `limit` entries.
    pub fn get_history(&self, name: &str, limit: Option<usize>) -> Result<Vec<AgentRunLog>> {
        self.ensure_agent(name)?;

        let mut runs = self.store.read_runs(name)?;
        runs.reverse();
        if let Some(limit) = limit {
            runs.truncate(limit);
        }
        Ok(runs)
    }

    /// A single run by id.
    pub fn get_run(&self, name: &str, run_id: u64) -> Result<AgentRunLog> {
        self.ensure_agent(name)?;

        self.store
            .read_runs(name)?
            .into_iter()
            .find(|run| run.run_id == run_id)
            .ok_or_else(|| Error::RunNotFound {
                name: name.to_string(),
                run_id,
            })
    }

    fn load_agent(&self, name: &str) -> Result<Agent> {
        let state = self.store.read_state(name)?;
        let instruction = self.store.read_instruction(name)?;
        Ok(Agent::from_parts(name, instruction, state))
    }

    fn ensure_workspace(&self) -> Result<()> {
        let root = self.store.root();
        if root.is_dir() {
            Ok(())
        } else {
            Err(Error::WorkspaceNotFound {
                path: root.to_native(),
            })
        }
    }

    /// Names that could never have been created are reported as missing
    /// rather than looked up, which keeps lookups inside `agents/`.
    fn ensure_agent(&self, name: &str) -> Result<()> {
        self.ensure_workspace()?;
        if validate_path_identifier(name, "Agent name").is_err() || !self.store.has_agent(name) {
            return Err(Error::AgentNotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

fn next_run_id(history: &[AgentRunLog]) -> u64 {
    history.iter().map(|run| run.run_id).max().unwrap_or(0) + 1
}

/// Replay issue changes in run order: created and updated issues are open
/// until a later run resolves them.
fn open_issues<'a>(runs: impl Iterator<Item = &'a AgentRunLog>) -> BTreeSet<String> {
    let mut open = BTreeSet::new();
    for run in runs {
        let changes = &run.state_changes;
        open.extend(changes.created.iter().cloned());
        open.extend(changes.updated.iter().cloned());
        for id in &changes.resolved {
            open.remove(id);
        }
    }
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StateChanges;

    fn run_with(changes: StateChanges) -> AgentRunLog {
        AgentRunLog::new(Utc::now()).with_state_changes(changes)
    }

    #[test]
    fn open_issues_replays_in_order() {
        let runs = vec![
            run_with(StateChanges::default().with_created(["A", "B"])),
            run_with(StateChanges::default().with_resolved(["A"]).with_updated(["C"])),
            run_with(StateChanges::default().with_created(["A"])),
        ];
        let open = open_issues(runs.iter());
        assert_eq!(open.into_iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn resolving_unknown_issue_is_harmless() {
        let runs = vec![run_with(StateChanges::default().with_resolved(["X"]))];
        assert!(open_issues(runs.iter()).is_empty());
    }

    #[test]
    fn next_run_id_starts_at_one() {
        assert_eq!(next_run_id(&[]), 1);
        let mut run = AgentRunLog::new(Utc::now());
        run.run_id = 4;
        assert_eq!(next_run_id(&[run]), 5);
    }
}
