//! Agent store: the on-disk representation of agents
//!
//! ```text
//! <workspace>/agents/<name>/instruction.md
//! <workspace>/agents/<name>/state.json
//! <workspace>/agents/<name>/runs/<runId:06>-<timestamp>.json
//! <workspace>/agents/<name>/.lock
//! ```
//!
//! The store knows how files are named, read and published. It enforces no
//! business rules; see [`crate::AgentContextManager`] for those.

use std::fs;

use chrono::{DateTime, Utc};
use overwatch_fs::{AgentPath, ConfigStore, FileLock, NormalizedPath, RobustnessConfig, io};

use crate::model::{AgentRunLog, AgentState};
use crate::{Error, Result};

/// Timestamp format embedded in run file names
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%3fZ";

/// File-level access to the agents of one workspace.
#[derive(Debug, Clone)]
pub struct AgentStore {
    /// Workspace root
    root: NormalizedPath,
    /// `<root>/agents`
    agents_dir: NormalizedPath,
    /// Serializer for state and run documents
    documents: ConfigStore,
}

impl AgentStore {
    /// Create a store for the workspace at `root`.
    pub fn new(root: NormalizedPath, robustness: RobustnessConfig) -> Self {
        let agents_dir = root.join(AgentPath::AgentsDir.as_str());
        Self {
            root,
            agents_dir,
            documents: ConfigStore::with_robustness(robustness),
        }
    }

    /// Workspace root
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Directory holding one subdirectory per agent
    pub fn agents_dir(&self) -> &NormalizedPath {
        &self.agents_dir
    }

    pub fn agent_dir(&self, name: &str) -> NormalizedPath {
        self.agents_dir.join(name)
    }

    pub fn instruction_path(&self, name: &str) -> NormalizedPath {
        self.agent_dir(name).join(AgentPath::Instruction.as_str())
    }

    pub fn state_path(&self, name: &str) -> NormalizedPath {
        self.agent_dir(name).join(AgentPath::State.as_str())
    }

    pub fn runs_dir(&self, name: &str) -> NormalizedPath {
        self.agent_dir(name).join(AgentPath::RunsDir.as_str())
    }

    /// True when an agent directory (complete or not) occupies `name`.
    pub fn agent_dir_exists(&self, name: &str) -> bool {
        self.agent_dir(name).exists()
    }

    /// True when `name` has a published state record.
    pub fn has_agent(&self, name: &str) -> bool {
        self.state_path(name).is_file()
    }

    /// Names of agent directories, sorted lexically.
    ///
    /// Hidden entries (staging directories, lock files) are skipped.
    pub fn list_agent_names(&self) -> Result<Vec<String>> {
        let names = io::list_entries(&self.agents_dir)?;
        Ok(names
            .into_iter()
            .filter(|name| !name.starts_with('.'))
            .filter(|name| self.agent_dir(name).is_dir())
            .collect())
    }

    /// Exclusive lock serializing writers of one agent.
    pub fn lock_agent(&self, name: &str) -> Result<FileLock> {
        let path = self.agent_dir(name).join(AgentPath::LockFile.as_str());
        Ok(FileLock::acquire(&path, self.documents.robustness())?)
    }

    /// Exclusive lock serializing agent creation across the workspace.
    pub fn lock_workspace(&self) -> Result<FileLock> {
        let path = self.agents_dir.join(AgentPath::LockFile.as_str());
        Ok(FileLock::acquire(&path, self.documents.robustness())?)
    }

    pub fn read_instruction(&self, name: &str) -> Result<String> {
        Ok(io::read_text(&self.instruction_path(name))?)
    }

    pub fn read_state(&self, name: &str) -> Result<AgentState> {
        self.documents
            .load(&self.state_path(name))
            .map_err(Error::from_load)
    }

    pub fn write_state(&self, name: &str, state: &AgentState) -> Result<()> {
        self.documents.save(&self.state_path(name), state)?;
        tracing::debug!(agent = name, status = %state.status, "Wrote agent state");
        Ok(())
    }

    /// Build a complete agent directory under a hidden name, then rename it
    /// into place so the agent appears all at once.
    ///
    /// The caller holds the workspace lock and has checked that `name` is free.
    pub fn materialize_agent(&self, name: &str, instruction: &str, state: &AgentState) -> Result<()> {
        let staging = self
            .agents_dir
            .join(&format!(".{}.{}.staging", name, std::process::id()));
        let staging_native = staging.to_native();

        if staging.exists() {
            fs::remove_dir_all(&staging_native)
                .map_err(|e| overwatch_fs::Error::io(&staging_native, e))?;
        }

        let result = self.populate(&staging, instruction, state).and_then(|()| {
            let target = self.agent_dir(name).to_native();
            fs::rename(&staging_native, &target)
                .map_err(|e| Error::from(overwatch_fs::Error::io(&target, e)))
        });

        if result.is_err() {
            let _ = fs::remove_dir_all(&staging_native);
        }
        result
    }

    fn populate(&self, dir: &NormalizedPath, instruction: &str, state: &AgentState) -> Result<()> {
        let runs = dir.join(AgentPath::RunsDir.as_str()).to_native();
        fs::create_dir_all(&runs).map_err(|e| overwatch_fs::Error::io(&runs, e))?;

        io::publish_atomic(
            &dir.join(AgentPath::Instruction.as_str()),
            instruction.as_bytes(),
            self.documents.robustness(),
        )?;
        self.documents
            .save(&dir.join(AgentPath::State.as_str()), state)?;
        Ok(())
    }

    /// File name for a run record.
    ///
    /// The zero-padded run id comes first so lexical order is run order.
    pub fn run_file_name(run_id: u64, timestamp: DateTime<Utc>) -> String {
        format!("{:06}-{}.json", run_id, timestamp.format(RUN_TIMESTAMP_FORMAT))
    }

    /// Paths of all run records of an agent, in lexical order.
    pub fn list_run_files(&self, name: &str) -> Result<Vec<NormalizedPath>> {
        let runs_dir = self.runs_dir(name);
        let names = io::list_entries(&runs_dir)?;
        Ok(names
            .into_iter()
            .filter(|n| !n.starts_with('.') && n.ends_with(".json"))
            .map(|n| runs_dir.join(&n))
            .collect())
    }

    pub fn read_run(&self, path: &NormalizedPath) -> Result<AgentRunLog> {
        self.documents.load(path).map_err(Error::from_load)
    }

    /// All run records of an agent, sorted by ascending run id.
    pub fn read_runs(&self, name: &str) -> Result<Vec<AgentRunLog>> {
        let mut runs = self
            .list_run_files(name)?
            .iter()
            .map(|path| self.read_run(path))
            .collect::<Result<Vec<_>>>()?;
        runs.sort_by_key(|run| run.run_id);
        Ok(runs)
    }

    /// Publish a run record. Returns the path it was written to.
    pub fn write_run(&self, name: &str, run: &AgentRunLog) -> Result<NormalizedPath> {
        let path = self
            .runs_dir(name)
            .join(&Self::run_file_name(run.run_id, run.timestamp));
        self.documents.save(&path, run)?;
        tracing::debug!(agent = name, run_id = run.run_id, path = %path, "Wrote run record");
        Ok(path)
    }
}
