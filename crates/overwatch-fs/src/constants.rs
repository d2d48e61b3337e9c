//! Names of the files and directories that make up a workspace on disk.

use std::path::Path;

/// Standard workspace filesystem entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPath {
    /// The `agents` directory holding one subdirectory per agent
    AgentsDir,
    /// The `instruction.md` file (written once at creation)
    Instruction,
    /// The `state.json` file (status and counters)
    State,
    /// The `runs` directory (one JSON file per completed run)
    RunsDir,
    /// The `.lock` file used to serialize writers for one agent
    LockFile,
    /// The `overwatch.toml` workspace configuration file
    WorkspaceConfig,
}

impl AgentPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgentsDir => "agents",
            Self::Instruction => "instruction.md",
            Self::State => "state.json",
            Self::RunsDir => "runs",
            Self::LockFile => ".lock",
            Self::WorkspaceConfig => "overwatch.toml",
        }
    }
}

impl AsRef<Path> for AgentPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for AgentPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for AgentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
