//! Error types for overwatch-core

use std::path::PathBuf;

/// Result type for overwatch-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in overwatch-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Workspace root directory does not exist
    #[error("Workspace not found at {path}")]
    WorkspaceNotFound { path: PathBuf },

    /// No agent with this name exists in the workspace
    #[error("Agent '{name}' not found")]
    AgentNotFound { name: String },

    /// The agent exists but has no run with this id
    #[error("Run #{run_id} not found for agent '{name}'")]
    RunNotFound { name: String, run_id: u64 },

    /// An agent with this name already exists
    #[error("Agent '{name}' already exists")]
    AlreadyExists { name: String },

    /// Agent name is not usable as a directory name
    #[error("Invalid agent name: {message}")]
    InvalidName { message: String },

    /// Persisted state or run record could not be parsed
    #[error("Invalid state at {path}: {message}")]
    InvalidState { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from overwatch-fs
    #[error(transparent)]
    Fs(#[from] overwatch_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for `WorkspaceNotFound`, `AgentNotFound` and `RunNotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkspaceNotFound { .. } | Self::AgentNotFound { .. } | Self::RunNotFound { .. }
        )
    }

    /// True for `AlreadyExists`.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Map a load failure to `InvalidState` when the file was unparseable.
    pub(crate) fn from_load(err: overwatch_fs::Error) -> Self {
        match err {
            overwatch_fs::Error::ConfigParse { path, message, .. } => {
                Self::InvalidState { path, message }
            }
            other => Self::Fs(other),
        }
    }
}
