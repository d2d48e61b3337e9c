//! Workspace resolution
//!
//! Commands operate on the directory given by `--workspace` (or
//! `OVERWATCH_WORKSPACE`), falling back to the current directory. The
//! optional `overwatch.toml` found there is loaded once per invocation.

use std::path::{Path, PathBuf};

use overwatch_core::{AgentContextManager, WorkspaceConfig};
use overwatch_fs::NormalizedPath;

use crate::error::Result;

/// A resolved workspace and its settings
#[derive(Debug, Clone)]
pub struct Workspace {
    root: NormalizedPath,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Resolve the workspace root and load its config.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let root: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };
        Self::at(root)
    }

    /// Bind to a known root directory.
    pub fn at(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let config = WorkspaceConfig::load(&root)?;
        tracing::debug!(root = %root, "Resolved workspace");
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Context manager bound to this workspace.
    pub fn manager(&self) -> AgentContextManager {
        AgentContextManager::with_config(self.root.clone(), &self.config)
    }
}
