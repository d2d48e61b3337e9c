//! Workspace configuration parsed from `overwatch.toml`
//!
//! The file is optional; a workspace without one uses the defaults below.
//!
//! ```toml
//! [history]
//! default_limit = 10
//!
//! [locking]
//! timeout_ms = 5000
//! fsync = true
//! ```

use std::time::Duration;

use overwatch_fs::{AgentPath, ConfigStore, NormalizedPath, RobustnessConfig};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_timeout_ms() -> u64 {
    5000
}

fn default_fsync() -> bool {
    true
}

/// History display settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySection {
    /// Number of runs shown when no explicit limit is given; `None` shows all
    #[serde(default)]
    pub default_limit: Option<usize>,
}

/// Lock and write durability settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockingSection {
    /// Total time spent retrying a contended agent lock
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether writes are fsynced before being published
    #[serde(default = "default_fsync")]
    pub fsync: bool,
}

impl Default for LockingSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            fsync: default_fsync(),
        }
    }
}

/// Parsed `overwatch.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub history: HistorySection,

    #[serde(default)]
    pub locking: LockingSection,
}

impl WorkspaceConfig {
    /// Parse a configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidState {
            path: AgentPath::WorkspaceConfig.as_str().into(),
            message: e.to_string(),
        })
    }

    /// Load `overwatch.toml` from a workspace root, or defaults if absent
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(AgentPath::WorkspaceConfig.as_str());
        let loaded = ConfigStore::new()
            .load_optional::<Self>(&path)
            .map_err(Error::from_load)?;

        match loaded {
            Some(config) => {
                tracing::debug!(path = %path, "Loaded workspace config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// I/O settings derived from the `[locking]` section
    pub fn robustness(&self) -> RobustnessConfig {
        RobustnessConfig {
            lock_timeout: Duration::from_millis(self.locking.timeout_ms),
            enable_fsync: self.locking.fsync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = WorkspaceConfig::parse("").unwrap();
        assert_eq!(config, WorkspaceConfig::default());
        assert_eq!(config.robustness().lock_timeout, Duration::from_millis(5000));
        assert!(config.robustness().enable_fsync);
    }

    #[test]
    fn sections_are_parsed() {
        let config = WorkspaceConfig::parse(
            "[history]\ndefault_limit = 5\n\n[locking]\ntimeout_ms = 250\nfsync = false\n",
        )
        .unwrap();
        assert_eq!(config.history.default_limit, Some(5));
        assert_eq!(config.robustness().lock_timeout, Duration::from_millis(250));
        assert!(!config.robustness().enable_fsync);
    }

    #[test]
    fn malformed_config_is_invalid_state() {
        let err = WorkspaceConfig::parse("[history\n").unwrap_err();
        assert!(matches!(err, Error::InvalidState { .. }));
    }
}
