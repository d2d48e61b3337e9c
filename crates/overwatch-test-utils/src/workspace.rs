//! [`TestWorkspace`]: a temporary workspace root for agent store tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace directory with helpers for writing raw files
/// (including deliberately corrupt ones) and asserting on the layout.
///
/// # Example
///
/// ```rust,no_run
/// use overwatch_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_file("overwatch.toml", "[history]\ndefault_limit = 3\n");
/// ws.assert_file_exists("overwatch.toml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the workspace root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A path inside the workspace that does not exist.
    pub fn missing_root(&self) -> PathBuf {
        self.root().join("does-not-exist")
    }

    /// Path of `agents/<name>`.
    pub fn agent_dir(&self, name: &str) -> PathBuf {
        self.root().join("agents").join(name)
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read a file relative to the root.
    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    /// Names of the run files of an agent, sorted.
    pub fn run_files(&self, agent: &str) -> Vec<String> {
        let dir = self.agent_dir(agent).join("runs");
        let mut names: Vec<String> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .filter(|n| n.ends_with(".json"))
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Assert that a file exists relative to the root.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.root().join(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that a path does not exist relative to the root.
    pub fn assert_missing(&self, relative: &str) {
        let path = self.root().join(relative);
        assert!(!path.exists(), "Expected path to be absent: {}", path.display());
    }
}
