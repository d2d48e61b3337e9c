//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning for lock acquisition and durability of writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying a contended lock before giving up
    pub lock_timeout: Duration,
    /// Whether to fsync the temp file before publishing it
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// An exclusive advisory lock on a lock file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire an exclusive lock on `path`, creating the file if needed.
    ///
    /// Contended locks are retried with exponential backoff until
    /// `config.lock_timeout` has elapsed, then fail with `LockFailed`.
    pub fn acquire(path: &NormalizedPath, config: RobustnessConfig) -> Result<Self> {
        let native_path = path.to_native();
        if let Some(parent) = native_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&native_path)
            .map_err(|e| Error::io(&native_path, e))?;

        let policy = ExponentialBackoff {
            initial_interval: Duration::from_millis(5),
            max_interval: Duration::from_millis(200),
            max_elapsed_time: Some(config.lock_timeout),
            ..ExponentialBackoff::default()
        };

        backoff::retry(policy, || {
            file.try_lock_exclusive().map_err(backoff::Error::transient)
        })
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

        tracing::debug!(path = %native_path.display(), "Acquired lock");
        Ok(Self {
            file,
            path: native_path,
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release lock");
        }
    }
}

/// Publish content to a file via write-to-temp-then-rename.
///
/// Readers see either the old content or the new content, never a prefix.
/// Takes no lock; callers that need to serialize writers hold a [`FileLock`].
pub fn publish_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let result = write_temp(&temp_path, content, config.enable_fsync)
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    tracing::debug!(path = %native_path.display(), bytes = content.len(), "Published file atomically");
    Ok(())
}

fn write_temp(temp_path: &Path, content: &[u8], fsync: bool) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// List the names of entries in a directory, sorted lexically.
///
/// A missing directory yields an empty list.
pub fn list_entries(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native_dir = dir.to_native();
    let read_dir = match fs::read_dir(&native_dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(&native_dir, e)),
    };

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn publish_atomic_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("state.json"));

        publish_atomic(&path, b"{}", RobustnessConfig::default()).unwrap();

        let names = list_entries(&NormalizedPath::new(dir.path())).unwrap();
        assert!(
            names.iter().all(|n| !n.ends_with(".tmp")),
            "Temporary file should be cleaned up, found: {:?}",
            names
        );
    }

    #[test]
    fn list_entries_of_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let missing = NormalizedPath::new(dir.path().join("nope"));
        assert!(list_entries(&missing).unwrap().is_empty());
    }
}
