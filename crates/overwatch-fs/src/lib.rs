//! Filesystem layer for Overwatch
//!
//! Provides normalized path handling, identifier validation, and safe I/O:
//! every write goes through a temp file and an atomic rename so readers never
//! observe a half-written file, and writers serialize on an advisory lock.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::AgentPath;
pub use error::{Error, Result};
pub use io::{FileLock, RobustnessConfig};
pub use path::{NormalizedPath, validate_path_identifier};
