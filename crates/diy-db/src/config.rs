//! Database configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the project database lives and how connections behave.
///
/// Passed to [`ConnectionProvider`](crate::connection::ConnectionProvider) at
/// construction; nothing in this crate reads connection settings from global
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created on first use.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("projects.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DbConfig {
    /// Config for the database at `path` with default timeouts.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
