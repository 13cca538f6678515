//! Configuration types for the SQLite sheet store.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Configuration for the SQLite sheet store.
///
/// # Examples
///
/// ```
/// use intake_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// // In-memory database (default)
/// let config = SqliteConfig::default();
///
/// // File-based database
/// let config = SqliteConfig {
///     database_path: Some(PathBuf::from("consultations.db")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Database file path. If None, uses an in-memory database
    pub database_path: Option<PathBuf>,

    /// Whether to create the database file if it doesn't exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,

    /// How long a writer waits on a locked database before giving up
    #[serde(default = "default_busy_timeout", with = "humantime_serde")]
    pub busy_timeout: Duration,
}

fn default_true() -> bool {
    true
}

fn default_busy_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            busy_timeout: default_busy_timeout(),
        }
    }
}
