//! Runtime configuration for the task list.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from optional
//!   overrides with defaults under the user's home directory.
//!
//! # Invariants
//! - Resolved paths are absolute when `home` is absolute.
//! - Relative override paths are anchored at `home`.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = ".tasklist";
const DB_FILE_NAME: &str = "tasklist.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Effective settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Fills unset values with defaults rooted at `home`.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
        home: &Path,
    ) -> Self {
        let app_dir = home.join(APP_DIR_NAME);
        Self {
            db_path: db_path
                .map(|path| anchor(home, path))
                .unwrap_or_else(|| app_dir.join(DB_FILE_NAME)),
            log_dir: log_dir
                .map(|path| anchor(home, path))
                .unwrap_or_else(|| app_dir.join(LOG_DIR_NAME)),
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

/// Home directory from `$HOME`, falling back to the system temp dir.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

fn anchor(home: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        home.join(path)
    }
}
