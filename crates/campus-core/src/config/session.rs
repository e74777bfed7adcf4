//! Local session storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the bearer token and cached user info are persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session file.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Session file name inside `directory`.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl SessionConfig {
    /// Full path of the session file.
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.directory).join(&self.file_name)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: default_file_name(),
        }
    }
}

fn default_directory() -> String {
    "data/session".to_string()
}

fn default_file_name() -> String {
    "session.json".to_string()
}
