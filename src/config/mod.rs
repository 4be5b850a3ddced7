//! Configuration loading and management

mod io;
mod settings;
mod storage;

pub use settings::Settings;
pub use storage::{StorageBackend, StorageSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where progress and tasks are persisted
    #[serde(default)]
    pub storage: StorageSettings,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Database file used when `storage.path` is not set
    pub fn default_db_path() -> PathBuf {
        Self::global_config_dir().join("questboard.db")
    }

    /// Configured database path with `~` expanded, or the default one
    pub fn db_path(&self) -> PathBuf {
        self.storage
            .path
            .as_deref()
            .map(storage::expand_home)
            .unwrap_or_else(Self::default_db_path)
    }
}
