//! Storage backend selection

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded database file
    #[default]
    Sqlite,
    /// Nothing survives the process
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file; defaults to `~/.questboard/questboard.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

pub(super) fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parses_lowercase() {
        let s: StorageSettings = toml::from_str("backend = \"memory\"").unwrap();
        assert_eq!(s.backend, StorageBackend::Memory);
        assert!(s.path.is_none());
        assert!(toml::from_str::<StorageSettings>("backend = \"postgres\"").is_err());
    }

    #[test]
    fn test_expand_home_only_touches_tilde_prefix() {
        let abs = Path::new("/var/lib/board.db");
        assert_eq!(expand_home(abs), abs);
        let expanded = expand_home(Path::new("~/board.db"));
        assert!(expanded.ends_with("board.db"));
        assert!(!expanded.starts_with("~"));
    }
}
