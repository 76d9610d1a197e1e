use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::EditorError;

pub const DEFAULT_CONFIG_NAME: &str = "bibworks.config.json";

/// Bibworks configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Coalescing window for successive edits, in milliseconds
    #[serde(default = "default_undo_delay_ms")]
    pub undo_delay_ms: u64,

    /// Record kind given to items created without one
    #[serde(default = "default_kind")]
    pub default_kind: String,
}

fn default_undo_delay_ms() -> u64 {
    500
}

fn default_kind() -> String {
    "article".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when no
    /// config file exists there.
    pub fn load(cwd: &Path) -> Result<Self, EditorError> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    /// The undo delay as a `Duration`.
    pub fn undo_delay(&self) -> Duration {
        Duration::from_millis(self.undo_delay_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_delay_ms: default_undo_delay_ms(),
            default_kind: default_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "undoDelayMs": 250,
            "defaultKind": "book"
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.undo_delay_ms, 250);
        assert_eq!(config.undo_delay(), Duration::from_millis(250));
        assert_eq!(config.default_kind, "book");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "undoDelayMs": 0 }"#).unwrap();
        assert_eq!(config.undo_delay_ms, 0);
        assert_eq!(config.default_kind, "article");
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.undo_delay_ms, 500);
        assert_eq!(config.default_kind, "article");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "undoDelayMs": 42 }"#,
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.undo_delay_ms, 42);

        // Missing file falls back to defaults
        let empty = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(empty.path()).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(matches!(
            EditorConfig::load(dir.path()),
            Err(EditorError::Config(_))
        ));
    }
}
