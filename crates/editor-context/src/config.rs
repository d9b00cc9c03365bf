//! Backend configuration.

use crate::editor::{Indentation, MAX_DOCUMENT_TEXT_CHARS};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading an [`EditorConfig`].
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    /// The configuration is not valid JSON for this schema.
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// The configuration file could not be read.
    Io(#[from] std::io::Error),
}

/// Settings shared by editor backends.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Cap for truncated document text, in UTF-16 code units.
    pub truncation_limit: usize,
    /// Number of documents kept in the recency window.
    pub history_capacity: usize,
    /// Indentation reported when the host does not say otherwise.
    pub indentation: Indentation,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            truncation_limit: MAX_DOCUMENT_TEXT_CHARS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            indentation: Indentation::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::IndentationKind;

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(
            r#"{ "truncationLimit": 10, "indentation": { "kind": "tab", "size": 1 } }"#,
        )
        .unwrap();
        assert_eq!(config.truncation_limit, 10);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
        assert_eq!(config.indentation.kind, IndentationKind::Tab);
        assert_eq!(config.indentation.size, 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("{ truncationLimit: }"),
            Err(ConfigError::Json(_))
        ));
    }
}
