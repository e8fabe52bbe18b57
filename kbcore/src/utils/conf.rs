use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{KbError, KbResult};

/// Container used to configure the creation of a
/// [`KnowledgeBase`](crate::knowledge::KnowledgeBase).
///
/// Every field has a default, so a configuration file only needs to mention
/// the settings it changes:
///
/// ```
/// use kbcore::utils::conf::KnowledgeBaseCreateInfo;
///
/// let info = KnowledgeBaseCreateInfo::from_toml_str("trace_cascade = true", "<inline>").unwrap();
/// assert!(info.trace_cascade);
/// assert!(info.reject_missing_values);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseCreateInfo {
    /// Number of derivation attempts to reserve room for up front.
    pub initial_capacity: usize,
    /// Reject theorems, metadata and assumptions reporting themselves as missing.
    pub reject_missing_values: bool,
    /// Emit a `trace!` record for every assumption discharged by the cascade.
    pub trace_cascade: bool,
}

impl Default for KnowledgeBaseCreateInfo {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            reject_missing_values: true,
            trace_cascade: false,
        }
    }
}

impl KnowledgeBaseCreateInfo {
    /// Parses a configuration from TOML source. `file` is only used in error messages.
    pub fn from_toml_str(source: &str, file: &str) -> KbResult<Self> {
        toml::from_str(source).map_err(|e| KbError::ConfigParseError {
            source: e,
            file: file.to_string(),
        })
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> KbResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let info = KnowledgeBaseCreateInfo::from_toml_str("", "<empty>").unwrap();
        assert_eq!(info, KnowledgeBaseCreateInfo::default());
    }

    #[test]
    fn partial_source_overrides_only_listed_fields() {
        let info = KnowledgeBaseCreateInfo::from_toml_str(
            "initial_capacity = 128\nreject_missing_values = false\n",
            "<inline>",
        )
        .unwrap();
        assert_eq!(info.initial_capacity, 128);
        assert!(!info.reject_missing_values);
        assert!(!info.trace_cascade);
    }

    #[test]
    fn malformed_source_reports_file() {
        let err = KnowledgeBaseCreateInfo::from_toml_str("initial_capacity = \"many\"", "kb.toml")
            .unwrap_err();
        match err {
            KbError::ConfigParseError { file, .. } => assert_eq!(file, "kb.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = KnowledgeBaseCreateInfo::from_path("/definitely/not/here/kb.toml").unwrap_err();
        assert!(matches!(err, KbError::IoError(_)));
    }
}
