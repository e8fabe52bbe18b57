use std::path::{Path, PathBuf};

use kbcore::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read '{file}': {source}")]
    Io {
        source: std::io::Error,
        file: PathBuf,
    },

    #[error("Failed to parse derivation file '{file}': {source}")]
    Parse {
        source: toml::de::Error,
        file: PathBuf,
    },

    #[error(transparent)]
    KnowledgeBase(#[from] KbError),
}

/// One `[[derivation]]` table of the input file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DerivationEntry {
    pub theorem: String,
    pub rule: String,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DerivationFile {
    #[serde(default, rename = "derivation")]
    pub derivations: Vec<DerivationEntry>,
}

impl DerivationFile {
    pub fn parse(source: &str, file: &Path) -> Result<Self, CliError> {
        toml::from_str(source).map_err(|source| CliError::Parse {
            source,
            file: file.to_path_buf(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            source,
            file: path.to_path_buf(),
        })?;
        Self::parse(&source, path)
    }

    /// Replays every derivation, in file order, into `kb`.
    pub fn replay(self, kb: &mut KnowledgeBase<String, String>) -> Result<Vec<String>, CliError> {
        let mut newly_proven = Vec::new();
        for entry in self.derivations {
            newly_proven.extend(kb.add_derivation(entry.theorem, entry.rule, entry.assumptions)?);
        }
        Ok(newly_proven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[derivation]]
theorem = "T1"
rule = "ruleA"

[[derivation]]
theorem = "T2"
rule = "ruleB"
assumptions = ["T1", "T3"]

[[derivation]]
theorem = "T3"
rule = "ruleC"
assumptions = []
"#;

    #[test]
    fn sample_file_replays_into_a_knowledge_base() {
        let file = DerivationFile::parse(SAMPLE, Path::new("sample.toml")).unwrap();
        assert_eq!(file.derivations.len(), 3);
        assert!(file.derivations[0].assumptions.is_empty());

        let mut kb = KnowledgeBase::new();
        let newly = file.replay(&mut kb).unwrap();
        assert_eq!(newly, vec!["T1", "T3", "T2"]);
        assert_eq!(kb.get_proof(&"T2".to_string()).unwrap().data(), "ruleB");
    }

    #[test]
    fn empty_theorem_is_rejected_on_replay() {
        let file = DerivationFile::parse(
            "[[derivation]]\ntheorem = \"\"\nrule = \"r\"\n",
            Path::new("bad.toml"),
        )
        .unwrap();
        let mut kb = KnowledgeBase::new();
        let err = file.replay(&mut kb).unwrap_err();
        assert!(matches!(err, CliError::KnowledgeBase(e) if e.is_invalid_argument()));
    }

    #[test]
    fn missing_rule_is_a_parse_error() {
        let err = DerivationFile::parse("[[derivation]]\ntheorem = \"T\"\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
    }
}
