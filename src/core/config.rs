/// Realiser configuration: house-style switches and lexicon sources, kept in RON.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::language::Language;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Whether English subordinate clauses get an explicit "that".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComplementiserPolicy {
    #[default]
    Always,
    /// Drop "that" unless the clause asks for one with `Feature::Complementiser`.
    Never,
}

/// An extra lexicon file merged over the built-in lexicon of a language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconSource {
    pub language: Language,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealiserConfig {
    /// Language of factories created without an explicit one.
    pub language: Language,
    pub lexicons: Vec<LexiconSource>,
    /// Capitalise the first letter of realised sentences.
    pub capitalise: bool,
    /// Close realised sentences with "." or "?".
    pub punctuate: bool,
    pub complementiser: ComplementiserPolicy,
    /// Put a comma after a clause's cue phrase.
    pub cue_phrase_comma: bool,
}

impl Default for RealiserConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            lexicons: Vec::new(),
            capitalise: true,
            punctuate: true,
            complementiser: ComplementiserPolicy::Always,
            cue_phrase_comma: true,
        }
    }
}

impl RealiserConfig {
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = RealiserConfig::parse_ron("(language: French, punctuate: false)").unwrap();
        assert_eq!(config.language, Language::French);
        assert!(!config.punctuate);
        assert!(config.capitalise);
        assert_eq!(config.complementiser, ComplementiserPolicy::Always);
    }

    #[test]
    fn lexicon_sources_parse() {
        let config = RealiserConfig::parse_ron(
            r#"(lexicons: [(language: English, path: "extra.ron")], complementiser: Never)"#,
        )
        .unwrap();
        assert_eq!(config.lexicons.len(), 1);
        assert_eq!(config.lexicons[0].path, PathBuf::from("extra.ron"));
        assert_eq!(config.complementiser, ComplementiserPolicy::Never);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            RealiserConfig::parse_ron("(language: Klingon)"),
            Err(ConfigError::Ron(_))
        ));
    }
}
