/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Style and host configuration.
//!
//! [`StyleConfig`] holds every knob of the author-year style. Its defaults
//! are the house style: round brackets everywhere, no comma between author
//! and year, and a plain (non-italic) " et al.".
//!
//! [`HostConfig`] is what a document build reads from its YAML config: the
//! name of the referencing style to use and optional style overrides.
//!
//! ```yaml
//! bibtex_reference_style: author_year_round_custom
//! refstyle:
//!   person:
//!     et-al-min: 2
//!   post-text-sep: "; "
//! ```

use crate::bracket::BracketSpec;
use crate::error::{Error, Result};
use crate::person::PersonNameStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleConfig {
    /// Brackets around the year in `Author (Year)`.
    pub bracket_textual: BracketSpec,
    /// Brackets around `(Author Year)`.
    pub bracket_parenthetical: BracketSpec,
    pub bracket_author: BracketSpec,
    pub bracket_label: BracketSpec,
    pub bracket_year: BracketSpec,
    pub person: PersonNameStyle,
    /// Between author and year in `(Author Year)`.
    pub author_year_sep: String,
    /// Between author and `(Year)` in textual citations.
    pub text_reference_sep: String,
    pub pre_text_sep: String,
    pub post_text_sep: String,
    /// Between items of a multi-entry citation.
    pub citation_sep: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            bracket_textual: BracketSpec::round(),
            bracket_parenthetical: BracketSpec::round(),
            bracket_author: BracketSpec::round(),
            bracket_label: BracketSpec::round(),
            bracket_year: BracketSpec::round(),
            person: PersonNameStyle::default(),
            author_year_sep: " ".to_string(),
            text_reference_sep: " ".to_string(),
            pre_text_sep: " ".to_string(),
            post_text_sep: ", ".to_string(),
            citation_sep: "; ".to_string(),
        }
    }
}

impl StyleConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Referencing settings of a document build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Registered style name. Matched exactly and case-sensitively.
    #[serde(rename = "bibtex_reference_style", alias = "reference-style")]
    pub reference_style: String,

    #[serde(default)]
    pub refstyle: StyleConfig,
}

impl HostConfig {
    pub fn new(reference_style: impl Into<String>) -> Self {
        Self {
            reference_style: reference_style.into(),
            refstyle: StyleConfig::default(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_house_style() {
        let config = StyleConfig::default();
        assert_eq!(config.author_year_sep, " ");
        assert_eq!(config.bracket_parenthetical, BracketSpec::round());
        assert!(!config.person.emphasize_other);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = StyleConfig::from_yaml_str(
            "bracket-parenthetical:\n  left: '['\n  right: ']'\nperson:\n  et-al-min: 2\n",
        )
        .unwrap();
        assert_eq!(config.bracket_parenthetical, BracketSpec::square());
        assert_eq!(config.person.et_al_min, 2);
        assert_eq!(config.person.other, " et al.");
        assert_eq!(config.post_text_sep, ", ");
    }

    #[test]
    fn test_host_config() {
        let host = HostConfig::from_yaml_str(
            "bibtex_reference_style: author_year_round_custom\nrefstyle:\n  citation-sep: ', '\n",
        )
        .unwrap();
        assert_eq!(host.reference_style, "author_year_round_custom");
        assert_eq!(host.refstyle.citation_sep, ", ");
    }

    #[test]
    fn test_host_config_requires_style_name() {
        let err = HostConfig::from_yaml_str("refstyle: {}\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "Got: {:?}", err);
    }

    #[test]
    fn test_host_config_from_missing_file() {
        let err = HostConfig::from_file(Path::new("/nonexistent/_config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"), "Got: {}", err);
    }
}
