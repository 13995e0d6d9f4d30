/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for citation rendering.

use thiserror::Error;

/// Result type alias for quarto-refstyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or rendering a citation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested role is not bound to any variant of the style.
    #[error("Role '{role}' is not supported by style '{style}'")]
    UnsupportedRole { role: String, style: String },

    /// An entry lacks a field a fragment needs.
    ///
    /// Variants never return this from `render`: the fragment is omitted
    /// and the problem is logged instead.
    #[error("Entry '{key}' has no usable '{field}' field")]
    MalformedEntry { key: String, field: String },

    /// No style is registered under the requested name.
    #[error("No referencing style registered under '{name}'")]
    StyleNotFound { name: String },

    /// The host could not resolve a citation key.
    #[error("Entry '{key}' not found")]
    EntryNotFound { key: String },

    /// Configuration could not be read.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub(crate) fn malformed(key: &str, field: &str) -> Self {
        Error::MalformedEntry {
            key: key.to_string(),
            field: field.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_role_display() {
        let err = Error::UnsupportedRole {
            role: "nonexistent-role".to_string(),
            style: "author_year_round_custom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Role 'nonexistent-role' is not supported by style 'author_year_round_custom'"
        );
    }

    #[test]
    fn test_malformed_entry_display() {
        let err = Error::malformed("smith2020", "year");
        assert_eq!(err.to_string(), "Entry 'smith2020' has no usable 'year' field");
    }

    #[test]
    fn test_yaml_error_becomes_config_error() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("a: [").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::Config { .. }), "Got: {:?}", err);
    }
}
