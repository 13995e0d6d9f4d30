/*
 * bracket.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Bracket delimiters shared by style variants.

use crate::output::Output;
use serde::{Deserialize, Serialize};

/// A pair of delimiter strings, e.g. `(` and `)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSpec {
    pub left: String,
    pub right: String,
}

impl BracketSpec {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Round parentheses.
    pub fn round() -> Self {
        Self::new("(", ")")
    }

    /// Square brackets.
    pub fn square() -> Self {
        Self::new("[", "]")
    }

    /// Enclose `content` in the delimiters.
    ///
    /// Content without visible text is returned unbracketed, so a bare `()`
    /// is never produced.
    pub fn wrap(&self, content: Output) -> Output {
        if content.render().is_empty() {
            return content;
        }
        Output::sequence(vec![
            Output::literal(self.left.as_str()),
            content,
            Output::literal(self.right.as_str()),
        ])
    }
}

impl Default for BracketSpec {
    fn default() -> Self {
        Self::round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_wrap() {
        let out = BracketSpec::round().wrap(Output::literal("2020"));
        assert_eq!(out.render(), "(2020)");
    }

    #[test]
    fn test_wrap_null_is_null() {
        assert!(BracketSpec::square().wrap(Output::Null).is_null());
    }

    #[test]
    fn test_wrap_keeps_invisible_link_unbracketed() {
        let link = Output::linked("k", vec![]);
        assert_eq!(BracketSpec::round().wrap(link.clone()), link);
    }

    #[test]
    fn test_deserialize() {
        let spec: BracketSpec = serde_yaml::from_str("left: '['\nright: ']'").unwrap();
        assert_eq!(spec, BracketSpec::square());
    }
}
