/*
 * person.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Person-name list formatting.
//!
//! Names render in sort order (`Family, Given`). In abbreviated mode given
//! names are reduced to initials; in full mode they are kept as written.
//! Long lists are elided to their first names followed by a marker such as
//! " et al.".

use crate::entry::Name;
use crate::output::Output;
use serde::{Deserialize, Serialize};

/// How a list of names is joined and elided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PersonNameStyle {
    /// Separator between names in lists of three or more.
    pub sep: String,
    /// Separator when there are exactly two names.
    pub sep2: String,
    /// Separator before the last name in lists of three or more.
    pub last_sep: String,
    /// Elision marker appended after a truncated list.
    pub other: String,
    /// Render the elision marker emphasized.
    pub emphasize_other: bool,
    /// Truncate lists with at least this many names.
    pub et_al_min: usize,
    /// Number of names kept when truncating.
    pub et_al_use_first: usize,
}

impl Default for PersonNameStyle {
    fn default() -> Self {
        Self {
            sep: ", ".to_string(),
            sep2: " and ".to_string(),
            last_sep: ", and ".to_string(),
            other: " et al.".to_string(),
            emphasize_other: false,
            et_al_min: 3,
            et_al_use_first: 1,
        }
    }
}

impl PersonNameStyle {
    /// Keep at most `cutoff` names; longer lists are elided.
    pub fn with_cutoff(cutoff: usize) -> Self {
        let cutoff = cutoff.max(1);
        Self {
            et_al_min: cutoff + 1,
            et_al_use_first: cutoff,
            ..Default::default()
        }
    }

    /// Format a list of names.
    ///
    /// `full` keeps given names unabbreviated. An empty list yields
    /// [`Output::Null`].
    pub fn format_names(&self, names: &[Name], full: bool) -> Output {
        let truncated = names.len() >= self.et_al_min && self.et_al_use_first < names.len();
        let shown = if truncated {
            &names[..self.et_al_use_first.max(1)]
        } else {
            names
        };

        let formatted: Vec<String> = shown
            .iter()
            .map(|n| format_name(n, full))
            .filter(|s| !s.is_empty())
            .collect();
        if formatted.is_empty() {
            return Output::Null;
        }

        let joined = match formatted.as_slice() {
            [only] => only.clone(),
            [first, second] if !truncated => format!("{}{}{}", first, self.sep2, second),
            [init @ .., last] if !truncated => {
                format!("{}{}{}", init.join(self.sep.as_str()), self.last_sep, last)
            }
            all => all.join(self.sep.as_str()),
        };

        if !truncated {
            return Output::literal(joined);
        }

        let marker = if self.emphasize_other {
            emphasize_marker(&self.other)
        } else {
            Output::literal(self.other.as_str())
        };
        Output::sequence(vec![Output::literal(joined), marker])
    }
}

/// Keep leading whitespace outside the emphasis: " *et al.*".
fn emphasize_marker(marker: &str) -> Output {
    let trimmed = marker.trim_start();
    let leading = &marker[..marker.len() - trimmed.len()];
    Output::sequence(vec![
        Output::literal(leading),
        Output::emph(vec![Output::literal(trimmed)]),
    ])
}

/// Format one name as `Family, Given`.
pub fn format_name(name: &Name, full: bool) -> String {
    if let Some(ref literal) = name.literal {
        return literal.clone();
    }

    let family = name.family_with_particle();
    let given = name.given.as_deref().map(|g| {
        if full {
            g.to_string()
        } else {
            initialize(g)
        }
    });
    let given = match (given, name.dropping_particle.as_deref()) {
        (Some(g), Some(p)) => Some(format!("{} {}", g, p)),
        (None, Some(p)) => Some(p.to_string()),
        (g, None) => g,
    };

    let mut result = match given {
        Some(g) if family.is_empty() => g,
        Some(g) => format!("{}, {}", family, g),
        None => family,
    };
    if let Some(ref suffix) = name.suffix {
        if !result.is_empty() {
            result.push_str(", ");
            result.push_str(suffix);
        }
    }
    result
}

/// Reduce given names to initials ("John William" → "J. W.",
/// "Jean-Paul" → "J.-P.").
fn initialize(given: &str) -> String {
    given
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .filter_map(|part| part.chars().next())
                .map(|c| format!("{}.", c.to_uppercase()))
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<Name> {
        list.iter().map(|s| Name::parse(s)).collect()
    }

    #[test]
    fn test_initialize_name() {
        assert_eq!(initialize("John William"), "J. W.");
        assert_eq!(initialize("Jean-Paul"), "J.-P.");
        assert_eq!(initialize("J."), "J.");
    }

    #[test]
    fn test_format_name_modes() {
        let name = Name::parse("Smith, John");
        assert_eq!(format_name(&name, true), "Smith, John");
        assert_eq!(format_name(&name, false), "Smith, J.");
    }

    #[test]
    fn test_format_name_particles_and_suffix() {
        assert_eq!(
            format_name(&Name::parse("Ludwig van Beethoven"), true),
            "Beethoven, Ludwig van"
        );
        assert_eq!(
            format_name(&Name::parse("van Gogh, Jr, Vincent"), false),
            "van Gogh, V., Jr"
        );
    }

    #[test]
    fn test_literal_is_never_abbreviated() {
        let name = Name::literal("World Health Organization");
        assert_eq!(format_name(&name, false), "World Health Organization");
    }

    #[test]
    fn test_two_names() {
        let style = PersonNameStyle::default();
        let out = style.format_names(&names(&["Smith, J.", "Doe, A."]), false);
        assert_eq!(out.render(), "Smith, J. and Doe, A.");
    }

    #[test]
    fn test_default_elides_three_names() {
        let style = PersonNameStyle::default();
        let out = style.format_names(&names(&["Smith, J.", "Doe, A.", "Roe, B."]), true);
        assert_eq!(out.render(), "Smith, J. et al.");
    }

    #[test]
    fn test_no_elision_lists_all_names() {
        let style = PersonNameStyle {
            et_al_min: 10,
            ..Default::default()
        };
        let out = style.format_names(&names(&["Smith, J.", "Doe, A.", "Roe, B."]), true);
        assert_eq!(out.render(), "Smith, J., Doe, A., and Roe, B.");
    }

    #[test]
    fn test_cutoff_truncates_to_first_author() {
        let style = PersonNameStyle::with_cutoff(1);
        let authors = names(&["Smith, J.", "Doe, A.", "Roe, B.", "Poe, C.", "Low, D."]);
        let out = style.format_names(&authors, true);
        assert_eq!(out.render(), "Smith, J. et al.");
        assert!(!format!("{:?}", out).contains("Emph"));
    }

    #[test]
    fn test_cutoff_two_keeps_two_names() {
        let style = PersonNameStyle::with_cutoff(2);
        let authors = names(&["Smith, J.", "Doe, A.", "Roe, B."]);
        assert_eq!(style.format_names(&authors, true).render(), "Smith, J., Doe, A. et al.");
        assert_eq!(
            style.format_names(&authors[..2], true).render(),
            "Smith, J. and Doe, A."
        );
    }

    #[test]
    fn test_emphasized_marker() {
        let style = PersonNameStyle {
            emphasize_other: true,
            ..Default::default()
        };
        let out = style.format_names(&names(&["Smith, J.", "Doe, A.", "Roe, B."]), true);
        assert_eq!(out.to_markdown(), "Smith, J. *et al.*");
    }

    #[test]
    fn test_zero_names_is_null() {
        let out = PersonNameStyle::default().format_names(&[], true);
        assert!(out.is_null());
    }
}
