/*
 * variant/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation style variants.
//!
//! A variant renders one family of citation roles. It builds the *inner*
//! part of each cited item (pre-text, linked core, post-text) and declares
//! whether the whole citation is enclosed in brackets. Variants are
//! stateless after construction and can be shared across threads.
//!
//! | Variant | Roles |
//! |---|---|
//! | [`ParentheticalStyle`] | `p`, `ps`, `alp`, `alps` |
//! | [`TextualStyle`] | `t`, `ts` |
//! | [`AuthorStyle`] | `author`, `authors`, `authorpar`, `authorspar` |
//! | [`LabelStyle`] | `label`, `labelpar` |
//! | [`YearStyle`] | `year`, `yearpar` |
//! | [`EmptyStyle`] | `empty` |

mod basic;
mod extra;

pub use basic::{ParentheticalStyle, TextualStyle};
pub use extra::{AuthorStyle, EmptyStyle, LabelStyle, YearStyle};

use crate::bracket::BracketSpec;
use crate::entry::Entry;
use crate::output::{FormattedText, Output, join_outputs};

/// One cited entry together with its free text.
#[derive(Debug, Clone, Copy)]
pub struct CiteItem<'a> {
    pub entry: &'a Entry,
    pub pre_text: &'a str,
    pub post_text: &'a str,
}

impl<'a> CiteItem<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        Self {
            entry,
            pre_text: "",
            post_text: "",
        }
    }

    pub fn with_text(entry: &'a Entry, pre_text: &'a str, post_text: &'a str) -> Self {
        Self {
            entry,
            pre_text,
            post_text,
        }
    }
}

/// A rendering strategy bound to a set of roles.
pub trait StyleVariant: Send + Sync {
    /// Human-readable name, used for logging.
    fn name(&self) -> &str;

    /// Roles this variant answers.
    fn role_names(&self) -> &'static [&'static str];

    /// Brackets enclosing the whole citation for `role`, if any.
    fn brackets(&self, role: &str) -> Option<&BracketSpec>;

    /// Render one cited item: pre-text, linked core, post-text.
    fn inner(&self, role: &str, item: &CiteItem<'_>) -> Output;

    /// Render a citation of a single entry.
    fn render(&self, entry: &Entry, role: &str, pre_text: &str, post_text: &str) -> FormattedText {
        self.render_items(&[CiteItem::with_text(entry, pre_text, post_text)], role, "; ")
    }

    /// Render several items as one citation, enclosed once in brackets.
    fn render_items(&self, items: &[CiteItem<'_>], role: &str, sep: &str) -> FormattedText {
        let inners = items.iter().map(|item| self.inner(role, item)).collect();
        let joined = join_outputs(inners, sep);
        let output = match self.brackets(role) {
            Some(bracket) => bracket.wrap(joined),
            None => joined,
        };
        FormattedText::new(output)
    }
}

/// Full-name roles carry an `s`: `ps`, `alps`, `ts`, `authors`, `authorspar`.
fn is_full_role(role: &str) -> bool {
    role.trim_end_matches("par").ends_with('s')
}

/// Bracketed extra roles end in `par`.
fn is_par_role(role: &str) -> bool {
    role.ends_with("par")
}
