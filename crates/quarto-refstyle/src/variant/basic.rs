/*
 * variant/basic.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Author-year variants: parenthetical `(Author Year)` and textual
//! `Author (Year)`.
//!
//! Both join the author and year fragments into one piece of content first
//! and link it once, so the reader clicks a single span rather than separate
//! author and year links.

use super::{CiteItem, StyleVariant, is_full_role};
use crate::bracket::BracketSpec;
use crate::output::{Output, join_outputs};
use crate::person::PersonNameStyle;
use crate::template::{author, degrade, pre_post, reference, year};
use std::sync::Arc;

/// `(Author Year)`. The `al` roles drop the outer brackets.
#[derive(Debug, Clone)]
pub struct ParentheticalStyle {
    pub bracket: Arc<BracketSpec>,
    pub person: Arc<PersonNameStyle>,
    pub author_year_sep: String,
    pub pre_text_sep: String,
    pub post_text_sep: String,
}

impl ParentheticalStyle {
    pub fn new(bracket: Arc<BracketSpec>, person: Arc<PersonNameStyle>) -> Self {
        Self {
            bracket,
            person,
            author_year_sep: " ".to_string(),
            pre_text_sep: " ".to_string(),
            post_text_sep: ", ".to_string(),
        }
    }
}

impl StyleVariant for ParentheticalStyle {
    fn name(&self) -> &str {
        "parenthetical"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["p", "ps", "alp", "alps"]
    }

    fn brackets(&self, role: &str) -> Option<&BracketSpec> {
        if role.starts_with("al") {
            None
        } else {
            Some(self.bracket.as_ref())
        }
    }

    fn inner(&self, role: &str, item: &CiteItem<'_>) -> Output {
        let content = join_outputs(
            vec![
                degrade(author(item.entry, &self.person, is_full_role(role))),
                degrade(year(item.entry, None)),
            ],
            &self.author_year_sep,
        );
        pre_post(
            reference(item.entry, content),
            item.pre_text,
            item.post_text,
            &self.pre_text_sep,
            &self.post_text_sep,
        )
    }
}

/// `Author (Year)`, linked as one unit.
#[derive(Debug, Clone)]
pub struct TextualStyle {
    /// Brackets around the year.
    pub bracket: Arc<BracketSpec>,
    pub person: Arc<PersonNameStyle>,
    /// Separator between the author and the bracketed year.
    pub text_reference_sep: String,
    pub pre_text_sep: String,
    pub post_text_sep: String,
}

impl TextualStyle {
    pub fn new(bracket: Arc<BracketSpec>, person: Arc<PersonNameStyle>) -> Self {
        Self {
            bracket,
            person,
            text_reference_sep: " ".to_string(),
            pre_text_sep: " ".to_string(),
            post_text_sep: ", ".to_string(),
        }
    }
}

impl StyleVariant for TextualStyle {
    fn name(&self) -> &str {
        "textual"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["t", "ts"]
    }

    fn brackets(&self, _role: &str) -> Option<&BracketSpec> {
        None
    }

    fn inner(&self, role: &str, item: &CiteItem<'_>) -> Output {
        // Author and "(Year)" are composed as plain content, then linked once.
        let content = join_outputs(
            vec![
                degrade(author(item.entry, &self.person, is_full_role(role))),
                degrade(year(item.entry, Some(self.bracket.as_ref()))),
            ],
            &self.text_reference_sep,
        );
        pre_post(
            reference(item.entry, content),
            item.pre_text,
            item.post_text,
            &self.pre_text_sep,
            &self.post_text_sep,
        )
    }
}
