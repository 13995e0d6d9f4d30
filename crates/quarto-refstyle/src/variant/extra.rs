/*
 * variant/extra.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Single-fragment variants: author only, label only, year only, and the
//! empty (link-only) citation.

use super::{CiteItem, StyleVariant, is_full_role, is_par_role};
use crate::bracket::BracketSpec;
use crate::output::Output;
use crate::person::PersonNameStyle;
use crate::template::{author, degrade, label, pre_post, reference, year};
use std::sync::Arc;

const PRE_TEXT_SEP: &str = " ";
const POST_TEXT_SEP: &str = ", ";

fn par_brackets<'a>(bracket: &'a BracketSpec, role: &str) -> Option<&'a BracketSpec> {
    is_par_role(role).then_some(bracket)
}

fn linked_item(item: &CiteItem<'_>, fragment: Output) -> Output {
    pre_post(
        reference(item.entry, fragment),
        item.pre_text,
        item.post_text,
        PRE_TEXT_SEP,
        POST_TEXT_SEP,
    )
}

/// Author list only.
#[derive(Debug, Clone)]
pub struct AuthorStyle {
    pub bracket: Arc<BracketSpec>,
    pub person: Arc<PersonNameStyle>,
}

impl StyleVariant for AuthorStyle {
    fn name(&self) -> &str {
        "author"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["author", "authors", "authorpar", "authorspar"]
    }

    fn brackets(&self, role: &str) -> Option<&BracketSpec> {
        par_brackets(&self.bracket, role)
    }

    fn inner(&self, role: &str, item: &CiteItem<'_>) -> Output {
        let names = degrade(author(item.entry, &self.person, is_full_role(role)));
        linked_item(item, names)
    }
}

/// Entry label only.
#[derive(Debug, Clone)]
pub struct LabelStyle {
    pub bracket: Arc<BracketSpec>,
}

impl StyleVariant for LabelStyle {
    fn name(&self) -> &str {
        "label"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["label", "labelpar"]
    }

    fn brackets(&self, role: &str) -> Option<&BracketSpec> {
        par_brackets(&self.bracket, role)
    }

    fn inner(&self, _role: &str, item: &CiteItem<'_>) -> Output {
        linked_item(item, degrade(label(item.entry)))
    }
}

/// Year only.
#[derive(Debug, Clone)]
pub struct YearStyle {
    pub bracket: Arc<BracketSpec>,
}

impl StyleVariant for YearStyle {
    fn name(&self) -> &str {
        "year"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["year", "yearpar"]
    }

    fn brackets(&self, role: &str) -> Option<&BracketSpec> {
        par_brackets(&self.bracket, role)
    }

    fn inner(&self, _role: &str, item: &CiteItem<'_>) -> Output {
        linked_item(item, degrade(year(item.entry, None)))
    }
}

/// A link with no visible text.
#[derive(Debug, Clone, Default)]
pub struct EmptyStyle;

impl StyleVariant for EmptyStyle {
    fn name(&self) -> &str {
        "empty"
    }

    fn role_names(&self) -> &'static [&'static str] {
        &["empty"]
    }

    fn brackets(&self, _role: &str) -> Option<&BracketSpec> {
        None
    }

    fn inner(&self, _role: &str, item: &CiteItem<'_>) -> Output {
        linked_item(item, Output::Null)
    }
}
