/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fragment builders shared by every style variant.
//!
//! Builders never look at the citation role, so every variant composes the
//! same author, year and link fragments. [`reference`] is the only place a
//! link is created.

use crate::bracket::BracketSpec;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::person::PersonNameStyle;

/// Author list, falling back to editors and then to the title.
pub fn author(entry: &Entry, person: &PersonNameStyle, full: bool) -> Result<Output> {
    if let Some(names) = entry.author_or_editor() {
        let names = person.format_names(names, full);
        if !names.is_null() {
            return Ok(names);
        }
    }

    match entry.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => Ok(Output::literal(title)),
        _ => Err(Error::malformed(&entry.key, "author")),
    }
}

/// Publication year, optionally bracketed.
pub fn year(entry: &Entry, bracket: Option<&BracketSpec>) -> Result<Output> {
    let year = entry.year.trim();
    if year.is_empty() {
        return Err(Error::malformed(&entry.key, "year"));
    }
    let year = Output::literal(year);
    Ok(match bracket {
        Some(bracket) => bracket.wrap(year),
        None => year,
    })
}

/// Disambiguation label.
pub fn label(entry: &Entry) -> Result<Output> {
    match entry.label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => Ok(Output::literal(label)),
        _ => Err(Error::malformed(&entry.key, "label")),
    }
}

/// Wrap `content` in a single link to the entry.
pub fn reference(entry: &Entry, content: Output) -> Output {
    Output::linked(entry.key.as_str(), vec![content])
}

/// Place optional pre- and post-text around `core`.
///
/// A separator is only emitted next to a non-empty side.
pub fn pre_post(core: Output, pre_text: &str, post_text: &str, sep_pre: &str, sep_post: &str) -> Output {
    // A core without visible text takes no separator of its own.
    let visible_core = !core.render().is_empty();
    let mut children = Vec::with_capacity(5);
    if !pre_text.is_empty() {
        children.push(Output::literal(pre_text));
        if visible_core || !post_text.is_empty() {
            children.push(Output::literal(sep_pre));
        }
    }
    children.push(core);
    if !post_text.is_empty() {
        if visible_core {
            children.push(Output::literal(sep_post));
        }
        children.push(Output::literal(post_text));
    }
    Output::sequence(children)
}

/// Substitute an empty fragment for one that cannot be built.
///
/// One bad record must not abort a document build.
pub fn degrade(fragment: Result<Output>) -> Output {
    match fragment {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(error = %err, "Omitting citation fragment");
            Output::Null
        }
    }
}
