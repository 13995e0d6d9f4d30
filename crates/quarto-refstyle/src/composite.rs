/*
 * composite.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The composite author-year style.
//!
//! [`CompositeStyle`] owns an ordered list of variants and a role map
//! derived from it once, at construction. Variants are registered in a fixed
//! order (parenthetical, textual, author, label, year, empty); when two
//! variants declare the same role, the later one wins and the collision is
//! recorded.

use crate::config::StyleConfig;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::output::FormattedText;
use crate::plugin::STYLE_NAME;
use crate::variant::{
    AuthorStyle, CiteItem, EmptyStyle, LabelStyle, ParentheticalStyle, StyleVariant, TextualStyle,
    YearStyle,
};
use hashlink::LinkedHashMap;
use std::fmt;
use std::sync::Arc;

/// A role claimed by more than one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCollision {
    pub role: String,
    /// Variant that lost the role.
    pub replaced: String,
    /// Variant the role is bound to.
    pub bound_to: String,
}

/// Role-dispatched citation style.
pub struct CompositeStyle {
    name: String,
    variants: Vec<Box<dyn StyleVariant>>,
    /// role → index into `variants`, in first-declaration order.
    role_map: LinkedHashMap<String, usize>,
    collisions: Vec<RoleCollision>,
    citation_sep: String,
}

impl CompositeStyle {
    /// Build the author-year style from `config`.
    pub fn new(config: &StyleConfig) -> Self {
        let person = Arc::new(config.person.clone());

        let parenthetical = ParentheticalStyle {
            bracket: Arc::new(config.bracket_parenthetical.clone()),
            person: person.clone(),
            author_year_sep: config.author_year_sep.clone(),
            pre_text_sep: config.pre_text_sep.clone(),
            post_text_sep: config.post_text_sep.clone(),
        };
        let textual = TextualStyle {
            bracket: Arc::new(config.bracket_textual.clone()),
            person: person.clone(),
            text_reference_sep: config.text_reference_sep.clone(),
            pre_text_sep: config.pre_text_sep.clone(),
            post_text_sep: config.post_text_sep.clone(),
        };
        let variants: Vec<Box<dyn StyleVariant>> = vec![
            Box::new(parenthetical),
            Box::new(textual),
            Box::new(AuthorStyle {
                bracket: Arc::new(config.bracket_author.clone()),
                person,
            }),
            Box::new(LabelStyle {
                bracket: Arc::new(config.bracket_label.clone()),
            }),
            Box::new(YearStyle {
                bracket: Arc::new(config.bracket_year.clone()),
            }),
            Box::new(EmptyStyle),
        ];

        let mut style = Self::from_variants(variants);
        style.citation_sep = config.citation_sep.clone();
        style
    }

    /// Build a style from an explicit variant list.
    pub fn from_variants(variants: Vec<Box<dyn StyleVariant>>) -> Self {
        let mut role_map: LinkedHashMap<String, usize> = LinkedHashMap::new();
        let mut collisions = Vec::new();

        for (index, variant) in variants.iter().enumerate() {
            for role in variant.role_names() {
                if let Some(previous) = role_map.get_mut(*role) {
                    let collision = RoleCollision {
                        role: role.to_string(),
                        replaced: variants[*previous].name().to_string(),
                        bound_to: variant.name().to_string(),
                    };
                    tracing::warn!(
                        role = %collision.role,
                        replaced = %collision.replaced,
                        bound_to = %collision.bound_to,
                        "Role declared by more than one variant; last one wins"
                    );
                    collisions.push(collision);
                    *previous = index;
                } else {
                    role_map.insert(role.to_string(), index);
                }
            }
        }

        Self {
            name: STYLE_NAME.to_string(),
            variants,
            role_map,
            collisions,
            citation_sep: "; ".to_string(),
        }
    }

    /// Set the name reported in errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render a single-entry citation.
    pub fn render(
        &self,
        entry: &Entry,
        role: &str,
        pre_text: &str,
        post_text: &str,
    ) -> Result<FormattedText> {
        self.render_citation(&[CiteItem::with_text(entry, pre_text, post_text)], role)
    }

    /// Render several entries as one citation, e.g. `(Smith 2020; Doe 2019)`.
    pub fn render_citation(&self, items: &[CiteItem<'_>], role: &str) -> Result<FormattedText> {
        let variant = self.variant_for(role)?;
        tracing::debug!(
            role,
            variant = variant.name(),
            items = items.len(),
            "Rendering citation"
        );
        Ok(variant.render_items(items, role, &self.citation_sep))
    }

    /// The variant bound to `role`.
    pub fn variant_for(&self, role: &str) -> Result<&dyn StyleVariant> {
        self.role_map
            .get(role)
            .and_then(|&index| self.variants.get(index))
            .map(|variant| variant.as_ref())
            .ok_or_else(|| Error::UnsupportedRole {
                role: role.to_string(),
                style: self.name.clone(),
            })
    }

    pub fn supports(&self, role: &str) -> bool {
        self.role_map.contains_key(role)
    }

    /// Supported roles in declaration order.
    pub fn role_names(&self) -> Vec<&str> {
        self.role_map.keys().map(String::as_str).collect()
    }

    /// `(role, variant name)` pairs in declaration order.
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        self.role_map
            .iter()
            .map(|(role, &index)| (role.as_str(), self.variants[index].name()))
            .collect()
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name()).collect()
    }

    pub fn role_collisions(&self) -> &[RoleCollision] {
        &self.collisions
    }
}

impl Default for CompositeStyle {
    fn default() -> Self {
        Self::new(&StyleConfig::default())
    }
}

impl fmt::Debug for CompositeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeStyle")
            .field("name", &self.name)
            .field("variants", &self.variant_names())
            .field("roles", &self.role_names())
            .finish()
    }
}
