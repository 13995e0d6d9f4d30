/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Author-year inline referencing style.
//!
//! This crate renders inline citations ("Smith (2020)", "(Smith 2020)", ...)
//! for a host document pipeline. The host resolves citation keys to
//! [`Entry`] values and asks a named style to render each citation
//! occurrence for a given *role* (the citation form requested at the call
//! site, e.g. `t` for textual or `p` for parenthetical).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  StyleRegistry  (plugin.rs)   name → CompositeStyle factory      │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  CompositeStyle (composite.rs)   role → StyleVariant dispatch    │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Variants (variant/)  Parenthetical, Textual, Author, Label, ... │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Fragments (template.rs, person.rs, bracket.rs) → Output tree    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use quarto_refstyle::{Entry, StyleRegistry, plugin};
//!
//! let mut registry = StyleRegistry::new();
//! plugin::setup(&mut registry);
//!
//! let style = registry.get(plugin::STYLE_NAME)?;
//! let entry = Entry::new("smith2020").with_author("Smith, J.").with_year("2020");
//! let text = style.render(&entry, "t", "", "")?;
//! assert_eq!(text.to_plain(), "Smith, J. (2020)");
//! ```

pub mod bracket;
pub mod composite;
pub mod config;
pub mod entry;
pub mod error;
pub mod output;
pub mod person;
pub mod plugin;
pub mod template;
pub mod variant;

pub use bracket::BracketSpec;
pub use composite::CompositeStyle;
pub use config::{HostConfig, StyleConfig};
pub use entry::{Entry, Name};
pub use error::{Error, Result};
pub use output::{FormattedText, Output};
pub use person::PersonNameStyle;
pub use plugin::{ExtensionMetadata, StyleRegistry};
pub use variant::{CiteItem, StyleVariant};
