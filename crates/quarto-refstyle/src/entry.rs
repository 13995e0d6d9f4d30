/*
 * entry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Bibliographic entries as supplied by the host.
//!
//! Entries are produced by the host's bibliography database. The rendering
//! engine only reads them. Both JSON and YAML input are accepted; names may
//! be given as structured objects or as plain display strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A bibliographic record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Citation key. CSL-JSON calls this `id`.
    #[serde(alias = "id")]
    pub key: String,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_names"
    )]
    pub author: Vec<Name>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_names"
    )]
    pub editor: Vec<Name>,

    /// Publication year. Empty when unknown.
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: String,

    /// Disambiguation label computed by the bibliography style (e.g. `Smi20`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Fields used by other collaborators, kept verbatim.
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

impl Entry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Append an author parsed from a display string.
    pub fn with_author(mut self, name: &str) -> Self {
        self.author.push(Name::parse(name));
        self
    }

    pub fn with_authors<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.author.extend(names.into_iter().map(Name::parse));
        self
    }

    pub fn with_editor(mut self, name: &str) -> Self {
        self.editor.push(Name::parse(name));
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Authors, or editors when the entry has no authors.
    pub fn author_or_editor(&self) -> Option<&[Name]> {
        if !self.author.is_empty() {
            Some(&self.author)
        } else if !self.editor.is_empty() {
            Some(&self.editor)
        } else {
            None
        }
    }
}

/// A person name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,

    /// Dropping particle (e.g., "van" in "Ludwig van Beethoven").
    #[serde(rename = "dropping-particle", skip_serializing_if = "Option::is_none")]
    pub dropping_particle: Option<String>,

    /// Non-dropping particle (e.g., "van" in "Vincent van Gogh").
    #[serde(rename = "non-dropping-particle", skip_serializing_if = "Option::is_none")]
    pub non_dropping_particle: Option<String>,

    /// Suffix (e.g., "Jr.", "III").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Literal name (institutions), rendered unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl Name {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            literal: Some(text.into()),
            ..Default::default()
        }
    }

    /// Parse a display string into a structured name.
    ///
    /// Accepts `von Last, First`, `von Last, Jr, First` and `First von Last`.
    /// A fully braced string (`{World Health Organization}`) is a literal.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.len() >= 2 && text.starts_with('{') && text.ends_with('}') {
            return Name::literal(&text[1..text.len() - 1]);
        }

        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [family_part, given] => Self::from_parts(family_part, None, given),
            [family_part, suffix, given, ..] => Self::from_parts(family_part, Some(*suffix), given),
            _ => Self::from_first_last(text),
        }
    }

    fn from_parts(family_part: &str, suffix: Option<&str>, given: &str) -> Self {
        let (particle, family) = split_particle(family_part);
        Self {
            family: non_empty(&family),
            given: non_empty(given),
            non_dropping_particle: particle,
            suffix: suffix.and_then(non_empty),
            ..Default::default()
        }
    }

    fn from_first_last(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let Some((family, rest)) = words.split_last() else {
            return Name::default();
        };

        // Lowercase words right before the family name are particles.
        let given_end = rest
            .iter()
            .position(|w| starts_lowercase(w))
            .unwrap_or(rest.len());
        let given = rest[..given_end].join(" ");
        let particle = rest[given_end..].join(" ");

        Self {
            family: non_empty(family),
            given: non_empty(&given),
            dropping_particle: non_empty(&particle),
            ..Default::default()
        }
    }

    /// Family name with its non-dropping particle.
    pub fn family_with_particle(&self) -> String {
        [&self.non_dropping_particle, &self.family]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn split_particle(family_part: &str) -> (Option<String>, String) {
    let words: Vec<&str> = family_part.split_whitespace().collect();
    let particle_len = words
        .iter()
        .take(words.len().saturating_sub(1))
        .take_while(|w| starts_lowercase(w))
        .count();
    let particle = words[..particle_len].join(" ");
    let family = words[particle_len..].join(" ");
    (non_empty(&particle), family)
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameInput {
    Text(String),
    Structured(Name),
}

fn deserialize_names<'de, D>(deserializer: D) -> Result<Vec<Name>, D::Error>
where
    D: Deserializer<'de>,
{
    let inputs: Option<Vec<NameInput>> = Deserialize::deserialize(deserializer)?;
    Ok(inputs
        .unwrap_or_default()
        .into_iter()
        .map(|input| match input {
            NameInput::Text(text) => Name::parse(&text),
            NameInput::Structured(name) => name,
        })
        .collect())
}

/// Years arrive as strings or integers; null means unknown.
fn deserialize_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("expected string or number for year")),
    }
}
