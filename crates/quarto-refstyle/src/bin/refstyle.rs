/*
 * refstyle.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render inline citations from the command line.
//!
//! This binary stands in for a document build: it loads entries from a
//! JSON or YAML file, resolves citation keys, and renders them through a
//! registered style.
//!
//! Usage:
//!   refstyle render --entries refs.json --role t smith2020
//!   refstyle render --entries refs.json --role p "{see}smith2020{p.10}" doe2019
//!   refstyle batch --entries refs.json --citations cites.json --format html
//!   refstyle roles

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quarto_refstyle::plugin::{self, STYLE_NAME};
use quarto_refstyle::{
    CiteItem, CompositeStyle, Entry, Error, FormattedText, HostConfig, StyleConfig, StyleRegistry,
};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "refstyle")]
#[command(version, about = "Render author-year inline citations", long_about = None)]
struct Cli {
    /// YAML config with `bibtex_reference_style` and optional `refstyle` overrides
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one citation
    Render {
        /// Entries file (JSON or YAML list)
        #[arg(short, long)]
        entries: PathBuf,

        /// Citation role (t, p, ts, author, ...)
        #[arg(short, long, default_value = "p")]
        role: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Citation keys, optionally as `{pre}key{post}`
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Render every citation of a JSON list, in parallel
    Batch {
        #[arg(short, long)]
        entries: PathBuf,

        /// JSON list of `{"role": ..., "keys": [...]}`
        #[arg(long)]
        citations: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// List the roles of the configured style
    Roles,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    Markdown,
    Html,
    Json,
}

#[derive(Deserialize)]
struct CitationRequest {
    role: String,
    keys: Vec<String>,
}

/// A key with optional pre- and post-text, written `{see}smith2020{p.10}`.
#[derive(Debug, PartialEq, Eq)]
struct CiteKey<'a> {
    pre_text: &'a str,
    key: &'a str,
    post_text: &'a str,
}

fn parse_cite_key(raw: &str) -> CiteKey<'_> {
    let raw = raw.trim();
    let (pre_text, rest) = match raw.strip_prefix('{').and_then(|s| s.split_once('}')) {
        Some((pre, rest)) => (pre, rest),
        None => ("", raw),
    };
    let (key, post_text) = match rest.strip_suffix('}').and_then(|s| s.split_once('{')) {
        Some((key, post)) => (key, post),
        None => (rest, ""),
    };
    CiteKey {
        pre_text,
        key: key.trim(),
        post_text,
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, Entry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries from {}", path.display()))?;
    let entries: Vec<Entry> = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(Error::from)?
    } else {
        serde_yaml::from_str(&content).map_err(Error::from)?
    };
    tracing::info!(count = entries.len(), path = %path.display(), "Loaded entries");
    Ok(entries.into_iter().map(|e| (e.key.clone(), e)).collect())
}

fn load_style(config: Option<&Path>) -> Result<Arc<CompositeStyle>> {
    let host = match config {
        Some(path) => HostConfig::from_file(path)?,
        None => HostConfig {
            reference_style: STYLE_NAME.to_string(),
            refstyle: StyleConfig::default(),
        },
    };

    let mut registry = StyleRegistry::new();
    let metadata = plugin::setup_with(&mut registry, host.refstyle.clone());
    tracing::debug!(?metadata, "Registered extension");

    registry
        .resolve(&host)
        .with_context(|| format!("Registered styles: {}", registry.names().join(", ")))
}

fn render_keys(
    style: &CompositeStyle,
    entries: &HashMap<String, Entry>,
    role: &str,
    keys: &[String],
) -> quarto_refstyle::Result<FormattedText> {
    let parsed: Vec<CiteKey<'_>> = keys.iter().map(|k| parse_cite_key(k)).collect();
    let items = parsed
        .iter()
        .map(|cite| {
            entries
                .get(cite.key)
                .map(|entry| CiteItem::with_text(entry, cite.pre_text, cite.post_text))
                .ok_or_else(|| Error::EntryNotFound {
                    key: cite.key.to_string(),
                })
        })
        .collect::<quarto_refstyle::Result<Vec<_>>>()?;
    style.render_citation(&items, role)
}

fn format_text(text: &FormattedText, format: Format) -> Result<String> {
    Ok(match format {
        Format::Plain => text.to_plain(),
        Format::Markdown => text.to_markdown(),
        Format::Html => text.to_html(),
        Format::Json => serde_json::to_string(text)?,
    })
}

/// Render every request in parallel and print the results in order.
///
/// A failed request prints an empty line so output lines stay aligned with
/// requests; the batch as a whole then fails.
fn run_batch(
    style: &CompositeStyle,
    entries: &HashMap<String, Entry>,
    requests: &[CitationRequest],
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    let rendered: Vec<quarto_refstyle::Result<FormattedText>> = requests
        .par_iter()
        .map(|req| render_keys(style, entries, &req.role, &req.keys))
        .collect();

    let mut failed = 0;
    for (request, result) in requests.iter().zip(rendered) {
        match result {
            Ok(text) => writeln!(out, "{}", format_text(&text, format)?)?,
            Err(err) => {
                tracing::error!(role = %request.role, error = %err, "Citation failed");
                writeln!(out)?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} citation(s) failed", failed, requests.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refstyle=info,quarto_refstyle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let style = load_style(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            entries,
            role,
            format,
            keys,
        } => {
            let entries = load_entries(&entries)?;
            let text = render_keys(&style, &entries, &role, &keys)?;
            println!("{}", format_text(&text, format)?);
        }
        Commands::Batch {
            entries,
            citations,
            format,
        } => {
            let entries = load_entries(&entries)?;
            let content = std::fs::read_to_string(&citations)
                .with_context(|| format!("Failed to read citations from {}", citations.display()))?;
            let requests: Vec<CitationRequest> = serde_json::from_str(&content)?;

            run_batch(&style, &entries, &requests, format, &mut std::io::stdout().lock())?;
        }
        Commands::Roles => {
            for (role, variant) in style.bindings() {
                println!("{:<12} {}", role, variant);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_key() {
        assert_eq!(
            parse_cite_key("smith2020"),
            CiteKey {
                pre_text: "",
                key: "smith2020",
                post_text: ""
            }
        );
    }

    #[test]
    fn test_parse_pre_and_post() {
        assert_eq!(
            parse_cite_key("{see}smith2020{p.10}"),
            CiteKey {
                pre_text: "see",
                key: "smith2020",
                post_text: "p.10"
            }
        );
    }

    #[test]
    fn test_parse_post_only() {
        let cite = parse_cite_key("smith2020{ch. 2}");
        assert_eq!(cite.key, "smith2020");
        assert_eq!(cite.post_text, "ch. 2");
        assert_eq!(cite.pre_text, "");
    }

    #[test]
    fn test_render_keys_reports_unknown_key() {
        let style = CompositeStyle::default();
        let entries = HashMap::new();
        let err = render_keys(&style, &entries, "p", &["missing".to_string()]).unwrap_err();
        assert_eq!(
            err,
            Error::EntryNotFound {
                key: "missing".to_string()
            }
        );
    }

    fn request(role: &str, key: &str) -> CitationRequest {
        CitationRequest {
            role: role.to_string(),
            keys: vec![key.to_string()],
        }
    }

    #[test]
    fn test_batch_fails_on_bad_role() {
        let style = CompositeStyle::default();
        let entries: HashMap<String, Entry> = [(
            "smith2020".to_string(),
            Entry::new("smith2020").with_author("Smith, J.").with_year("2020"),
        )]
        .into_iter()
        .collect();
        let requests = [
            request("t", "smith2020"),
            request("nonexistent-role", "smith2020"),
            request("p", "smith2020"),
        ];

        let mut out = Vec::new();
        let err = run_batch(&style, &entries, &requests, Format::Plain, &mut out).unwrap_err();
        assert!(err.to_string().contains("1 of 3"), "Got: {}", err);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Smith, J. (2020)\n\n(Smith, J. 2020)\n"
        );
    }

    #[test]
    fn test_batch_succeeds() {
        let style = CompositeStyle::default();
        let entries: HashMap<String, Entry> = [(
            "k".to_string(),
            Entry::new("k").with_author("Smith, J.").with_year("2020"),
        )]
        .into_iter()
        .collect();
        let mut out = Vec::new();
        run_batch(&style, &entries, &[request("year", "k")], Format::Markdown, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[2020](#k)\n");
    }

    #[test]
    fn test_batch_fails_on_unknown_key() {
        let style = CompositeStyle::default();
        let mut out = Vec::new();
        let result = run_batch(&style, &HashMap::new(), &[request("p", "missing")], Format::Plain, &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_entries_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.yml");
        std::fs::write(&path, "- key: smith2020\n  author: ['Smith, J.']\n  year: 2020\n").unwrap();
        let entries = load_entries(&path).unwrap();
        let style = CompositeStyle::default();
        let text = render_keys(&style, &entries, "t", &["smith2020".to_string()]).unwrap();
        assert_eq!(text.to_plain(), "Smith, J. (2020)");
    }
}
