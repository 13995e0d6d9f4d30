/*
 * output.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rich output for rendered citations.
//!
//! Fragments are assembled into an [`Output`] tree. A finished citation is
//! handed to the host as [`FormattedText`], which can be rendered to plain
//! text, Markdown or HTML, or serialized as JSON.

use serde::Serialize;
use std::fmt;

/// A node of rendered citation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "t", content = "c")]
pub enum Output {
    /// Literal text content.
    Literal(String),
    /// Emphasized (italic) children.
    Emph(Vec<Output>),
    /// A hyperlink to the bibliography entry `target`.
    ///
    /// A link is kept even when it has no children: an empty anchor is
    /// still a valid (invisible) citation.
    Linked { target: String, children: Vec<Output> },
    /// Children rendered one after another.
    Sequence(Vec<Output>),
    /// Empty output.
    Null,
}

impl Output {
    /// Create a literal text node.
    pub fn literal(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Output::Null
        } else {
            Output::Literal(s)
        }
    }

    /// Create an emphasized node.
    pub fn emph(children: Vec<Output>) -> Self {
        let children = drop_null(children);
        if children.is_empty() {
            Output::Null
        } else {
            Output::Emph(children)
        }
    }

    /// Create a link node.
    pub fn linked(target: impl Into<String>, children: Vec<Output>) -> Self {
        Output::Linked {
            target: target.into(),
            children: drop_null(children),
        }
    }

    /// Create a sequence of outputs. A single child is returned unwrapped.
    pub fn sequence(children: Vec<Output>) -> Self {
        let mut children = drop_null(children);
        match children.len() {
            0 => Output::Null,
            1 => children.pop().unwrap_or(Output::Null),
            _ => Output::Sequence(children),
        }
    }

    /// Check if this output renders nothing and carries no link.
    pub fn is_null(&self) -> bool {
        match self {
            Output::Null => true,
            Output::Literal(s) => s.is_empty(),
            Output::Emph(children) | Output::Sequence(children) => {
                children.iter().all(|c| c.is_null())
            }
            Output::Linked { .. } => false,
        }
    }

    /// Render the visible text, without any markup.
    pub fn render(&self) -> String {
        match self {
            Output::Null => String::new(),
            Output::Literal(s) => s.clone(),
            Output::Emph(children)
            | Output::Sequence(children)
            | Output::Linked { children, .. } => children.iter().map(|c| c.render()).collect(),
        }
    }

    /// Render as Markdown: `*emph*` and `[text](#target)`.
    ///
    /// Literal text is escaped so it can never open or close a span.
    pub fn to_markdown(&self) -> String {
        match self {
            Output::Null => String::new(),
            Output::Literal(s) => escape_markdown(s),
            Output::Emph(children) => format!("*{}*", markdown_children(children)),
            Output::Sequence(children) => markdown_children(children),
            Output::Linked { target, children } => {
                format!(
                    "[{}]({})",
                    markdown_children(children),
                    markdown_destination(target)
                )
            }
        }
    }

    /// Render as HTML.
    pub fn to_html(&self) -> String {
        match self {
            Output::Null => String::new(),
            Output::Literal(s) => escape_html(s),
            Output::Emph(children) => format!("<em>{}</em>", html_children(children)),
            Output::Sequence(children) => html_children(children),
            Output::Linked { target, children } => format!(
                "<a class=\"reference internal\" href=\"#{}\">{}</a>",
                escape_html(target),
                html_children(children)
            ),
        }
    }

    /// Collect `(target, visible text)` for every link in document order.
    pub fn links(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        self.collect_links(&mut found);
        found
    }

    fn collect_links(&self, found: &mut Vec<(String, String)>) {
        match self {
            Output::Null | Output::Literal(_) => {}
            Output::Emph(children) | Output::Sequence(children) => {
                for child in children {
                    child.collect_links(found);
                }
            }
            Output::Linked { target, children } => {
                found.push((target.clone(), children.iter().map(|c| c.render()).collect()));
            }
        }
    }
}

fn drop_null(children: Vec<Output>) -> Vec<Output> {
    children.into_iter().filter(|c| !c.is_null()).collect()
}

fn markdown_children(children: &[Output]) -> String {
    children.iter().map(|c| c.to_markdown()).collect()
}

fn escape_markdown(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `#key`, or `<#key>` when the key has characters a bare destination
/// cannot carry.
fn markdown_destination(target: &str) -> String {
    let bare = target
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '/'));
    if bare {
        return format!("#{}", target);
    }
    let mut escaped = String::with_capacity(target.len() + 3);
    escaped.push_str("<#");
    for c in target.chars() {
        if matches!(c, '\\' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('>');
    escaped
}

fn html_children(children: &[Output]) -> String {
    children.iter().map(|c| c.to_html()).collect()
}

fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Join outputs with a literal delimiter, skipping empty ones.
pub fn join_outputs(outputs: Vec<Output>, delimiter: &str) -> Output {
    let non_null = drop_null(outputs);

    let mut children = Vec::with_capacity(non_null.len() * 2);
    for (i, output) in non_null.into_iter().enumerate() {
        if i > 0 {
            children.push(Output::literal(delimiter));
        }
        children.push(output);
    }

    Output::sequence(children)
}

/// The rendered form of one citation occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedText {
    pub children: Vec<Output>,
}

impl FormattedText {
    pub fn new(output: Output) -> Self {
        let children = match output {
            Output::Null => Vec::new(),
            Output::Sequence(children) => children,
            other => vec![other],
        };
        Self { children }
    }

    /// Visible text without markup.
    pub fn to_plain(&self) -> String {
        self.children.iter().map(|c| c.render()).collect()
    }

    pub fn to_markdown(&self) -> String {
        self.children.iter().map(|c| c.to_markdown()).collect()
    }

    pub fn to_html(&self) -> String {
        self.children.iter().map(|c| c.to_html()).collect()
    }

    /// `(target, visible text)` of each link span.
    pub fn links(&self) -> Vec<(String, String)> {
        self.children.iter().flat_map(|c| c.links()).collect()
    }

    pub fn link_count(&self) -> usize {
        self.links().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_literal_empty_is_null() {
        let output = Output::literal("");
        assert!(output.is_null());
        assert_eq!(output.render(), "");
    }

    #[test]
    fn test_output_sequence_single_unwraps() {
        let output = Output::sequence(vec![Output::Null, Output::literal("Only")]);
        assert!(matches!(output, Output::Literal(_)));
    }

    #[test]
    fn test_output_sequence_filters_null() {
        let output = Output::sequence(vec![
            Output::literal("A"),
            Output::Null,
            Output::literal("B"),
        ]);
        assert_eq!(output.render(), "AB");
    }

    #[test]
    fn test_empty_link_is_not_null() {
        let output = Output::linked("smith2020", vec![Output::Null]);
        assert!(!output.is_null());
        assert_eq!(output.render(), "");
        assert_eq!(output.links(), vec![("smith2020".to_string(), String::new())]);
    }

    #[test]
    fn test_join_outputs_skips_null() {
        let joined = join_outputs(
            vec![Output::literal("A"), Output::Null, Output::literal("C")],
            "; ",
        );
        assert_eq!(joined.render(), "A; C");
    }

    #[test]
    fn test_markdown_and_html() {
        let output = Output::sequence(vec![
            Output::literal("see "),
            Output::linked(
                "smith2020",
                vec![Output::literal("Smith"), Output::emph(vec![Output::literal(" et al.")])],
            ),
        ]);
        assert_eq!(output.to_markdown(), "see [Smith* et al.*](#smith2020)");
        assert_eq!(
            output.to_html(),
            "see <a class=\"reference internal\" href=\"#smith2020\">Smith<em> et al.</em></a>"
        );
    }

    #[test]
    fn test_markdown_escapes_link_text() {
        let output = Output::linked("k", vec![Output::literal("Part ] one [*x*]")]);
        assert_eq!(output.to_markdown(), r"[Part \] one \[\*x\*\]](#k)");
    }

    #[test]
    fn test_markdown_destination_with_unsafe_key() {
        let output = Output::linked("a b)", vec![Output::literal("A")]);
        assert_eq!(output.to_markdown(), "[A](<#a b)>)");
        let output = Output::linked("x<y>", vec![Output::literal("A")]);
        assert_eq!(output.to_markdown(), r"[A](<#x\<y\>>)");
        let output = Output::linked("smith_2020:a", vec![Output::literal("A")]);
        assert_eq!(output.to_markdown(), "[A](#smith_2020:a)");
    }

    #[test]
    fn test_html_escapes_text() {
        assert_eq!(Output::literal("A & B").to_html(), "A &amp; B");
    }

    #[test]
    fn test_formatted_text_flattens_sequence() {
        let text = FormattedText::new(Output::sequence(vec![
            Output::literal("("),
            Output::linked("k", vec![Output::literal("K 2020")]),
            Output::literal(")"),
        ]));
        assert_eq!(text.children.len(), 3);
        assert_eq!(text.to_string(), "(K 2020)");
        assert_eq!(text.link_count(), 1);
    }
}
