//! Structured documentation attached to a definition.

use serde::Serialize;

use crate::comment::{Node, Tag, TagKind, Tags};

/// Raw comment lines of one definition together with their parsed tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documentation {
    /// The comment lines as extracted (comment markers removed).
    pub comments: Vec<String>,
    /// Name of the language whose tag registry parsed the comments.
    pub language: String,
    /// Top-level nodes of the parsed tree.
    pub children: Vec<Node>,
}

impl Documentation {
    /// Parse `comments` with the given tag registry.
    pub fn new(comments: Vec<String>, language: impl Into<String>, tags: &Tags) -> Self {
        let children = tags.parse(&comments);
        Documentation {
            comments,
            language: language.into(),
            children,
        }
    }

    /// The top-level prose lines, joined with newlines.
    ///
    /// Returns `None` when the comments contain no prose.
    pub fn text(&self) -> Option<String> {
        let lines: Vec<&str> = self.children.iter().filter_map(Node::as_text).collect();
        if lines.iter().all(|line| line.trim().is_empty()) {
            return None;
        }
        Some(lines.join("\n").trim().to_string())
    }

    /// Top-level tags of the given kind, in document order.
    pub fn filter(&self, kind: TagKind) -> impl Iterator<Item = &Tag> {
        self.children
            .iter()
            .filter_map(Node::as_tag)
            .filter(move |tag| tag.kind() == kind)
    }

    /// Top-level tags with the given directive name.
    pub fn directive<'a>(&'a self, directive: &'a str) -> impl Iterator<Item = &'a Tag> {
        self.children
            .iter()
            .filter_map(Node::as_tag)
            .filter(move |tag| tag.directive == directive)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Tag> {
        self.filter(TagKind::Parameter)
    }

    pub fn returns(&self) -> Option<&Tag> {
        self.filter(TagKind::Returns).next()
    }

    pub fn examples(&self) -> impl Iterator<Item = &Tag> {
        self.filter(TagKind::Example)
    }

    pub fn is_deprecated(&self) -> bool {
        self.directive("deprecated").next().is_some()
    }

    /// Whether the comments mark the definition `@public` or `@private`
    /// explicitly.
    pub fn visibility_pragma(&self) -> Option<&str> {
        self.filter(TagKind::Pragma)
            .map(|tag| tag.directive.as_str())
            .find(|directive| *directive == "public" || *directive == "private")
    }
}

// ============================================================================
// Tests
// ============================================================================
