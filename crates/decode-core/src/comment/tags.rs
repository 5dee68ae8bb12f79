//! Directive registry and the indentation-driven comment parser.
//!
//! Comments are parsed with an explicit [`LineCursor`] over an immutable
//! slice of lines. Every line the parser consumes advances the cursor; the
//! caller's lines are never modified, so the same comments can be parsed
//! any number of times.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::node::{Node, Tag, TagBody, Text};

/// One level of comment indentation.
pub const INDENTATION: &str = "  ";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*@(?P<directive>\S*)(?:\s+(?P<remainder>.*?))?\s*$").unwrap()
});

static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s+\[(?P<type>.*?)\](?:\s+(?P<details>.*?))?$").unwrap()
});

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<type>.*?)\](?:\s+(?P<details>.*?))?$").unwrap());

static YIELDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<block>\{.*?\})(?:\s+(?P<details>.*?))?$").unwrap());

/// Whether `line` is indented deeply enough to belong to nesting `level`.
///
/// Either `level` two-space units or `level` tabs qualify; the choice is
/// made per line.
pub fn valid_indentation(line: &str, level: usize) -> bool {
    level == 0 || line.starts_with(&INDENTATION.repeat(level)) || line.starts_with(&"\t".repeat(level))
}

// ============================================================================
// Tag Kinds
// ============================================================================

/// The builders a directive can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Parameter,
    Option,
    Attribute,
    Returns,
    Raises,
    Throws,
    Yields,
    Pragma,
    Rbs,
    Example,
}

impl TagKind {
    /// Match the remainder of a directive line against this kind's structure.
    ///
    /// Returns the payload and any inline details, or `None` when the
    /// remainder does not have the required shape.
    fn build(self, remainder: &str) -> Option<(TagBody, Option<String>)> {
        match self {
            TagKind::Parameter | TagKind::Option => {
                let captures = PARAMETER.captures(remainder)?;
                let name = captures["name"].to_string();
                let ty = captures["type"].to_string();
                let body = if self == TagKind::Parameter {
                    TagBody::Parameter { name, ty }
                } else {
                    TagBody::Option { name, ty }
                };
                Some((body, details(captures.name("details"))))
            }
            TagKind::Attribute | TagKind::Returns | TagKind::Raises | TagKind::Throws => {
                let captures = ATTRIBUTE.captures(remainder)?;
                let ty = captures["type"].to_string();
                let body = match self {
                    TagKind::Attribute => TagBody::Attribute { ty },
                    TagKind::Returns => TagBody::Returns { ty },
                    TagKind::Raises => TagBody::Raises { ty },
                    _ => TagBody::Throws { ty },
                };
                Some((body, details(captures.name("details"))))
            }
            TagKind::Yields => {
                let captures = YIELDS.captures(remainder)?;
                let block = captures["block"].to_string();
                Some((TagBody::Yields { block }, details(captures.name("details"))))
            }
            TagKind::Pragma => Some((TagBody::Pragma, details_str(remainder))),
            TagKind::Rbs => {
                if remainder.is_empty() {
                    return None;
                }
                Some((
                    TagBody::Rbs {
                        text: remainder.to_string(),
                    },
                    None,
                ))
            }
            TagKind::Example => Some((
                TagBody::Example {
                    title: details_str(remainder),
                },
                None,
            )),
        }
    }
}

fn details(capture: Option<regex::Match<'_>>) -> Option<String> {
    capture.and_then(|m| details_str(m.as_str()))
}

fn details_str(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

// ============================================================================
// Line Cursor
// ============================================================================

/// A read position within a slice of comment lines.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    position: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        LineCursor { lines, position: 0 }
    }

    /// The next unconsumed line.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).map(String::as_str)
    }

    /// Consume and return the next line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.position += 1;
        Some(line)
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.lines.len()
    }
}

// ============================================================================
// Tags Registry
// ============================================================================

/// Maps directive names to the tag kind that builds them.
#[derive(Debug, Clone, Default)]
pub struct Tags {
    directives: HashMap<String, TagKind>,
}

impl Tags {
    /// An empty registry: every directive is unknown.
    pub fn new() -> Self {
        Tags::default()
    }

    /// The directives shared by all languages.
    pub fn standard() -> Self {
        Tags::new()
            .with("attribute", TagKind::Attribute)
            .with("parameter", TagKind::Parameter)
            .with("option", TagKind::Option)
            .with("yields", TagKind::Yields)
            .with("returns", TagKind::Returns)
            .with("raises", TagKind::Raises)
            .with("throws", TagKind::Throws)
            .with("deprecated", TagKind::Pragma)
            .with("asynchronous", TagKind::Pragma)
            .with("public", TagKind::Pragma)
            .with("private", TagKind::Pragma)
            .with("reentrant", TagKind::Pragma)
            .with("blocking", TagKind::Pragma)
            .with("example", TagKind::Example)
            .with("rbs", TagKind::Rbs)
    }

    /// Register `directive` with `kind`, replacing any previous registration.
    pub fn with(mut self, directive: impl Into<String>, kind: TagKind) -> Self {
        self.insert(directive, kind);
        self
    }

    pub fn insert(&mut self, directive: impl Into<String>, kind: TagKind) {
        self.directives.insert(directive.into(), kind);
    }

    pub fn get(&self, directive: &str) -> Option<TagKind> {
        self.directives.get(directive).copied()
    }

    /// Parse complete comment lines into top-level nodes.
    pub fn parse(&self, lines: &[String]) -> Vec<Node> {
        let mut cursor = LineCursor::new(lines);
        self.parse_level(&mut cursor, 0)
    }

    /// Parse nodes at `level`, stopping at the first line indented less.
    ///
    /// The cursor is left on the first line that was not consumed.
    pub fn parse_level(&self, cursor: &mut LineCursor<'_>, level: usize) -> Vec<Node> {
        let mut nodes = Vec::new();

        while let Some(line) = cursor.peek() {
            if !valid_indentation(line, level) {
                break;
            }
            cursor.advance();

            let Some(captures) = DIRECTIVE.captures(line) else {
                nodes.push(Node::Text(Text::new(line)));
                continue;
            };

            let directive = &captures["directive"];
            let remainder = captures.name("remainder").map_or("", |m| m.as_str());

            let built = self
                .get(directive)
                .and_then(|kind| kind.build(remainder));

            match built {
                Some((body, details)) => {
                    let mut tag = Tag::new(directive, body);
                    if let Some(details) = details {
                        tag.children.push(Node::Text(Text::new(details)));
                    }
                    tag.children.extend(self.parse_level(cursor, level + 1));
                    nodes.push(Node::Tag(tag));
                }
                None => self.skip_level(cursor, level + 1),
            }
        }

        nodes
    }

    /// Consume every line nested at `level` or deeper without producing nodes.
    fn skip_level(&self, cursor: &mut LineCursor<'_>, level: usize) {
        while let Some(line) = cursor.peek() {
            if !valid_indentation(line, level) {
                break;
            }
            cursor.advance();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
