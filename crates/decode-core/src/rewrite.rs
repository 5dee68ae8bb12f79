//! Code-link rewriting: `{Reference}` spans in documentation text.
//!
//! References are parsed in the language of the definition the text belongs
//! to and resolved relative to it. Unresolved links are kept, so renderers
//! can decide how to show them.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::definition::{Definition, DefinitionId};
use crate::index::Index;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?P<reference>[^{}\s][^{}]*)\}").unwrap());

/// A piece of rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "segment", rename_all = "snake_case")]
pub enum LinkSegment {
    /// Literal text between links.
    Text { text: String },
    /// A `{Reference}` span and what it resolved to.
    Link {
        reference: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<DefinitionId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        qualified_name: Option<String>,
    },
}

impl LinkSegment {
    pub fn is_resolved(&self) -> bool {
        matches!(self, LinkSegment::Link { target: Some(_), .. })
    }
}

/// Split `text` into literal and link segments, resolving each link from
/// the scope of `definition`.
pub fn rewrite(index: &Index, definition: &Definition, text: &str) -> Vec<LinkSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for captures in LINK.captures_iter(text) {
        let (Some(whole), Some(reference)) = (captures.get(0), captures.name("reference")) else {
            continue;
        };
        if whole.start() > last {
            segments.push(LinkSegment::Text {
                text: text[last..whole.start()].to_string(),
            });
        }

        let parsed = index.reference_for(definition, reference.as_str());
        let resolved = index.lookup(&parsed, Some(definition));
        segments.push(LinkSegment::Link {
            reference: reference.as_str().to_string(),
            target: resolved.and_then(Definition::id),
            qualified_name: resolved.map(|found| found.qualified_name().to_string()),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(LinkSegment::Text {
            text: text[last..].to_string(),
        });
    }
    segments
}

/// Render segments back to text, formatting links with `link`.
pub fn render(segments: &[LinkSegment], mut link: impl FnMut(&str, Option<&str>) -> String) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            LinkSegment::Text { text } => out.push_str(text),
            LinkSegment::Link {
                reference,
                qualified_name,
                ..
            } => out.push_str(&link(reference, qualified_name.as_deref())),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
