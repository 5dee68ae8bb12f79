//! Textual references to definitions, e.g. `Foo::Bar#baz`.
//!
//! A reference is split by its language into `(prefix, name)` segments. The
//! names key trie lookups; the prefixes only break ties between candidates
//! sharing a path.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::definition::Definition;

static GENERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\W+)?(\w+)").unwrap());

// ============================================================================
// Segment
// ============================================================================

/// One `(prefix, name)` component of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The separator before the name, e.g. `::`, `#` or `.`.
    pub prefix: Option<String>,
    pub name: String,
}

impl Segment {
    pub fn new(prefix: Option<&str>, name: impl Into<String>) -> Self {
        Segment {
            prefix: prefix.map(str::to_string),
            name: name.into(),
        }
    }
}

/// Split `text` with `pattern`, whose first group captures the optional
/// prefix and second group the name.
pub fn split_with(pattern: &Regex, text: &str) -> Vec<Segment> {
    pattern
        .captures_iter(text)
        .filter_map(|captures| {
            let name = captures.get(2)?.as_str();
            let prefix = captures.get(1).map(|m| m.as_str());
            Some(Segment::new(prefix, name))
        })
        .collect()
}

/// Split on runs of non-word characters.
pub fn split_generic(text: &str) -> Vec<Segment> {
    split_with(&GENERIC_SEGMENT, text)
}

// ============================================================================
// Reference
// ============================================================================

/// A parsed reference in a particular language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// The reference as written.
    pub identifier: String,
    /// Name of the language whose rules split it.
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Reference {
    /// Build a reference from already split segments.
    pub fn new(
        identifier: impl Into<String>,
        language: impl Into<String>,
        segments: Vec<Segment>,
    ) -> Self {
        Reference {
            identifier: identifier.into(),
            language: language.into(),
            segments,
        }
    }

    /// A reference split with the generic rule.
    pub fn generic(identifier: impl Into<String>, language: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let segments = split_generic(&identifier);
        Reference::new(identifier, language, segments)
    }

    /// Segment names, in order.
    pub fn path(&self) -> Vec<&str> {
        self.segments
            .iter()
            .map(|segment| segment.name.as_str())
            .collect()
    }

    /// Whether resolution starts at the root instead of the current scope.
    pub fn is_absolute(&self) -> bool {
        self.segments
            .first()
            .is_some_and(|segment| segment.prefix.is_some())
    }

    /// The prefix of the final segment.
    pub fn trailing_prefix(&self) -> Option<&str> {
        self.segments.last().and_then(|segment| segment.prefix.as_deref())
    }

    /// Choose among definitions sharing the referenced path.
    ///
    /// Preference, in order: a same-language candidate whose nested name
    /// starts with the trailing prefix; the first same-language candidate
    /// when the trailing segment has no prefix; the first candidate overall.
    pub fn best<'a>(&self, candidates: &[&'a Definition]) -> Option<&'a Definition> {
        let prefix = self.trailing_prefix();
        let mut first_same_language = None;

        for &candidate in candidates {
            if candidate.language != self.language {
                continue;
            }
            match prefix {
                Some(prefix) => {
                    if candidate.nested_name().starts_with(prefix) {
                        return Some(candidate);
                    }
                }
                None => {
                    first_same_language.get_or_insert(candidate);
                }
            }
        }

        first_same_language.or_else(|| candidates.first().copied())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

// ============================================================================
// Tests
// ============================================================================
