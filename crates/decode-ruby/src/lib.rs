//! Ruby language support for decode.
//!
//! This crate provides the [`Ruby`] language adapter:
//! - Reference splitting on `::`, `.`, `#` and `:`
//! - Definition extraction from tree-sitter-ruby syntax trees
//! - Leading comment collection and visibility tracking

mod comments;
mod extract;

use std::sync::LazyLock;

use regex::Regex;

use decode_core::adapter::{FileDefinitions, LanguageAdapter};
use decode_core::comment::Tags;
use decode_core::reference::{split_with, Segment};
use decode_core::source::Source;
use decode_core::DecodeResult;

pub use extract::extract;

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(::|\.|#|:)?([^:.#]+)").unwrap());

/// The Ruby language adapter.
#[derive(Debug, Clone)]
pub struct Ruby {
    tags: Tags,
}

impl Ruby {
    pub fn new() -> Self {
        Ruby {
            tags: Tags::standard(),
        }
    }
}

impl Default for Ruby {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for Ruby {
    fn name(&self) -> &str {
        "ruby"
    }

    fn names(&self) -> &[&str] {
        &["rb"]
    }

    fn extensions(&self) -> &[&str] {
        &["rb", "rake", "gemspec", "ru"]
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn split(&self, text: &str) -> Vec<Segment> {
        split_with(&SEGMENT, text)
    }

    fn extract(&self, source: &Source) -> DecodeResult<FileDefinitions> {
        let content = source.read()?;
        extract(&source.display_path(), content)
    }
}

// ============================================================================
// Tests
// ============================================================================
