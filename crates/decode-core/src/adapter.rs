//! Language adapter trait and intermediate data types.
//!
//! This module defines the [`LanguageAdapter`] trait for pluggable language
//! front ends, along with the intermediate data types used to pass extracted
//! definitions to the [`Index`](crate::index::Index).
//!
//! # ID Ownership
//!
//! - **Adapters do NOT allocate IDs** ([`DefinitionId`](crate::definition::DefinitionId))
//! - Adapters use local indices (`usize`) for parent links within a file:
//!   `parent_index` is an index into `FileDefinitions.definitions`
//! - The index owns ID allocation when it publishes definitions
//!
//! # Deterministic Ordering
//!
//! `FileDefinitions.definitions` is in document order, and every parent
//! precedes its children. A `parent_index` that does not refer to an earlier
//! entry is a contract violation, reported as
//! [`DecodeError::InvalidParent`].
//!
//! ## Example
//!
//! ```
//! use decode_core::adapter::{DefinitionData, FileDefinitions};
//! use decode_core::definition::DefinitionKind;
//!
//! let mut file = FileDefinitions::new("lib/widget.rb");
//! let widget = file.push(DefinitionData::new(["Widget"], DefinitionKind::Module));
//! file.push(
//!     DefinitionData::new(["frobnicate"], DefinitionKind::Method { receiver: None, arguments: None })
//!         .with_parent_index(widget)
//!         .with_comments(vec!["Frobnicate the widget.".to_string()]),
//! );
//!
//! assert_eq!(file.definitions.len(), 2);
//! assert!(file.validate().is_ok());
//! ```

use std::path::Path;

use crate::comment::Tags;
use crate::definition::{DefinitionKind, Kind};
use crate::error::{DecodeError, DecodeResult};
use crate::reference::{split_generic, Reference, Segment};
use crate::source::Source;
use crate::types::Visibility;

// ============================================================================
// Definition Data (Adapter Output)
// ============================================================================

/// A definition as extracted by a front end, before publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionData {
    /// Path segments relative to the parent.
    pub path: Vec<String>,
    /// Index of the parent within the same [`FileDefinitions`].
    pub parent_index: Option<usize>,
    pub kind: DefinitionKind,
    /// Comment lines with comment markers removed.
    pub comments: Option<Vec<String>>,
    pub visibility: Visibility,
    /// 1-indexed line of the definition.
    pub line: Option<u32>,
}

impl DefinitionData {
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>, kind: DefinitionKind) -> Self {
        DefinitionData {
            path: path.into_iter().map(Into::into).collect(),
            parent_index: None,
            kind,
            comments: None,
            visibility: Visibility::Public,
            line: None,
        }
    }

    pub fn with_parent_index(mut self, parent_index: usize) -> Self {
        self.parent_index = Some(parent_index);
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = Some(comments);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Reinterpret the extracted kind, see [`DefinitionKind::convert`].
    pub fn convert(mut self, target: Kind) -> DecodeResult<Self> {
        self.kind = self.kind.convert(target)?;
        Ok(self)
    }
}

/// All definitions extracted from one file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDefinitions {
    /// File path as given to the adapter.
    pub path: String,
    pub definitions: Vec<DefinitionData>,
}

impl FileDefinitions {
    pub fn new(path: impl Into<String>) -> Self {
        FileDefinitions {
            path: path.into(),
            definitions: Vec::new(),
        }
    }

    /// Append a definition and return its index.
    pub fn push(&mut self, definition: DefinitionData) -> usize {
        self.definitions.push(definition);
        self.definitions.len() - 1
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DefinitionData> {
        self.definitions.get_mut(index)
    }

    /// Check that every parent index refers to an earlier definition.
    pub fn validate(&self) -> DecodeResult<()> {
        for (index, definition) in self.definitions.iter().enumerate() {
            if let Some(parent) = definition.parent_index {
                if parent >= index {
                    return Err(DecodeError::InvalidParent { index, parent });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Language Adapter Trait
// ============================================================================

/// A language front end.
///
/// Adapters extract definitions from a single source file in isolation and
/// supply the language-specific rules the index needs: comment tags and
/// reference splitting.
pub trait LanguageAdapter {
    /// Canonical language name, e.g. `ruby`.
    fn name(&self) -> &str;

    /// Additional names the language can be referred to by.
    fn names(&self) -> &[&str] {
        &[]
    }

    /// File extensions (without the dot) handled by this adapter.
    fn extensions(&self) -> &[&str];

    /// The directive registry used to parse this language's comments.
    fn tags(&self) -> &Tags;

    /// Split a textual reference into segments.
    fn split(&self, text: &str) -> Vec<Segment> {
        split_generic(text)
    }

    /// Parse a textual reference in this language.
    fn reference_for(&self, identifier: &str) -> Reference {
        Reference::new(identifier, self.name(), self.split(identifier))
    }

    /// Extract the definitions of one source file.
    fn extract(&self, source: &Source) -> DecodeResult<FileDefinitions>;

    /// Whether this adapter handles the given file, by extension.
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.extensions().contains(&extension))
    }

    /// Whether `name` is the canonical name or an alias of this language.
    fn is_named(&self, name: &str) -> bool {
        self.name() == name || self.names().contains(&name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> DefinitionData {
        DefinitionData::new([name], DefinitionKind::Module)
    }

    #[test]
    fn push_returns_index() {
        let mut file = FileDefinitions::new("a.rb");
        assert_eq!(file.push(module("A")), 0);
        assert_eq!(file.push(module("B").with_parent_index(0)), 1);
        assert!(file.validate().is_ok());
    }

    #[test]
    fn forward_parent_is_invalid() {
        let mut file = FileDefinitions::new("a.rb");
        file.push(module("A").with_parent_index(1));
        file.push(module("B"));
        let err = file.validate().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidParent { index: 0, parent: 1 }));
    }

    #[test]
    fn self_parent_is_invalid() {
        let mut file = FileDefinitions::new("a.rb");
        file.push(module("A").with_parent_index(0));
        assert!(file.validate().is_err());
    }

    #[test]
    fn convert_call_to_attribute() {
        let data = DefinitionData::new(
            ["timeout"],
            DefinitionKind::Call {
                call: "setting".to_string(),
                arguments: Some(":timeout".to_string()),
            },
        )
        .with_line(3)
        .convert(Kind::Attribute)
        .unwrap();
        assert_eq!(data.kind, DefinitionKind::Attribute { accessor: None });
        assert_eq!(data.line, Some(3));
    }

    #[test]
    fn convert_class_fails() {
        let result = DefinitionData::new(["A"], DefinitionKind::Class { super_class: None })
            .convert(Kind::Module);
        assert!(matches!(
            result,
            Err(DecodeError::UnsupportedConversion {
                from: Kind::Class,
                to: Kind::Module
            })
        ));
    }
}
