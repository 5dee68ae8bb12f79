//! Registry of language adapters.

use std::collections::HashMap;
use std::path::Path;

use crate::adapter::{FileDefinitions, LanguageAdapter};
use crate::comment::Tags;
use crate::error::{DecodeError, DecodeResult};
use crate::reference::Reference;
use crate::source::Source;

/// Name used for references that do not name a language.
pub const GENERIC: &str = "generic";

// ============================================================================
// Generic Language
// ============================================================================

/// A language with the standard tags and generic reference splitting, but
/// no extraction of its own.
#[derive(Debug, Clone)]
pub struct Generic {
    name: String,
    extensions: Vec<&'static str>,
    tags: Tags,
}

impl Generic {
    pub fn new(name: impl Into<String>) -> Self {
        Generic {
            name: name.into(),
            extensions: Vec::new(),
            tags: Tags::standard(),
        }
    }

    pub fn with_extensions(mut self, extensions: &[&'static str]) -> Self {
        self.extensions = extensions.to_vec();
        self
    }
}

impl LanguageAdapter for Generic {
    fn name(&self) -> &str {
        &self.name
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn extract(&self, source: &Source) -> DecodeResult<FileDefinitions> {
        Ok(FileDefinitions::new(source.display_path()))
    }
}

// ============================================================================
// Languages
// ============================================================================

/// The set of languages an index understands.
#[derive(Default)]
pub struct Languages {
    adapters: Vec<Box<dyn LanguageAdapter>>,
    by_name: HashMap<String, usize>,
    by_extension: HashMap<String, usize>,
}

impl std::fmt::Debug for Languages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Languages")
            .field("names", &self.adapters.iter().map(|a| a.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Languages {
    pub fn new() -> Self {
        Languages::default()
    }

    /// Register an adapter under its name, aliases and extensions.
    ///
    /// A later registration wins for any name or extension it shares with
    /// an earlier one.
    pub fn add(&mut self, adapter: impl LanguageAdapter + 'static) {
        let index = self.adapters.len();
        self.by_name.insert(adapter.name().to_string(), index);
        for name in adapter.names() {
            self.by_name.insert(name.to_string(), index);
        }
        for extension in adapter.extensions() {
            self.by_extension.insert(extension.to_string(), index);
        }
        self.adapters.push(Box::new(adapter));
    }

    pub fn with(mut self, adapter: impl LanguageAdapter + 'static) -> Self {
        self.add(adapter);
        self
    }

    /// The adapter registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn LanguageAdapter> {
        self.by_name
            .get(name)
            .map(|&index| self.adapters[index].as_ref())
    }

    /// Like [`Languages::get`], but unknown names are an error.
    pub fn fetch(&self, name: &str) -> DecodeResult<&dyn LanguageAdapter> {
        self.get(name)
            .ok_or_else(|| DecodeError::unknown_language(name))
    }

    /// The adapter for a file, chosen by extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn LanguageAdapter> {
        let extension = path.extension()?.to_str()?;
        self.by_extension
            .get(extension)
            .map(|&index| self.adapters[index].as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LanguageAdapter> {
        self.adapters.iter().map(|adapter| adapter.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Parse a reference that may start with a language name, e.g.
    /// `ruby Foo::Bar`.
    ///
    /// Without a known leading language name, the whole text is split with
    /// the generic rule and attributed to [`GENERIC`].
    pub fn parse_reference(&self, text: &str) -> Reference {
        let text = text.trim();
        if let Some((name, rest)) = text.split_once(char::is_whitespace) {
            if let Some(adapter) = self.get(name) {
                return adapter.reference_for(rest.trim());
            }
        }
        Reference::generic(text, GENERIC)
    }
}

// ============================================================================
// Tests
// ============================================================================
