//! The symbol index: sources, published definitions, and the lexical trie.
//!
//! # Publication
//!
//! For every file, the matching [`LanguageAdapter`] extracts a
//! [`FileDefinitions`](crate::adapter::FileDefinitions). Each entry is
//! published in document order:
//!
//! 1. Into the [`Definitions`] arena, which computes its derived names
//! 2. Into the flat qualified-name map (the last writer wins)
//! 3. Into the trie under its full lexical path (values accumulate)
//!
//! # Resolution
//!
//! [`Index::lookup`] walks outwards from the scope of the definition a
//! reference appears in. The first scope that has the reference's first
//! segment as a direct child decides the outcome: either the full reference
//! path resolves beneath it, or resolution fails without trying outer
//! scopes. This is how inner names shadow outer ones.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::adapter::LanguageAdapter;
use crate::comment::Tags;
use crate::definition::{Definition, DefinitionId, Definitions};
use crate::documentation::Documentation;
use crate::error::DecodeResult;
use crate::language::Languages;
use crate::reference::Reference;
use crate::source::Source;
use crate::trie::Trie;
use crate::types::Location;

/// A queryable index of definitions across many source files.
#[derive(Debug)]
pub struct Index {
    languages: Languages,
    sources: IndexMap<String, Source>,
    definitions: IndexMap<String, DefinitionId>,
    arena: Definitions,
    trie: Trie<DefinitionId>,
    fallback_tags: Tags,
}

impl Index {
    pub fn new(languages: Languages) -> Self {
        Index {
            languages,
            sources: IndexMap::new(),
            definitions: IndexMap::new(),
            arena: Definitions::new(),
            trie: Trie::new(),
            fallback_tags: Tags::standard(),
        }
    }

    // ------------------------------------------------------------------------
    // Updating
    // ------------------------------------------------------------------------

    /// Index every path whose extension belongs to a registered language.
    ///
    /// Files without a language are skipped. Returns the number of
    /// definitions published.
    pub fn update<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) -> DecodeResult<usize> {
        let mut count = 0;
        for path in paths {
            let path = path.as_ref();
            let Some(adapter) = self.languages.for_path(path) else {
                debug!(path = %path.display(), "skipping file with no registered language");
                continue;
            };
            let source = Source::new(path, adapter.name());
            count += self.update_source(source)?;
        }
        Ok(count)
    }

    /// Extract and publish the definitions of one source.
    ///
    /// Returns the number of definitions published.
    pub fn update_source(&mut self, source: Source) -> DecodeResult<usize> {
        let adapter = self.languages.fetch(&source.language)?;
        let language = adapter.name().to_string();
        let file = adapter.extract(&source)?;
        file.validate()?;

        let mut ids: Vec<DefinitionId> = Vec::with_capacity(file.definitions.len());
        for data in file.definitions {
            let mut definition = Definition::new(data.path, data.kind, language.as_str())
                .with_visibility(data.visibility)
                .with_source(file.path.as_str());
            if let Some(comments) = data.comments {
                definition = definition.with_comments(comments);
            }
            if let Some(line) = data.line {
                definition = definition.with_location(Location::new(file.path.as_str(), line));
            }
            if let Some(parent) = data.parent_index {
                definition = definition.with_parent(ids[parent]);
            }

            let id = self.arena.insert(definition)?;
            if let Some(published) = self.arena.get(id) {
                trace!(qualified_name = published.qualified_name(), "published definition");
                self.definitions
                    .insert(published.qualified_name().to_string(), id);
                // The trie root never carries a value.
                if !published.full_path().is_empty() {
                    self.trie.insert(published.full_path(), id);
                }
            }
            ids.push(id);
        }

        debug!(path = %file.path, language = %language, definitions = ids.len(), "indexed file");
        self.sources.insert(file.path, source);
        Ok(ids.len())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// Indexed sources, keyed by path, in indexing order.
    pub fn sources(&self) -> &IndexMap<String, Source> {
        &self.sources
    }

    /// The flat map from qualified name to the definition last published
    /// under it.
    pub fn definitions(&self) -> &IndexMap<String, DefinitionId> {
        &self.definitions
    }

    pub fn arena(&self) -> &Definitions {
        &self.arena
    }

    pub fn trie(&self) -> &Trie<DefinitionId> {
        &self.trie
    }

    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.arena.get(id)
    }

    /// The definition last published under `qualified_name`.
    pub fn get(&self, qualified_name: &str) -> Option<&Definition> {
        let id = *self.definitions.get(qualified_name)?;
        self.arena.get(id)
    }

    /// Parsed documentation of a definition, using its language's tags.
    pub fn documentation(&self, id: DefinitionId) -> Option<&Documentation> {
        let definition = self.arena.get(id)?;
        let tags = self
            .languages
            .get(&definition.language)
            .map_or(&self.fallback_tags, |adapter| adapter.tags());
        definition.documentation(tags)
    }

    /// Parse `text` as a reference in the language of `definition`.
    pub fn reference_for(&self, definition: &Definition, text: &str) -> Reference {
        match self.languages.get(&definition.language) {
            Some(adapter) => adapter.reference_for(text),
            None => Reference::generic(text, definition.language.as_str()),
        }
    }

    /// Resolve `reference` as seen from inside `relative_to`.
    ///
    /// Absolute references, and references without a scope, resolve from
    /// the root.
    pub fn lookup(&self, reference: &Reference, relative_to: Option<&Definition>) -> Option<&Definition> {
        let path = reference.path();
        let first = *path.first()?;

        let mut scope: Vec<String> = match relative_to {
            Some(definition) if !reference.is_absolute() => definition.full_path().to_vec(),
            _ => Vec::new(),
        };

        loop {
            trace!(reference = %reference, scope = ?scope, "resolving");
            if let Some(node) = self.trie.lookup(scope.as_slice()) {
                if node.child(first).is_some() {
                    let ids = node.lookup(path.as_slice())?.values()?;
                    let candidates: Vec<&Definition> =
                        ids.iter().filter_map(|&id| self.arena.get(id)).collect();
                    return reference.best(&candidates);
                }
            }
            scope.pop()?;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
