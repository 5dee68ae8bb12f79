//! Definitions: named, located program elements and the arena that owns them.
//!
//! A [`Definition`] is built by a front end (see [`crate::adapter`]) and
//! published into a [`Definitions`] arena. Parent links are arena indices
//! ([`DefinitionId`]), never owning pointers. Publishing computes the derived
//! names once:
//!
//! - `full_path`: the parent's full path followed by this definition's path
//! - `nested_name`: the kind-specific rendering of the path (`::Name`,
//!   `#name`, `.name`)
//! - `qualified_name`: the parent's qualified name followed by the nested
//!   name, with a leading `::` dropped at the root
//!
//! Definitions are immutable once published.

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::comment::Tags;
use crate::documentation::Documentation;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{Location, Visibility};

// ============================================================================
// ID Type
// ============================================================================

/// Index of a definition within a [`Definitions`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct DefinitionId(pub u32);

impl DefinitionId {
    /// Create a new definition ID.
    pub fn new(id: u32) -> Self {
        DefinitionId(id)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def_{}", self.0)
    }
}

// ============================================================================
// Kinds
// ============================================================================

/// The kind of a definition, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Class,
    Module,
    Singleton,
    Method,
    Function,
    Attribute,
    Constant,
    Alias,
    Block,
    Call,
    Scope,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Module => "module",
            Kind::Singleton => "singleton",
            Kind::Method => "method",
            Kind::Function => "function",
            Kind::Attribute => "attribute",
            Kind::Constant => "constant",
            Kind::Alias => "alias",
            Kind::Block => "block",
            Kind::Call => "call",
            Kind::Scope => "scope",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a DSL block was delimited in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockDelimiter {
    /// `call do ... end`
    DoEnd,
    /// `call { ... }`
    Braces,
}

/// Kind-specific data of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionKind {
    Class {
        super_class: Option<String>,
    },
    Module,
    /// A singleton class body (`class << self`). Transparent: its path is
    /// empty, so its children share the enclosing full path.
    Singleton {
        target: String,
    },
    Method {
        receiver: Option<String>,
        arguments: Option<String>,
    },
    /// A module function, callable on the module itself.
    Function {
        arguments: Option<String>,
    },
    Attribute {
        accessor: Option<String>,
    },
    Constant {
        value: Option<String>,
    },
    Alias {
        old_name: String,
    },
    /// A DSL call with a block.
    Block {
        call: String,
        arguments: Option<String>,
        delimiter: BlockDelimiter,
    },
    /// A DSL call without a block.
    Call {
        call: String,
        arguments: Option<String>,
    },
    /// A synthetic namespace introduced by an `@scope` comment.
    Scope,
}

impl DefinitionKind {
    pub fn kind(&self) -> Kind {
        match self {
            DefinitionKind::Class { .. } => Kind::Class,
            DefinitionKind::Module => Kind::Module,
            DefinitionKind::Singleton { .. } => Kind::Singleton,
            DefinitionKind::Method { .. } => Kind::Method,
            DefinitionKind::Function { .. } => Kind::Function,
            DefinitionKind::Attribute { .. } => Kind::Attribute,
            DefinitionKind::Constant { .. } => Kind::Constant,
            DefinitionKind::Alias { .. } => Kind::Alias,
            DefinitionKind::Block { .. } => Kind::Block,
            DefinitionKind::Call { .. } => Kind::Call,
            DefinitionKind::Scope => Kind::Scope,
        }
    }

    /// Reinterpret this kind as `target`.
    ///
    /// Supported: identity, Block or Call into Attribute, Block into Call and
    /// Call into Block (as a `do ... end` block).
    pub fn convert(&self, target: Kind) -> DecodeResult<DefinitionKind> {
        let from = self.kind();
        if from == target {
            return Ok(self.clone());
        }
        match (self, target) {
            (DefinitionKind::Block { .. } | DefinitionKind::Call { .. }, Kind::Attribute) => {
                Ok(DefinitionKind::Attribute { accessor: None })
            }
            (DefinitionKind::Block { call, arguments, .. }, Kind::Call) => {
                Ok(DefinitionKind::Call {
                    call: call.clone(),
                    arguments: arguments.clone(),
                })
            }
            (DefinitionKind::Call { call, arguments }, Kind::Block) => Ok(DefinitionKind::Block {
                call: call.clone(),
                arguments: arguments.clone(),
                delimiter: BlockDelimiter::DoEnd,
            }),
            _ => Err(DecodeError::UnsupportedConversion { from, to: target }),
        }
    }
}

// ============================================================================
// Container Policy
// ============================================================================

/// Which block delimiters make a Block definition a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerPolicy {
    pub delimiters: Vec<BlockDelimiter>,
}

impl ContainerPolicy {
    pub fn new(delimiters: Vec<BlockDelimiter>) -> Self {
        ContainerPolicy { delimiters }
    }

    pub fn allows(&self, delimiter: BlockDelimiter) -> bool {
        self.delimiters.contains(&delimiter)
    }
}

impl Default for ContainerPolicy {
    fn default() -> Self {
        ContainerPolicy::new(vec![BlockDelimiter::DoEnd])
    }
}

// ============================================================================
// Definition
// ============================================================================

/// A named program element.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Path segments relative to the parent.
    pub path: Vec<String>,
    /// The lexically enclosing definition.
    pub parent: Option<DefinitionId>,
    /// Kind-specific data.
    pub kind: DefinitionKind,
    /// Name of the language that produced this definition.
    pub language: String,
    /// Raw comment lines preceding the definition.
    pub comments: Option<Vec<String>>,
    pub visibility: Visibility,
    /// Path of the file the definition was extracted from.
    pub source: Option<String>,
    /// Diagnostic location; never used for resolution.
    pub location: Option<Location>,
    id: Option<DefinitionId>,
    full_path: Vec<String>,
    prefix: String,
    parent_kind: Option<Kind>,
    nested_name: String,
    qualified_name: String,
    documentation: OnceCell<Option<Documentation>>,
}

impl Definition {
    /// Create an unpublished definition. Derived names are computed when it
    /// is inserted into a [`Definitions`] arena.
    pub fn new<S: Into<String>>(
        path: impl IntoIterator<Item = S>,
        kind: DefinitionKind,
        language: impl Into<String>,
    ) -> Self {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        let nested_name = render_nested_name(&kind, &path, None);
        let qualified_name = qualify("", &nested_name);
        Definition {
            full_path: path.clone(),
            path,
            parent: None,
            kind,
            language: language.into(),
            comments: None,
            visibility: Visibility::Public,
            source: None,
            location: None,
            id: None,
            prefix: String::new(),
            parent_kind: None,
            nested_name,
            qualified_name,
            documentation: OnceCell::new(),
        }
    }

    /// Set the parent definition.
    pub fn with_parent(mut self, parent: DefinitionId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the comment lines.
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the originating file.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the diagnostic location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Arena index, once published.
    pub fn id(&self) -> Option<DefinitionId> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    pub fn full_path(&self) -> &[String] {
        &self.full_path
    }

    pub fn nested_name(&self) -> &str {
        &self.nested_name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The prefix children qualify their names with. A singleton class is
    /// transparent, so its children use the enclosing definition's name.
    fn child_prefix(&self) -> &str {
        match self.kind {
            DefinitionKind::Singleton { .. } => &self.prefix,
            _ => &self.qualified_name,
        }
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    /// Whether the definition carries non-empty comments.
    pub fn is_documented(&self) -> bool {
        self.comments.as_ref().is_some_and(|lines| !lines.is_empty())
    }

    /// Whether the definition is part of the public interface.
    pub fn is_public(&self) -> bool {
        match self.kind {
            DefinitionKind::Method { .. }
            | DefinitionKind::Function { .. }
            | DefinitionKind::Attribute { .. }
            | DefinitionKind::Alias { .. } => self.visibility == Visibility::Public,
            _ => true,
        }
    }

    /// Whether the definition can contain other definitions, under the
    /// default [`ContainerPolicy`].
    pub fn is_container(&self) -> bool {
        self.is_container_with(&ContainerPolicy::default())
    }

    pub fn is_container_with(&self, policy: &ContainerPolicy) -> bool {
        match &self.kind {
            DefinitionKind::Class { .. }
            | DefinitionKind::Module
            | DefinitionKind::Singleton { .. }
            | DefinitionKind::Scope => true,
            DefinitionKind::Block { delimiter, .. } => policy.allows(*delimiter),
            _ => false,
        }
    }

    /// Whether the definition has no source text of its own to document.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self.kind,
            DefinitionKind::Singleton { .. } | DefinitionKind::Scope
        )
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// A short human-readable form, e.g. `def frobnicate`.
    pub fn short_form(&self) -> Option<String> {
        let name = self.path.join("::");
        let form = match &self.kind {
            DefinitionKind::Class { .. } => format!("class {}", name),
            DefinitionKind::Module => format!("module {}", name),
            DefinitionKind::Singleton { target } => format!("class << {}", target),
            DefinitionKind::Method { receiver, .. } => match receiver {
                Some(receiver) => format!("def {}.{}", receiver, name),
                None => format!("def {}", name),
            },
            DefinitionKind::Function { .. } => format!("def {}", name),
            DefinitionKind::Attribute { accessor } => match accessor {
                Some(accessor) => format!("{} :{}", accessor, name),
                None => name,
            },
            DefinitionKind::Constant { .. } => name,
            DefinitionKind::Alias { old_name } => format!("alias {} {}", name, old_name),
            DefinitionKind::Block { call, .. } | DefinitionKind::Call { call, .. } => {
                if *call == name {
                    name
                } else {
                    format!("{} {}", call, name)
                }
            }
            DefinitionKind::Scope => return None,
        };
        Some(form)
    }

    /// A long form including arguments, values and superclasses.
    pub fn long_form(&self) -> Option<String> {
        let name = self.path.join("::");
        let form = match &self.kind {
            DefinitionKind::Class {
                super_class: Some(super_class),
            } => format!("class {} < {}", name, super_class),
            DefinitionKind::Method {
                arguments: Some(arguments),
                receiver,
            } => match receiver {
                Some(receiver) => format!("def {}.{}{}", receiver, name, arguments),
                None => format!("def {}{}", name, arguments),
            },
            DefinitionKind::Function {
                arguments: Some(arguments),
            } => format!("def {}{}", name, arguments),
            DefinitionKind::Constant { value: Some(value) } => format!("{} = {}", name, value),
            DefinitionKind::Block {
                call,
                arguments,
                delimiter,
            } => {
                let head = match arguments {
                    Some(arguments) => format!("{} {}", call, arguments),
                    None => call.clone(),
                };
                match delimiter {
                    BlockDelimiter::DoEnd => format!("{} do ... end", head),
                    BlockDelimiter::Braces => format!("{} {{ ... }}", head),
                }
            }
            DefinitionKind::Call {
                call,
                arguments: Some(arguments),
            } => format!("{} {}", call, arguments),
            _ => return self.short_form(),
        };
        Some(form)
    }

    /// The long form with the name replaced by the qualified name.
    pub fn qualified_form(&self) -> Option<String> {
        let qualified = self.qualified_name.as_str();
        let form = match &self.kind {
            DefinitionKind::Class { super_class } => match super_class {
                Some(super_class) => format!("class {} < {}", qualified, super_class),
                None => format!("class {}", qualified),
            },
            DefinitionKind::Module => format!("module {}", qualified),
            DefinitionKind::Method { arguments, .. } | DefinitionKind::Function { arguments } => {
                format!("def {}{}", qualified, arguments.as_deref().unwrap_or(""))
            }
            DefinitionKind::Constant { value: Some(value) } => {
                format!("{} = {}", qualified, value)
            }
            DefinitionKind::Constant { value: None } => qualified.to_string(),
            _ => return self.long_form(),
        };
        Some(form)
    }

    // ------------------------------------------------------------------------
    // Conversion and Documentation
    // ------------------------------------------------------------------------

    /// A copy of this definition reinterpreted as `target`, with its nested
    /// and qualified names re-rendered for the new kind.
    pub fn convert(&self, target: Kind) -> DecodeResult<Definition> {
        let kind = self.kind.convert(target)?;
        let mut converted = self.clone();
        converted.nested_name = render_nested_name(&kind, &converted.path, converted.parent_kind);
        converted.qualified_name = qualify(&converted.prefix, &converted.nested_name);
        converted.kind = kind;
        converted.documentation = OnceCell::new();
        Ok(converted)
    }

    /// The parsed documentation, built on first access and cached.
    ///
    /// Returns `None` for undocumented definitions.
    pub fn documentation(&self, tags: &Tags) -> Option<&Documentation> {
        self.documentation
            .get_or_init(|| {
                let comments = self.comments.as_ref().filter(|lines| !lines.is_empty())?;
                Some(Documentation::new(comments.clone(), &self.language, tags))
            })
            .as_ref()
    }
}

/// Render the nested name of a definition of `kind` with relative `path`.
///
/// `parent` is the kind of the enclosing definition, which decides whether a
/// method is rendered as an instance (`#`) or singleton (`.`) method.
fn render_nested_name(kind: &DefinitionKind, path: &[String], parent: Option<Kind>) -> String {
    let name = path.join("::");
    match kind {
        DefinitionKind::Singleton { .. } => "::class".to_string(),
        DefinitionKind::Method { receiver, .. } => {
            if receiver.is_some() || parent == Some(Kind::Singleton) {
                format!(".{}", name)
            } else {
                format!("#{}", name)
            }
        }
        DefinitionKind::Function { .. } => format!(".{}", name),
        DefinitionKind::Attribute { .. } | DefinitionKind::Alias { .. } => format!("#{}", name),
        _ => format!("::{}", name),
    }
}

fn qualify(prefix: &str, nested_name: &str) -> String {
    if prefix.is_empty() {
        nested_name
            .strip_prefix("::")
            .unwrap_or(nested_name)
            .to_string()
    } else {
        format!("{}{}", prefix, nested_name)
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Owns every published definition; indexed by [`DefinitionId`].
#[derive(Debug, Default)]
pub struct Definitions {
    definitions: Vec<Definition>,
}

impl Definitions {
    pub fn new() -> Self {
        Definitions::default()
    }

    /// Publish a definition: assign its ID and compute its derived names
    /// from the (already published) parent.
    ///
    /// A parent ID that is not in the arena is a contract violation.
    pub fn insert(&mut self, mut definition: Definition) -> DecodeResult<DefinitionId> {
        let index = self.definitions.len();
        let id = DefinitionId::new(index as u32);

        let (prefix, full_path, parent_kind) = match definition.parent {
            Some(parent_id) => {
                let parent = self.get(parent_id).ok_or(DecodeError::InvalidParent {
                    index,
                    parent: parent_id.index(),
                })?;
                let mut full_path = parent.full_path.clone();
                full_path.extend(definition.path.iter().cloned());
                (
                    parent.child_prefix().to_string(),
                    full_path,
                    Some(parent.kind.kind()),
                )
            }
            None => (String::new(), definition.path.clone(), None),
        };

        definition.nested_name = render_nested_name(&definition.kind, &definition.path, parent_kind);
        definition.qualified_name = qualify(&prefix, &definition.nested_name);
        definition.prefix = prefix;
        definition.parent_kind = parent_kind;
        definition.full_path = full_path;
        definition.id = Some(id);

        self.definitions.push(definition);
        Ok(id)
    }

    pub fn get(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.index())
    }

    pub fn parent(&self, definition: &Definition) -> Option<&Definition> {
        definition.parent.and_then(|id| self.get(id))
    }

    /// The chain of enclosing definitions, innermost first.
    pub fn ancestors(&self, id: DefinitionId) -> impl Iterator<Item = &Definition> {
        let mut current = self.get(id).and_then(|definition| definition.parent);
        std::iter::from_fn(move || {
            let definition = self.get(current?)?;
            current = definition.parent;
            Some(definition)
        })
    }

    /// All definitions in publication order.
    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (DefinitionId::new(index as u32), definition))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
