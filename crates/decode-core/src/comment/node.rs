//! Comment tree nodes: literal text lines and structured tags.

use serde::Serialize;

use super::tags::{valid_indentation, TagKind, INDENTATION};

// ============================================================================
// Node
// ============================================================================

/// A node in a parsed comment tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// A literal comment line.
    Text(Text),
    /// A structured directive with nested children.
    Tag(Tag),
}

impl Node {
    /// The tag, if this node is one.
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    /// The text line, if this node is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.line),
            Node::Tag(_) => None,
        }
    }

    /// Children of this node (text nodes have none).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Tag(tag) => &tag.children,
            Node::Text(_) => &[],
        }
    }

    /// Serialize this node back into comment lines at the given nesting level.
    ///
    /// Re-parsing the produced lines with the same [`super::Tags`] registry
    /// reproduces the same tree shape.
    pub fn to_lines(&self, level: usize) -> Vec<String> {
        let mut lines = Vec::new();
        self.write_lines(level, &mut lines);
        lines
    }

    fn write_lines(&self, level: usize, lines: &mut Vec<String>) {
        match self {
            Node::Text(text) => {
                if valid_indentation(&text.line, level) {
                    lines.push(text.line.clone());
                } else {
                    lines.push(format!("{}{}", INDENTATION.repeat(level), text.line));
                }
            }
            Node::Tag(tag) => {
                let remainder = tag.remainder();
                if remainder.is_empty() {
                    lines.push(format!("{}@{}", INDENTATION.repeat(level), tag.directive));
                } else {
                    lines.push(format!(
                        "{}@{} {}",
                        INDENTATION.repeat(level),
                        tag.directive,
                        remainder
                    ));
                }
                for child in &tag.children {
                    child.write_lines(level + 1, lines);
                }
            }
        }
    }
}

/// Serialize a sequence of top-level nodes back into comment lines.
pub fn to_lines(nodes: &[Node]) -> Vec<String> {
    nodes.iter().flat_map(|node| node.to_lines(0)).collect()
}

/// Visit every node depth-first, pre-order.
pub fn walk<'a>(nodes: &'a [Node], visitor: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        visitor(node);
        walk(node.children(), visitor);
    }
}

// ============================================================================
// Text
// ============================================================================

/// One literal comment line, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub line: String,
}

impl Text {
    pub fn new(line: impl Into<String>) -> Self {
        Text { line: line.into() }
    }
}

// ============================================================================
// Tag
// ============================================================================

/// A structured directive parsed from a comment line, e.g. `@parameter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// The directive as written (without `@`).
    pub directive: String,
    /// Kind-specific payload.
    pub body: TagBody,
    /// Nested nodes: the inline details (if any) followed by indented lines.
    pub children: Vec<Node>,
}

/// Kind-specific payload of a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagBody {
    /// `@parameter name [Type] details`
    Parameter { name: String, ty: String },
    /// `@option name [Type] details`, a keyword parameter.
    Option { name: String, ty: String },
    /// `@attribute [Type] details`
    Attribute { ty: String },
    /// `@returns [Type] details`
    Returns { ty: String },
    /// `@raises [Type] details`
    Raises { ty: String },
    /// `@throws [Type] details`
    Throws { ty: String },
    /// `@yields {|arguments| ...} details`
    Yields { block: String },
    /// A bare directive such as `@deprecated` or `@asynchronous`.
    Pragma,
    /// `@rbs signature`, raw inline type signature text.
    Rbs { text: String },
    /// `@example Title` followed by indented code.
    Example { title: Option<String> },
}

impl Tag {
    pub fn new(directive: impl Into<String>, body: TagBody) -> Self {
        Tag {
            directive: directive.into(),
            body,
            children: Vec::new(),
        }
    }

    /// The registry kind of this tag.
    pub fn kind(&self) -> TagKind {
        match &self.body {
            TagBody::Parameter { .. } => TagKind::Parameter,
            TagBody::Option { .. } => TagKind::Option,
            TagBody::Attribute { .. } => TagKind::Attribute,
            TagBody::Returns { .. } => TagKind::Returns,
            TagBody::Raises { .. } => TagKind::Raises,
            TagBody::Throws { .. } => TagKind::Throws,
            TagBody::Yields { .. } => TagKind::Yields,
            TagBody::Pragma => TagKind::Pragma,
            TagBody::Rbs { .. } => TagKind::Rbs,
            TagBody::Example { .. } => TagKind::Example,
        }
    }

    /// Parameter or option name.
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            TagBody::Parameter { name, .. } | TagBody::Option { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The bracketed type annotation, for kinds that carry one.
    pub fn type_annotation(&self) -> Option<&str> {
        match &self.body {
            TagBody::Parameter { ty, .. }
            | TagBody::Option { ty, .. }
            | TagBody::Attribute { ty }
            | TagBody::Returns { ty }
            | TagBody::Raises { ty }
            | TagBody::Throws { ty } => Some(ty),
            _ => None,
        }
    }

    /// Text lines of the direct [`Text`] children.
    pub fn text(&self) -> Vec<&str> {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    /// The remainder of the directive line that rebuilds this tag's payload.
    pub fn remainder(&self) -> String {
        match &self.body {
            TagBody::Parameter { name, ty } | TagBody::Option { name, ty } => {
                format!("{} [{}]", name, ty)
            }
            TagBody::Attribute { ty }
            | TagBody::Returns { ty }
            | TagBody::Raises { ty }
            | TagBody::Throws { ty } => format!("[{}]", ty),
            TagBody::Yields { block } => block.clone(),
            TagBody::Pragma => String::new(),
            TagBody::Rbs { text } => text.clone(),
            TagBody::Example { title } => title.clone().unwrap_or_default(),
        }
    }

    /// Whether an `@rbs` tag declares a generic parameter (`generic T`).
    pub fn is_generic(&self) -> bool {
        matches!(&self.body, TagBody::Rbs { text } if text.starts_with("generic "))
    }

    /// Whether an `@rbs` tag is a method signature.
    pub fn is_method_signature(&self) -> bool {
        matches!(&self.body, TagBody::Rbs { text } if !text.is_empty() && !text.starts_with("generic "))
    }

    /// The declared parameter of a generic `@rbs` tag.
    pub fn generic_parameter(&self) -> Option<&str> {
        match &self.body {
            TagBody::Rbs { text } => text.strip_prefix("generic ").map(str::trim),
            _ => None,
        }
    }

    /// The code of an `@example` tag: its nested lines with one indentation
    /// level removed.
    pub fn code(&self) -> Option<String> {
        if !matches!(self.body, TagBody::Example { .. }) {
            return None;
        }
        let lines: Vec<&str> = self
            .text()
            .into_iter()
            .map(|line| {
                line.strip_prefix(INDENTATION)
                    .or_else(|| line.strip_prefix('\t'))
                    .unwrap_or(line)
            })
            .collect();
        Some(lines.join("\n"))
    }
}
