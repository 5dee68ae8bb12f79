//! Definition extraction from Ruby syntax trees.
//!
//! The tree is walked in document order with an explicit [`Context`] per
//! lexical scope. Class, module and singleton class bodies start a fresh
//! context; bare `private`/`protected`/`public` and `module_function`
//! statements change the context for the rest of that body. Other nodes are
//! walked with a copy of the context, so changes inside them do not leak.
//! Method bodies are never searched for definitions.

use std::collections::HashMap;

use tracing::debug;
use tree_sitter::{Node, Parser};

use decode_core::adapter::{DefinitionData, FileDefinitions};
use decode_core::definition::{BlockDelimiter, DefinitionKind, Kind};
use decode_core::types::Visibility;
use decode_core::{DecodeError, DecodeResult};

use crate::comments::{self, Comments};

/// Extract the definitions of one Ruby file.
pub fn extract(path: &str, content: &str) -> DecodeResult<FileDefinitions> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_ruby::LANGUAGE.into())
        .map_err(|e| DecodeError::parse(path, e.to_string()))?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| DecodeError::parse(path, "parser produced no syntax tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        debug!(path, "syntax errors present, extracting recoverable definitions");
    }

    let mut extractor = Extractor {
        source: content,
        comments: Comments::collect(root, content),
        file: FileDefinitions::new(path),
        scopes: HashMap::new(),
    };
    extractor.visit_children(root, &mut Context::default())?;

    debug!(path, definitions = extractor.file.definitions.len(), "extracted ruby definitions");
    Ok(extractor.file)
}

// ============================================================================
// Context
// ============================================================================

/// Lexical state while walking one scope body.
#[derive(Debug, Clone, Default)]
struct Context {
    /// Index of the enclosing definition.
    parent: Option<usize>,
    /// Visibility given to methods, attributes and aliases.
    visibility: Visibility,
    /// Whether following methods are module functions.
    module_function: bool,
}

impl Context {
    fn nested(parent: usize) -> Self {
        Context {
            parent: Some(parent),
            ..Context::default()
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

struct Extractor<'a> {
    source: &'a str,
    comments: Comments,
    file: FileDefinitions,
    /// Synthetic `@scope` definitions, by parent and name.
    scopes: HashMap<(Option<usize>, String), usize>,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn visit_children(&mut self, node: Node<'_>, context: &mut Context) -> DecodeResult<()> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, context)?;
        }
        Ok(())
    }

    fn visit_copy(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let mut inner = context.clone();
        self.visit_children(node, &mut inner)
    }

    fn visit(&mut self, node: Node<'_>, context: &mut Context) -> DecodeResult<()> {
        match node.kind() {
            "class" => self.visit_class(node, context),
            "module" => self.visit_module(node, context),
            "singleton_class" => self.visit_singleton_class(node, context),
            "method" => {
                self.visit_method(node, context);
                Ok(())
            }
            "singleton_method" => {
                self.visit_singleton_method(node, context);
                Ok(())
            }
            "assignment" => self.visit_assignment(node, context),
            "alias" => {
                self.visit_alias(node, context);
                Ok(())
            }
            "identifier" => {
                self.visit_identifier(node, context);
                Ok(())
            }
            "call" => self.visit_call(node, context),
            "comment" => Ok(()),
            _ => self.visit_copy(node, context),
        }
    }

    /// Publish a definition located at `node`, attaching its leading
    /// comments and wrapping it in any `@scope` namespaces.
    fn push(&mut self, node: Node<'_>, data: DefinitionData, context: &Context) -> usize {
        let row = node.start_position().row;
        let comments = self.comments.preceding(row);

        let mut parent = context.parent;
        if let Some(comments) = &comments {
            for name in comments::scope_names(comments) {
                parent = Some(self.scope(parent, name, row));
            }
        }

        let mut data = data.with_line(row as u32 + 1);
        data.parent_index = parent;
        if let Some(comments) = comments {
            data = data.with_comments(comments);
        }
        self.file.push(data)
    }

    fn scope(&mut self, parent: Option<usize>, name: String, row: usize) -> usize {
        if let Some(&index) = self.scopes.get(&(parent, name.clone())) {
            return index;
        }
        let mut data = DefinitionData::new([name.as_str()], DefinitionKind::Scope).with_line(row as u32 + 1);
        data.parent_index = parent;
        let index = self.file.push(data);
        self.scopes.insert((parent, name), index);
        index
    }

    // ------------------------------------------------------------------------
    // Namespaces
    // ------------------------------------------------------------------------

    fn visit_class(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let Some(name) = node.child_by_field_name("name") else {
            return self.visit_copy(node, context);
        };
        let super_class = node
            .child_by_field_name("superclass")
            .map(|superclass| self.text(superclass).trim_start_matches('<').trim().to_string())
            .filter(|superclass| !superclass.is_empty());

        let data = DefinitionData::new(constant_path(self.text(name)), DefinitionKind::Class { super_class });
        let index = self.push(node, data, context);
        self.visit_body(node, index)
    }

    fn visit_module(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let Some(name) = node.child_by_field_name("name") else {
            return self.visit_copy(node, context);
        };
        let data = DefinitionData::new(constant_path(self.text(name)), DefinitionKind::Module);
        let index = self.push(node, data, context);
        self.visit_body(node, index)
    }

    fn visit_singleton_class(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let target = node
            .child_by_field_name("value")
            .map_or("self", |value| self.text(value))
            .to_string();
        let data = DefinitionData::new(Vec::<String>::new(), DefinitionKind::Singleton { target });
        let index = self.push(node, data, context);
        self.visit_body(node, index)
    }

    fn visit_body(&mut self, node: Node<'_>, parent: usize) -> DecodeResult<()> {
        match node.child_by_field_name("body") {
            Some(body) => self.visit_children(body, &mut Context::nested(parent)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    fn visit_method(&mut self, node: Node<'_>, context: &Context) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let arguments = node
            .child_by_field_name("parameters")
            .map(|parameters| parenthesize(self.text(parameters)));

        let data = if context.module_function {
            DefinitionData::new([self.text(name)], DefinitionKind::Function { arguments })
        } else {
            DefinitionData::new(
                [self.text(name)],
                DefinitionKind::Method {
                    receiver: None,
                    arguments,
                },
            )
            .with_visibility(context.visibility)
        };
        self.push(node, data, context);
    }

    fn visit_singleton_method(&mut self, node: Node<'_>, context: &Context) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let receiver = node
            .child_by_field_name("object")
            .map(|object| self.text(object).to_string());
        let arguments = node
            .child_by_field_name("parameters")
            .map(|parameters| parenthesize(self.text(parameters)));

        let data = DefinitionData::new([self.text(name)], DefinitionKind::Method { receiver, arguments });
        self.push(node, data, context);
    }

    fn visit_assignment(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let Some(left) = node.child_by_field_name("left").filter(|left| left.kind() == "constant") else {
            return self.visit_copy(node, context);
        };
        let value = node
            .child_by_field_name("right")
            .map(|right| self.text(right).to_string());
        let data = DefinitionData::new([self.text(left)], DefinitionKind::Constant { value });
        self.push(node, data, context);
        Ok(())
    }

    fn visit_alias(&mut self, node: Node<'_>, context: &Context) {
        let (Some(new_name), Some(old_name)) =
            (node.child_by_field_name("name"), node.child_by_field_name("alias"))
        else {
            return;
        };
        let data = DefinitionData::new(
            [symbol_name(self.text(new_name))],
            DefinitionKind::Alias {
                old_name: symbol_name(self.text(old_name)).to_string(),
            },
        )
        .with_visibility(context.visibility);
        self.push(node, data, context);
    }

    fn visit_identifier(&mut self, node: Node<'_>, context: &mut Context) {
        let text = self.text(node);
        if let Some(visibility) = Visibility::parse(text) {
            context.visibility = visibility;
            context.module_function = false;
        } else if text == "module_function" {
            context.module_function = true;
        }
    }

    // ------------------------------------------------------------------------
    // Calls
    // ------------------------------------------------------------------------

    fn visit_call(&mut self, node: Node<'_>, context: &Context) -> DecodeResult<()> {
        let method = node
            .child_by_field_name("method")
            .map_or("", |method| self.text(method));
        let arguments = node.child_by_field_name("arguments");
        let block = node.child_by_field_name("block");
        let has_receiver = node.child_by_field_name("receiver").is_some();

        if !has_receiver && block.is_none() {
            if let Some(arguments) = arguments {
                if let Some(visibility) = Visibility::parse(method) {
                    return self.apply_visibility(arguments, visibility, context);
                }
                match method {
                    "module_function" => return self.apply_module_function(arguments, context),
                    "attr_reader" | "attr_writer" | "attr_accessor" | "attr" => {
                        self.visit_attributes(node, method, arguments, context);
                        return Ok(());
                    }
                    "alias_method" => {
                        if self.visit_alias_method(node, arguments, context) {
                            return Ok(());
                        }
                    }
                    _ => {}
                }
            }
        }

        if self.visit_documented_call(node, method, arguments, block, context)? {
            return Ok(());
        }
        self.visit_copy(node, context)
    }

    /// `private def foo`, `private :foo, :bar`, `private attr_reader :baz`.
    fn apply_visibility(
        &mut self,
        arguments: Node<'_>,
        visibility: Visibility,
        context: &Context,
    ) -> DecodeResult<()> {
        let mut inline = context.clone();
        inline.visibility = visibility;
        inline.module_function = false;

        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            match argument.kind() {
                "simple_symbol" | "symbol" | "string" => {
                    let name = symbol_name(self.text(argument));
                    self.set_visibility(context.parent, name, visibility);
                }
                "method" => self.visit_method(argument, &inline),
                _ => self.visit(argument, &mut inline.clone())?,
            }
        }
        Ok(())
    }

    /// Update already extracted members of the current scope.
    fn set_visibility(&mut self, parent: Option<usize>, name: &str, visibility: Visibility) {
        for definition in self.file.definitions.iter_mut() {
            let member = matches!(
                definition.kind,
                DefinitionKind::Method { receiver: None, .. }
                    | DefinitionKind::Attribute { .. }
                    | DefinitionKind::Alias { .. }
            );
            if member && definition.parent_index == parent && definition.path == [name] {
                definition.visibility = visibility;
            }
        }
    }

    /// `module_function :foo` or `module_function def foo`.
    fn apply_module_function(&mut self, arguments: Node<'_>, context: &Context) -> DecodeResult<()> {
        let mut inline = context.clone();
        inline.module_function = true;

        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            match argument.kind() {
                "simple_symbol" | "symbol" | "string" => {
                    let name = symbol_name(self.text(argument));
                    for definition in self.file.definitions.iter_mut() {
                        if definition.parent_index != context.parent || definition.path != [name] {
                            continue;
                        }
                        if let DefinitionKind::Method {
                            receiver: None,
                            arguments,
                        } = &definition.kind
                        {
                            definition.kind = DefinitionKind::Function {
                                arguments: arguments.clone(),
                            };
                            definition.visibility = Visibility::Public;
                        }
                    }
                }
                "method" => self.visit_method(argument, &inline),
                _ => self.visit(argument, &mut inline.clone())?,
            }
        }
        Ok(())
    }

    fn visit_attributes(&mut self, node: Node<'_>, accessor: &str, arguments: Node<'_>, context: &Context) {
        let mut cursor = arguments.walk();
        let names: Vec<&str> = arguments
            .named_children(&mut cursor)
            .filter(|argument| matches!(argument.kind(), "simple_symbol" | "symbol" | "string"))
            .map(|argument| symbol_name(self.text(argument)))
            .collect();

        for name in names {
            let data = DefinitionData::new(
                [name],
                DefinitionKind::Attribute {
                    accessor: Some(accessor.to_string()),
                },
            )
            .with_visibility(context.visibility);
            self.push(node, data, context);
        }
    }

    fn visit_alias_method(&mut self, node: Node<'_>, arguments: Node<'_>, context: &Context) -> bool {
        let mut cursor = arguments.walk();
        let names: Vec<&str> = arguments
            .named_children(&mut cursor)
            .map(|argument| symbol_name(self.text(argument)))
            .collect();
        let [new_name, old_name] = names.as_slice() else {
            return false;
        };
        let data = DefinitionData::new(
            [*new_name],
            DefinitionKind::Alias {
                old_name: old_name.to_string(),
            },
        )
        .with_visibility(context.visibility);
        self.push(node, data, context);
        true
    }

    /// Documented DSL calls: with a block they become Block definitions,
    /// without one only when named by `@name` or marked `@attribute`.
    fn visit_documented_call(
        &mut self,
        node: Node<'_>,
        method: &str,
        arguments: Option<Node<'_>>,
        block: Option<Node<'_>>,
        context: &Context,
    ) -> DecodeResult<bool> {
        let Some(comments) = self.comments.preceding(node.start_position().row) else {
            return Ok(false);
        };
        let explicit_name = comments::directive(&comments, "name")
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let is_attribute = comments::directive(&comments, "attribute").is_some();

        if block.is_none() && explicit_name.is_none() && !is_attribute {
            return Ok(false);
        }

        let name = explicit_name
            .or_else(|| arguments.and_then(|arguments| self.first_name_argument(arguments)))
            .unwrap_or_else(|| method.to_string());
        let arguments_text = arguments.map(|arguments| self.text(arguments).to_string());

        let kind = match block {
            Some(block) => DefinitionKind::Block {
                call: method.to_string(),
                arguments: arguments_text,
                delimiter: if block.kind() == "do_block" {
                    BlockDelimiter::DoEnd
                } else {
                    BlockDelimiter::Braces
                },
            },
            None => DefinitionKind::Call {
                call: method.to_string(),
                arguments: arguments_text,
            },
        };

        let mut data = DefinitionData::new([name], kind);
        if is_attribute {
            data = data.convert(Kind::Attribute)?;
        }
        let index = self.push(node, data, context);

        if let Some(body) = block.and_then(|block| block.child_by_field_name("body")) {
            self.visit_children(body, &mut Context::nested(index))?;
        }
        Ok(true)
    }

    fn first_name_argument(&self, arguments: Node<'_>) -> Option<String> {
        let mut cursor = arguments.walk();
        let first = arguments
            .named_children(&mut cursor)
            .find(|argument| matches!(argument.kind(), "simple_symbol" | "symbol" | "string"))?;
        Some(symbol_name(self.text(first)).to_string())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Split `Foo::Bar` (or `::Foo::Bar`) into path segments.
fn constant_path(text: &str) -> Vec<String> {
    text.trim_start_matches("::")
        .split("::")
        .map(|segment| segment.trim().to_string())
        .collect()
}

/// `:foo`, `"foo"` and `'foo'` all name `foo`.
fn symbol_name(text: &str) -> &str {
    text.trim_start_matches(':')
        .trim_matches(|c| c == '"' || c == '\'')
}

fn parenthesize(parameters: &str) -> String {
    if parameters.starts_with('(') {
        parameters.to_string()
    } else {
        format!("({})", parameters)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_ok(content: &str) -> FileDefinitions {
        extract("test.rb", content).unwrap()
    }

    /// (path, kind, parent path) triples for compact assertions.
    fn outline(file: &FileDefinitions) -> Vec<(String, Kind, Option<String>)> {
        file.definitions
            .iter()
            .map(|definition| {
                (
                    definition.path.join("::"),
                    definition.kind.kind(),
                    definition
                        .parent_index
                        .map(|parent| file.definitions[parent].path.join("::")),
                )
            })
            .collect()
    }

    fn find<'a>(file: &'a FileDefinitions, name: &str) -> &'a DefinitionData {
        file.definitions
            .iter()
            .find(|definition| definition.path.join("::") == name)
            .unwrap()
    }

    mod helpers {
        use super::*;

        #[test]
        fn constant_paths() {
            assert_eq!(constant_path("Foo::Bar"), vec!["Foo", "Bar"]);
            assert_eq!(constant_path("::Foo"), vec!["Foo"]);
        }

        #[test]
        fn symbol_names() {
            assert_eq!(symbol_name(":foo"), "foo");
            assert_eq!(symbol_name("\"foo\""), "foo");
            assert_eq!(symbol_name("'bar?'"), "bar?");
        }

        #[test]
        fn parameters_are_parenthesized() {
            assert_eq!(parenthesize("(a, b)"), "(a, b)");
            assert_eq!(parenthesize("a, b"), "(a, b)");
        }
    }

    mod namespaces {
        use super::*;

        #[test]
        fn nested_classes_and_modules() {
            let file = extract_ok(
                "module Foo\n  class Bar < Base\n    def baz(x)\n    end\n  end\nend\n",
            );
            assert_eq!(
                outline(&file),
                vec![
                    ("Foo".to_string(), Kind::Module, None),
                    ("Bar".to_string(), Kind::Class, Some("Foo".to_string())),
                    ("baz".to_string(), Kind::Method, Some("Bar".to_string())),
                ]
            );
            assert_eq!(
                find(&file, "Bar").kind,
                DefinitionKind::Class {
                    super_class: Some("Base".to_string())
                }
            );
            assert_eq!(
                find(&file, "baz").kind,
                DefinitionKind::Method {
                    receiver: None,
                    arguments: Some("(x)".to_string())
                }
            );
            assert_eq!(find(&file, "baz").line, Some(3));
        }

        #[test]
        fn compact_class_path() {
            let file = extract_ok("class Foo::Bar\nend\n");
            assert_eq!(file.definitions[0].path, vec!["Foo", "Bar"]);
        }

        #[test]
        fn singleton_class_methods() {
            let file = extract_ok(
                "class Foo\n  class << self\n    def build\n    end\n  end\n  def self.create\n  end\nend\n",
            );
            assert_eq!(
                outline(&file),
                vec![
                    ("Foo".to_string(), Kind::Class, None),
                    ("".to_string(), Kind::Singleton, Some("Foo".to_string())),
                    ("build".to_string(), Kind::Method, Some("".to_string())),
                    ("create".to_string(), Kind::Method, Some("Foo".to_string())),
                ]
            );
            assert_eq!(
                find(&file, "create").kind,
                DefinitionKind::Method {
                    receiver: Some("self".to_string()),
                    arguments: None
                }
            );
        }

        #[test]
        fn method_bodies_are_not_searched() {
            let file = extract_ok("def outer\n  def inner\n  end\n  CONST = 1\nend\n");
            assert_eq!(outline(&file).len(), 1);
        }

        #[test]
        fn constants_and_aliases() {
            let file = extract_ok(
                "module M\n  VERSION = \"1.0\"\n  def a\n  end\n  alias b a\n  alias_method :c, :a\nend\n",
            );
            assert_eq!(
                find(&file, "VERSION").kind,
                DefinitionKind::Constant {
                    value: Some("\"1.0\"".to_string())
                }
            );
            assert_eq!(
                find(&file, "b").kind,
                DefinitionKind::Alias {
                    old_name: "a".to_string()
                }
            );
            assert_eq!(
                find(&file, "c").kind,
                DefinitionKind::Alias {
                    old_name: "a".to_string()
                }
            );
        }

        #[test]
        fn attributes() {
            let file = extract_ok("class Point\n  attr_reader :x, :y\n  attr_accessor :label\nend\n");
            let attributes: Vec<_> = outline(&file)
                .into_iter()
                .filter(|(_, kind, _)| *kind == Kind::Attribute)
                .map(|(name, _, _)| name)
                .collect();
            assert_eq!(attributes, vec!["x", "y", "label"]);
            assert_eq!(
                find(&file, "label").kind,
                DefinitionKind::Attribute {
                    accessor: Some("attr_accessor".to_string())
                }
            );
        }
    }

    mod visibility {
        use super::*;

        const SOURCE: &str = "\
class Foo
  def a
  end

  private def b
  end

  def c
  end

  private

  def d
  end

  public

  def e
  end

  def f
  end
  private :f
end

class Bar
  def g
  end
end
";

        #[test]
        fn default_inline_and_bare_modifiers() {
            let file = extract_ok(SOURCE);
            let visibility = |name| find(&file, name).visibility;
            assert_eq!(visibility("a"), Visibility::Public);
            assert_eq!(visibility("b"), Visibility::Private);
            assert_eq!(visibility("c"), Visibility::Public);
            assert_eq!(visibility("d"), Visibility::Private);
            assert_eq!(visibility("e"), Visibility::Public);
            assert_eq!(visibility("f"), Visibility::Private);
            assert_eq!(visibility("g"), Visibility::Public);
        }

        #[test]
        fn modifiers_do_not_leak_into_nested_scopes() {
            let file = extract_ok("class A\n  private\n  class B\n    def m\n    end\n  end\n  def n\n  end\nend\n");
            assert_eq!(find(&file, "m").visibility, Visibility::Public);
            assert_eq!(find(&file, "n").visibility, Visibility::Private);
        }

        #[test]
        fn module_function() {
            let file = extract_ok(
                "module Util\n  def before\n  end\n  module_function\n  def helper(x)\n  end\nend\nmodule Other\n  def later\n  end\n  module_function :later\nend\n",
            );
            assert_eq!(find(&file, "before").kind.kind(), Kind::Method);
            assert_eq!(
                find(&file, "helper").kind,
                DefinitionKind::Function {
                    arguments: Some("(x)".to_string())
                }
            );
            assert_eq!(find(&file, "later").kind.kind(), Kind::Function);
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn leading_comments_attach() {
            let file = extract_ok(
                "# A widget.\n#\n# @parameter name [String] The name.\n#   More detail.\nclass Widget\n  # Not attached, blank line follows.\n\n  def run\n  end\nend\n",
            );
            assert_eq!(
                find(&file, "Widget").comments,
                Some(vec![
                    "A widget.".to_string(),
                    "".to_string(),
                    "@parameter name [String] The name.".to_string(),
                    "  More detail.".to_string(),
                ])
            );
            assert_eq!(find(&file, "run").comments, None);
        }

        #[test]
        fn trailing_comments_do_not_attach() {
            let file = extract_ok("x = 1 # trailing\nclass Widget\nend\n");
            assert_eq!(find(&file, "Widget").comments, None);
        }

        #[test]
        fn scope_directive_wraps_definition() {
            let file = extract_ok("# @scope Helpers Text\n# Format things.\ndef format\nend\n# @scope Helpers\ndef other\nend\n");
            assert_eq!(
                outline(&file),
                vec![
                    ("Helpers".to_string(), Kind::Scope, None),
                    ("Text".to_string(), Kind::Scope, Some("Helpers".to_string())),
                    ("format".to_string(), Kind::Method, Some("Text".to_string())),
                    ("other".to_string(), Kind::Method, Some("Helpers".to_string())),
                ]
            );
        }
    }

    mod calls {
        use super::*;

        #[test]
        fn documented_blocks() {
            let file = extract_ok(
                "module Config\n  # The settings.\n  settings :main do\n    # Nested.\n    def inner\n    end\n  end\n\n  # @name hooks\n  callbacks { }\n\n  undocumented do\n    def flattened\n    end\n  end\nend\n",
            );
            assert_eq!(
                outline(&file),
                vec![
                    ("Config".to_string(), Kind::Module, None),
                    ("main".to_string(), Kind::Block, Some("Config".to_string())),
                    ("inner".to_string(), Kind::Method, Some("main".to_string())),
                    ("hooks".to_string(), Kind::Block, Some("Config".to_string())),
                    ("flattened".to_string(), Kind::Method, Some("Config".to_string())),
                ]
            );
            assert!(matches!(
                find(&file, "main").kind,
                DefinitionKind::Block {
                    delimiter: BlockDelimiter::DoEnd,
                    ..
                }
            ));
            assert!(matches!(
                find(&file, "hooks").kind,
                DefinitionKind::Block {
                    delimiter: BlockDelimiter::Braces,
                    ..
                }
            ));
        }

        #[test]
        fn documented_calls_need_name_or_attribute() {
            let file = extract_ok(
                "class Model\n  # Included for reasons.\n  include Comparable\n\n  # @name timeout\n  option :timeout, 10\n\n  # The colour.\n  # @attribute\n  property :colour\nend\n",
            );
            assert_eq!(
                outline(&file),
                vec![
                    ("Model".to_string(), Kind::Class, None),
                    ("timeout".to_string(), Kind::Call, Some("Model".to_string())),
                    ("colour".to_string(), Kind::Attribute, Some("Model".to_string())),
                ]
            );
        }
    }

    #[test]
    fn syntax_errors_still_extract() {
        let file = extract_ok("class Good\nend\nclass Broken\n  def (\nend\n");
        assert_eq!(file.definitions[0].path, vec!["Good"]);
        assert_eq!(file.path, "test.rb");
    }
}
