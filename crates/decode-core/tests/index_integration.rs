//! Integration tests for publishing, resolution and coverage through the
//! public API, using an adapter that serves prebuilt definitions.

use std::collections::HashMap;

use decode_core::adapter::{DefinitionData, FileDefinitions, LanguageAdapter};
use decode_core::comment::{to_lines, Tags};
use decode_core::coverage::coverage;
use decode_core::definition::{BlockDelimiter, ContainerPolicy, DefinitionKind, Kind};
use decode_core::index::Index;
use decode_core::language::Languages;
use decode_core::reference::{Reference, Segment};
use decode_core::rewrite::{rewrite, LinkSegment};
use decode_core::source::Source;
use decode_core::types::Visibility;
use decode_core::DecodeError;

/// Serves canned definitions keyed by file path.
struct Canned {
    name: &'static str,
    files: HashMap<String, FileDefinitions>,
    tags: Tags,
}

impl Canned {
    fn new(name: &'static str) -> Self {
        Canned {
            name,
            files: HashMap::new(),
            tags: Tags::standard(),
        }
    }

    fn file(mut self, file: FileDefinitions) -> Self {
        self.files.insert(file.path.clone(), file);
        self
    }
}

impl LanguageAdapter for Canned {
    fn name(&self) -> &str {
        self.name
    }

    fn extensions(&self) -> &[&str] {
        &[]
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn extract(&self, source: &Source) -> Result<FileDefinitions, DecodeError> {
        let path = source.display_path();
        self.files
            .get(&path)
            .cloned()
            .ok_or_else(|| DecodeError::file_not_found(path))
    }
}

fn class(name: &str) -> DefinitionData {
    DefinitionData::new([name], DefinitionKind::Class { super_class: None })
}

fn method(name: &str) -> DefinitionData {
    DefinitionData::new(
        [name],
        DefinitionKind::Method {
            receiver: None,
            arguments: None,
        },
    )
}

fn documented(data: DefinitionData, text: &str) -> DefinitionData {
    data.with_comments(vec![text.to_string()])
}

fn build(adapter: Canned) -> Index {
    let name = adapter.name;
    let paths: Vec<String> = {
        let mut paths: Vec<String> = adapter.files.keys().cloned().collect();
        paths.sort();
        paths
    };
    let mut index = Index::new(Languages::new().with(adapter));
    for path in paths {
        index.update_source(Source::new(path, name)).unwrap();
    }
    index
}

fn ruby_like(text: &str) -> Reference {
    // Split like a Ruby reference: `::`, `.`, `#` or `:` separate names.
    let mut segments = Vec::new();
    let mut prefix: Option<String> = None;
    let mut name = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let separator = match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                Some("::")
            }
            ':' => Some(":"),
            '.' => Some("."),
            '#' => Some("#"),
            _ => None,
        };
        match separator {
            Some(separator) => {
                if !name.is_empty() {
                    segments.push(Segment::new(prefix.as_deref(), std::mem::take(&mut name)));
                }
                prefix = Some(separator.to_string());
            }
            None => name.push(c),
        }
    }
    if !name.is_empty() {
        segments.push(Segment::new(prefix.as_deref(), name));
    }
    Reference::new(text, "ruby", segments)
}

mod resolution {
    use super::*;

    fn nested() -> Index {
        let mut file = FileDefinitions::new("lib/foo.rb");
        let foo = file.push(DefinitionData::new(["Foo"], DefinitionKind::Module));
        let bar = file.push(class("Bar").with_parent_index(foo));
        file.push(method("baz").with_parent_index(bar));
        file.push(class("Top"));
        let top_bar = file.push(class("Bar"));
        file.push(method("only_at_root").with_parent_index(top_bar));
        build(Canned::new("ruby").file(file))
    }

    #[test]
    fn inner_bar_shadows_root_bar() {
        let index = nested();
        let foo = index.get("Foo").unwrap();
        let found = index.lookup(&ruby_like("Bar"), Some(foo)).unwrap();
        assert_eq!(found.qualified_name(), "Foo::Bar");
    }

    #[test]
    fn shadowing_fails_fast() {
        let index = nested();
        let foo = index.get("Foo").unwrap();
        assert!(index.lookup(&ruby_like("Bar#only_at_root"), Some(foo)).is_none());
        assert!(index.lookup(&ruby_like("::Bar#only_at_root"), Some(foo)).is_some());
    }

    #[test]
    fn absolute_ignores_scope() {
        let index = nested();
        let baz = index.get("Foo::Bar#baz").unwrap();
        let found = index.lookup(&ruby_like("::Bar"), Some(baz)).unwrap();
        assert_eq!(found.qualified_name(), "Bar");
    }

    #[test]
    fn relative_from_method_scope() {
        let index = nested();
        let baz = index.get("Foo::Bar#baz").unwrap();
        let found = index.lookup(&ruby_like("Top"), Some(baz)).unwrap();
        assert_eq!(found.qualified_name(), "Top");
    }
}

mod best_match {
    use super::*;

    #[test]
    fn same_language_preferred_when_reopened_across_languages() {
        let mut ruby = FileDefinitions::new("a.rb");
        ruby.push(class("Shared"));
        let mut c = FileDefinitions::new("a.c");
        c.push(class("Shared"));

        let mut index = Index::new(
            Languages::new()
                .with(Canned::new("c").file(c))
                .with(Canned::new("ruby").file(ruby)),
        );
        index.update_source(Source::new("a.c", "c")).unwrap();
        index.update_source(Source::new("a.rb", "ruby")).unwrap();

        let found = index.lookup(&ruby_like("Shared"), None).unwrap();
        assert_eq!(found.language, "ruby");

        let generic = Reference::generic("Shared", "python");
        assert_eq!(index.lookup(&generic, None).unwrap().language, "c");
    }

    #[test]
    fn prefix_distinguishes_method_from_constant() {
        let mut file = FileDefinitions::new("a.rb");
        let foo = file.push(class("Foo"));
        file.push(
            DefinitionData::new(["size"], DefinitionKind::Constant { value: None }).with_parent_index(foo),
        );
        file.push(method("size").with_parent_index(foo));
        let index = build(Canned::new("ruby").file(file));

        let method = index.lookup(&ruby_like("Foo#size"), None).unwrap();
        assert_eq!(method.kind.kind(), Kind::Method);
        let constant = index.lookup(&ruby_like("Foo::size"), None).unwrap();
        assert_eq!(constant.kind.kind(), Kind::Constant);
    }
}

mod coverage_report {
    use super::*;

    #[test]
    fn reopened_class_documented_in_one_file() {
        let mut a = FileDefinitions::new("a.rb");
        let foo = a.push(documented(class("Foo"), "A foo."));
        a.push(documented(method("bar"), "Bar it.").with_parent_index(foo));

        let mut b = FileDefinitions::new("b.rb");
        let foo = b.push(class("Foo"));
        b.push(method("bar").with_parent_index(foo));
        b.push(
            method("hidden")
                .with_parent_index(foo)
                .with_visibility(Visibility::Private),
        );

        let index = build(Canned::new("ruby").file(a).file(b));
        let report = coverage(&index, &ContainerPolicy::default());
        assert_eq!(report.documented, 2);
        assert_eq!(report.total, 2);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn non_container_blocks_are_not_descended() {
        let mut file = FileDefinitions::new("a.rb");
        let foo = file.push(class("Foo"));
        file.push(method("visible").with_parent_index(foo));
        let helper = file.push(
            DefinitionData::new(
                ["helper"],
                DefinitionKind::Block {
                    call: "helper".to_string(),
                    arguments: None,
                    delimiter: BlockDelimiter::Braces,
                },
            )
            .with_parent_index(foo),
        );
        file.push(method("inner").with_parent_index(helper));

        let index = build(Canned::new("ruby").file(file));

        let report = coverage(&index, &ContainerPolicy::default());
        let missing: Vec<_> = report.missing.iter().map(|m| m.qualified_name.as_str()).collect();
        assert_eq!(missing, vec!["Foo", "Foo#visible", "Foo::helper"]);

        let permissive = ContainerPolicy::new(vec![BlockDelimiter::DoEnd, BlockDelimiter::Braces]);
        let report = coverage(&index, &permissive);
        assert_eq!(report.total, 4);
    }

    #[test]
    fn scopes_are_not_counted() {
        let mut file = FileDefinitions::new("a.rb");
        let scope = file.push(DefinitionData::new(["Helpers"], DefinitionKind::Scope));
        file.push(documented(method("assist"), "Assist.").with_parent_index(scope));
        let index = build(Canned::new("ruby").file(file));

        let report = coverage(&index, &ContainerPolicy::default());
        assert_eq!(report.total, 1);
        assert_eq!(report.documented, 1);
    }
}

mod documentation {
    use super::*;

    #[test]
    fn tag_tree_round_trips_through_lines() {
        let mut file = FileDefinitions::new("a.rb");
        file.push(method("run").with_comments(vec![
            "Run the task.".to_string(),
            "@parameter task [Task] The task.".to_string(),
            "\t@option :force [Boolean]".to_string(),
            "@returns [Boolean]".to_string(),
        ]));
        let index = build(Canned::new("ruby").file(file));
        let id = index.get("#run").and_then(|d| d.id()).unwrap();
        let docs = index.documentation(id).unwrap();

        let lines = to_lines(&docs.children);
        let reparsed = Tags::standard().parse(&lines);
        assert_eq!(to_lines(&reparsed), lines);
        assert_eq!(reparsed.len(), docs.children.len());
    }

    #[test]
    fn links_resolve_relative_to_definition() {
        let mut file = FileDefinitions::new("a.rb");
        let foo = file.push(class("Foo"));
        file.push(class("Bar").with_parent_index(foo));
        file.push(documented(method("baz"), "Uses {Bar}.").with_parent_index(foo));
        let index = build(Canned::new("ruby").file(file));

        let baz = index.get("Foo#baz").unwrap();
        let segments = rewrite(&index, baz, "Uses {Bar} and {Nope}.");
        assert_eq!(segments.len(), 5);
        assert!(matches!(
            &segments[1],
            LinkSegment::Link { qualified_name: Some(name), .. } if name == "Foo::Bar"
        ));
        assert!(!segments[3].is_resolved());
    }
}

mod contract {
    use super::*;

    #[test]
    fn adapter_with_forward_parent_is_rejected() {
        let mut file = FileDefinitions::new("a.rb");
        file.push(method("orphan").with_parent_index(3));
        let mut index = Index::new(Languages::new().with(Canned::new("ruby").file(file)));
        let err = index.update_source(Source::new("a.rb", "ruby")).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidParent { index: 0, parent: 3 }));
    }
}
