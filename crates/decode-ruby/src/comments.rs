//! Leading comment collection for Ruby definitions.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::Node;

static COMMENT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#[ \t]?").unwrap());

/// Whole-line comments of a file, keyed by 0-indexed row.
#[derive(Debug, Default)]
pub(crate) struct Comments {
    lines: HashMap<usize, String>,
}

impl Comments {
    /// Collect every comment that is the only thing on its line.
    pub(crate) fn collect(root: Node<'_>, source: &str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let mut comments = Comments::default();
        comments.visit(root, source, &lines);
        comments
    }

    fn visit(&mut self, node: Node<'_>, source: &str, lines: &[&str]) {
        if node.kind() == "comment" {
            let row = node.start_position().row;
            let column = node.start_position().column;
            let whole_line = lines
                .get(row)
                .is_some_and(|line| line.len() >= column && line[..column].trim().is_empty());
            if whole_line {
                if let Ok(text) = node.utf8_text(source.as_bytes()) {
                    // `=begin`/`=end` blocks span several rows; only `#` lines count.
                    if text.starts_with('#') {
                        self.lines.insert(row, strip_marker(text));
                    }
                }
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source, lines);
        }
    }

    /// The contiguous run of comment lines ending on the row above `row`.
    pub(crate) fn preceding(&self, row: usize) -> Option<Vec<String>> {
        let mut collected = Vec::new();
        let mut current = row;
        while current > 0 {
            current -= 1;
            match self.lines.get(&current) {
                Some(line) => collected.push(line.clone()),
                None => break,
            }
        }
        if collected.is_empty() {
            return None;
        }
        collected.reverse();
        Some(collected)
    }
}

/// Remove the comment marker and one following space or tab, keeping any
/// deeper indentation.
fn strip_marker(text: &str) -> String {
    COMMENT_MARKER.replace(text, "").trim_end().to_string()
}

// ============================================================================
// Comment Directives
// ============================================================================

/// The value of a top-level `@directive value` line, if present.
pub(crate) fn directive<'a>(comments: &'a [String], name: &str) -> Option<&'a str> {
    comments.iter().find_map(|line| {
        let rest = line.strip_prefix('@')?.strip_prefix(name)?;
        if rest.is_empty() {
            return Some("");
        }
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(rest.trim())
    })
}

/// Names declared by an `@scope` directive, outermost first.
pub(crate) fn scope_names(comments: &[String]) -> Vec<String> {
    directive(comments, "scope")
        .map(|value| {
            value
                .split(|c: char| c.is_whitespace() || c == ':')
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
