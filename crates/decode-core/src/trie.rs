//! Prefix tree keyed by lexical path segments.
//!
//! Every inserted key creates nodes for all of its prefixes; intermediate
//! nodes without values are pure namespaces. A node's value list is either
//! absent or non-empty. Children keep insertion order, so traversals are
//! deterministic.

use indexmap::IndexMap;

// ============================================================================
// Node
// ============================================================================

/// One node of a [`Trie`].
#[derive(Debug, Clone)]
pub struct TrieNode<T> {
    values: Option<Vec<T>>,
    children: IndexMap<String, TrieNode<T>>,
}

impl<T> Default for TrieNode<T> {
    fn default() -> Self {
        TrieNode {
            values: None,
            children: IndexMap::new(),
        }
    }
}

impl<T> TrieNode<T> {
    /// Values stored at exactly this node.
    pub fn values(&self) -> Option<&[T]> {
        self.values.as_deref()
    }

    pub fn child(&self, segment: &str) -> Option<&TrieNode<T>> {
        self.children.get(segment)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &TrieNode<T>)> {
        self.children
            .iter()
            .map(|(segment, node)| (segment.as_str(), node))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Exact descent from this node.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode<T>> {
        let mut node = self;
        for segment in path {
            node = node.children.get(segment.as_ref())?;
        }
        Some(node)
    }

    fn lookup_or_insert<S: AsRef<str>>(&mut self, path: &[S]) -> &mut TrieNode<T> {
        let mut node = self;
        for segment in path {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_default();
        }
        node
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Permission to visit a node's children, handed to traversal visitors.
///
/// Children are visited only when the visitor calls [`Descend::descend`].
#[derive(Debug, Default)]
pub struct Descend {
    requested: bool,
}

impl Descend {
    pub fn descend(&mut self) {
        self.requested = true;
    }
}

// ============================================================================
// Trie
// ============================================================================

/// A prefix tree mapping segment paths to lists of values.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    root: TrieNode<T>,
    len: usize,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Trie {
            root: TrieNode::default(),
            len: 0,
        }
    }
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Trie::default()
    }

    pub fn root(&self) -> &TrieNode<T> {
        &self.root
    }

    /// Total number of values stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `value` at `path`, creating missing nodes.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], value: T) {
        let node = self.root.lookup_or_insert(path);
        node.values.get_or_insert_with(Vec::new).push(value);
        self.len += 1;
    }

    /// The node at exactly `path`, if every segment exists.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode<T>> {
        self.root.lookup(path)
    }

    /// Depth-first pre-order traversal starting at the node at `path`.
    ///
    /// The visitor receives the node's full path, the node and a [`Descend`]
    /// token; the node's children are visited (after the visitor returns)
    /// only if the visitor called [`Descend::descend`]. Nothing is visited
    /// when `path` does not exist.
    pub fn traverse<S, F>(&self, path: &[S], mut visitor: F)
    where
        S: AsRef<str>,
        F: FnMut(&[String], &TrieNode<T>, &mut Descend),
    {
        if let Some(node) = self.lookup(path) {
            let mut current: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
            traverse_node(node, &mut current, &mut visitor);
        }
    }

    /// Visit every node with values under `path` (inclusive), always
    /// descending.
    pub fn each<S, F>(&self, path: &[S], mut visitor: F)
    where
        S: AsRef<str>,
        F: FnMut(&[String], &[T]),
    {
        self.traverse(path, |current, node, descend| {
            if let Some(values) = node.values() {
                visitor(current, values);
            }
            descend.descend();
        });
    }
}

fn traverse_node<T, F>(node: &TrieNode<T>, path: &mut Vec<String>, visitor: &mut F)
where
    F: FnMut(&[String], &TrieNode<T>, &mut Descend),
{
    let mut descend = Descend::default();
    visitor(path, node, &mut descend);
    if !descend.requested {
        return;
    }
    for (segment, child) in &node.children {
        path.push(segment.clone());
        traverse_node(child, path, visitor);
        path.pop();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trie<&'static str> {
        let mut trie = Trie::new();
        trie.insert(&["Foo"], "Foo");
        trie.insert(&["Foo", "Bar"], "Foo::Bar");
        trie.insert(&["Foo", "Bar", "baz"], "Foo::Bar#baz");
        trie.insert(&["Qux", "quux"], "Qux#quux");
        trie
    }

    mod insertion {
        use super::*;

        #[test]
        fn lookup_returns_inserted_values() {
            let trie = sample();
            let node = trie.lookup(&["Foo", "Bar"]).unwrap();
            assert_eq!(node.values(), Some(&["Foo::Bar"][..]));
            assert_eq!(trie.len(), 4);
        }

        #[test]
        fn values_accumulate() {
            let mut trie = Trie::new();
            trie.insert(&["Foo"], 1);
            trie.insert(&["Foo"], 2);
            assert_eq!(trie.lookup(&["Foo"]).unwrap().values(), Some(&[1, 2][..]));
        }

        #[test]
        fn intermediate_nodes_have_no_values() {
            let trie = sample();
            let qux = trie.lookup(&["Qux"]).unwrap();
            assert!(qux.values().is_none());
            assert!(qux.has_children());
            assert!(trie.root().values().is_none());
        }

        #[test]
        fn missing_path_is_none() {
            let trie = sample();
            assert!(trie.lookup(&["Foo", "Missing"]).is_none());
            assert!(trie.lookup(&["Nope"]).is_none());
        }

        #[test]
        fn empty_path_is_root() {
            let trie = sample();
            let root = trie.lookup::<&str>(&[]).unwrap();
            let children: Vec<_> = root.children().map(|(segment, _)| segment).collect();
            assert_eq!(children, vec!["Foo", "Qux"]);
        }

        #[test]
        fn node_lookup_is_relative() {
            let trie = sample();
            let foo = trie.lookup(&["Foo"]).unwrap();
            let baz = foo.lookup(&["Bar", "baz"]).unwrap();
            assert_eq!(baz.values(), Some(&["Foo::Bar#baz"][..]));
            assert!(foo.child("Bar").is_some());
        }
    }

    mod traversal {
        use super::*;

        #[test]
        fn each_visits_in_insertion_order() {
            let trie = sample();
            let mut seen = Vec::new();
            trie.each::<&str, _>(&[], |path, values| {
                seen.push((path.join("/"), values.to_vec()));
            });
            assert_eq!(
                seen,
                vec![
                    ("Foo".to_string(), vec!["Foo"]),
                    ("Foo/Bar".to_string(), vec!["Foo::Bar"]),
                    ("Foo/Bar/baz".to_string(), vec!["Foo::Bar#baz"]),
                    ("Qux/quux".to_string(), vec!["Qux#quux"]),
                ]
            );
        }

        #[test]
        fn traverse_without_descend_stops() {
            let trie = sample();
            let mut seen = Vec::new();
            trie.traverse::<&str, _>(&[], |path, _node, descend| {
                seen.push(path.join("/"));
                if path.is_empty() {
                    descend.descend();
                }
            });
            assert_eq!(seen, vec!["", "Foo", "Qux"]);
        }

        #[test]
        fn traverse_from_subpath() {
            let trie = sample();
            let mut seen = Vec::new();
            trie.traverse(&["Foo"], |path, _node, descend| {
                seen.push(path.join("/"));
                descend.descend();
            });
            assert_eq!(seen, vec!["Foo", "Foo/Bar", "Foo/Bar/baz"]);
        }

        #[test]
        fn traverse_missing_path_visits_nothing() {
            let trie = sample();
            let mut count = 0;
            trie.traverse(&["Missing"], |_, _, _| count += 1);
            assert_eq!(count, 0);
        }
    }
}
