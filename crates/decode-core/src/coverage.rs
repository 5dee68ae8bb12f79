//! Documentation coverage of an index's public interface.
//!
//! The trie is traversed from the root. At every node with values, each
//! public, non-abstract definition is counted as documented or missing by
//! its qualified name. Traversal descends below a node only if one of its
//! values is a public container, or if it has no values at all. A name
//! documented by any of its definitions (e.g. one side of a reopened class)
//! counts as documented.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::definition::{ContainerPolicy, Definition, Kind};
use crate::index::Index;
use crate::types::Location;

/// An undocumented public definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDefinition {
    pub qualified_name: String,
    pub kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl MissingDefinition {
    fn from_definition(definition: &Definition) -> Self {
        MissingDefinition {
            qualified_name: definition.qualified_name().to_string(),
            kind: definition.kind.kind(),
            location: definition.location.clone(),
        }
    }
}

/// Result of a coverage run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Number of documented public names.
    pub documented: usize,
    /// Number of public names considered.
    pub total: usize,
    /// Undocumented names, in discovery order.
    pub missing: Vec<MissingDefinition>,
    /// `documented / total` as a percentage; 100 when nothing was counted.
    pub percentage: f64,
}

impl CoverageReport {
    fn new(documented: usize, missing: Vec<MissingDefinition>) -> Self {
        let total = documented + missing.len();
        let percentage = if total == 0 {
            100.0
        } else {
            documented as f64 * 100.0 / total as f64
        };
        CoverageReport {
            documented,
            total,
            missing,
            percentage,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Whether the percentage reaches `threshold` (0 to 100).
    pub fn meets(&self, threshold: f64) -> bool {
        self.percentage >= threshold
    }
}

/// Compute documentation coverage for `index`.
pub fn coverage(index: &Index, policy: &ContainerPolicy) -> CoverageReport {
    let mut documented: HashSet<String> = HashSet::new();
    let mut missing: IndexMap<String, MissingDefinition> = IndexMap::new();

    index.trie().traverse::<&str, _>(&[], |_path, node, descend| {
        let Some(ids) = node.values() else {
            descend.descend();
            return;
        };

        let mut public_container = false;
        for definition in ids.iter().filter_map(|&id| index.definition(id)) {
            if !definition.is_public() {
                continue;
            }
            if definition.is_container_with(policy) {
                public_container = true;
            }
            if definition.is_abstract() {
                continue;
            }

            let name = definition.qualified_name();
            if definition.is_documented() {
                documented.insert(name.to_string());
            } else {
                missing
                    .entry(name.to_string())
                    .or_insert_with(|| MissingDefinition::from_definition(definition));
            }
        }

        if public_container {
            descend.descend();
        }
    });

    missing.retain(|name, _| !documented.contains(name));
    CoverageReport::new(documented.len(), missing.into_values().collect())
}

// ============================================================================
// Tests
// ============================================================================
