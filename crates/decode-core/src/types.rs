//! Common types shared between the index, the adapters and the CLI.
//!
//! This module contains small value types that are used across modules,
//! avoiding circular dependencies between `definition`, `adapter` and `index`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Location Type
// ============================================================================

/// Location of a definition in a source file.
///
/// Used only for human-readable diagnostics, never for resolution.
/// - `path`: File path as given to the index
/// - `line`: 1-indexed line number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Location {
    /// File path.
    pub path: String,
    /// Line number (1-indexed).
    pub line: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Location {
            path: path.into(),
            line,
        }
    }

    /// Parse a location from "path:line" format.
    ///
    /// This parsing is robust against paths containing colons (e.g., Windows paths).
    pub fn parse(s: &str) -> Option<Self> {
        let (path, line) = s.rsplit_once(':')?;
        let line: u32 = line.parse().ok()?;
        if path.is_empty() {
            return None;
        }
        Some(Location::new(path, line))
    }

    /// Comparison key for deterministic sorting: (path, line).
    fn sort_key(&self) -> (&str, u32) {
        (&self.path, self.line)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// Access level of a definition as recorded during extraction.
///
/// Front ends start every scope at [`Visibility::Public`] and change it when
/// they encounter a visibility directive. Only some definition kinds honour
/// it (see [`crate::definition::Definition::is_public`]).
///
/// ```
/// use decode_core::types::Visibility;
///
/// let vis = Visibility::Private;
/// assert_eq!(serde_json::to_string(&vis).unwrap(), "\"private\"");
/// assert_eq!(Visibility::parse("protected"), Some(Visibility::Protected));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Accessible from anywhere (the default).
    #[default]
    Public,
    /// Accessible only from within the defining object.
    Private,
    /// Accessible from instances of the defining class hierarchy.
    Protected,
}

impl Visibility {
    /// Parse a visibility keyword.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }

    /// The keyword for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
