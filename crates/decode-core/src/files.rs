//! Source file discovery.
//!
//! Walks an input root and collects candidate files, applying default
//! directory exclusions plus configured gitignore-style globs. Language
//! selection happens later, in [`crate::index::Index::update`].

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{DecodeError, DecodeResult};

/// Default directory exclusions that always apply.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "**/.git/**",
    "**/vendor/**",
    "**/node_modules/**",
    "**/tmp/**",
];

/// Exclusion globs, matched against root-relative paths.
#[derive(Debug)]
pub struct FileFilter {
    exclusions: GlobSet,
    default_exclusions: GlobSet,
}

impl FileFilter {
    /// Build a filter from user exclusion patterns.
    pub fn new(exclusions: &[String]) -> DecodeResult<Self> {
        let defaults: Vec<String> = DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect();
        Ok(FileFilter {
            exclusions: build_glob_set(exclusions)?,
            default_exclusions: build_glob_set(&defaults)?,
        })
    }

    /// Check if a root-relative path should be collected.
    pub fn matches(&self, path: &Path) -> bool {
        !self.default_exclusions.is_match(path) && !self.exclusions.is_match(path)
    }
}

/// Collect every file under `root` that passes `filter`, sorted by path.
///
/// A `root` that is itself a file is returned as is.
pub fn collect_files(root: &Path, filter: &FileFilter) -> DecodeResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(DecodeError::file_not_found(root.display().to_string()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if !filter.matches(relative) {
            debug!(path = %relative.display(), "excluded");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Build a GlobSet from a list of pattern strings.
fn build_glob_set(patterns: &[String]) -> DecodeResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            DecodeError::Config(format!("invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| DecodeError::Config(format!("invalid glob patterns: {}", e)))
}

// ============================================================================
// Tests
// ============================================================================
