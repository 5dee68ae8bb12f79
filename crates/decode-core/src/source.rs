//! Source files known to the index.

use std::cell::OnceCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, DecodeResult};

/// A source file and the language that extracts it.
///
/// Content is read from disk on first access and cached, unless it was
/// supplied up front with [`Source::from_content`].
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    /// Name of the language adapter for this file.
    pub language: String,
    content: OnceCell<String>,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            language: language.into(),
            content: OnceCell::new(),
        }
    }

    /// A source whose content is already in memory.
    pub fn from_content(
        path: impl Into<PathBuf>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let source = Source::new(path, language);
        let _ = source.content.set(content.into());
        source
    }

    /// The file path as a display string.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// The file's content, read on first access.
    pub fn read(&self) -> DecodeResult<&str> {
        if let Some(content) = self.content.get() {
            return Ok(content);
        }
        let content = read_file(&self.path)?;
        Ok(self.content.get_or_init(|| content))
    }
}

fn read_file(path: &Path) -> DecodeResult<String> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => DecodeError::file_not_found(path.display().to_string()),
        _ => DecodeError::Io(error),
    })
}

// ============================================================================
// Tests
// ============================================================================
