//! Error types for decode.
//!
//! The core is permissive about input data and strict about API misuse:
//! - Malformed comments never produce errors, they degrade to text.
//! - Unresolved references are `None`, not errors.
//! - Unsupported kind conversions and adapter contract violations are errors.
//!
//! Reading files and loading configuration are the only I/O failure points.

use std::io;

use thiserror::Error;

use crate::definition::Kind;

// ============================================================================
// Unified Error Type
// ============================================================================

/// Error type for the decode core.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A definition cannot be reinterpreted as the requested kind.
    #[error("unable to convert {from} into {to}")]
    UnsupportedConversion { from: Kind, to: Kind },

    /// An adapter referenced a parent that was not extracted before the child.
    #[error("definition {index} references parent {parent} which does not precede it")]
    InvalidParent { index: usize, parent: usize },

    /// No registered language has the given name.
    #[error("unknown language: {name}")]
    UnknownLanguage { name: String },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// A front end could not produce a syntax tree for a file.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for core operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

// ============================================================================
// Convenience Constructors
// ============================================================================

impl DecodeError {
    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        DecodeError::FileNotFound { path: path.into() }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown language error.
    pub fn unknown_language(name: impl Into<String>) -> Self {
        DecodeError::UnknownLanguage { name: name.into() }
    }
}

// ============================================================================
// Tests
// ============================================================================
