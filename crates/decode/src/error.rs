//! Error types for the decode CLI.
//!
//! [`CliError`] wraps core errors and adds the command-level failures.
//! [`OutputErrorCode`] maps each error to the stable code used both as the
//! process exit status and in JSON error responses.

use std::fmt;

use thiserror::Error;

use decode_core::DecodeError;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or configuration.
    InvalidArguments = 2,
    /// A reference or name could not be resolved, or a file is missing.
    ResolutionError = 3,
    /// Documentation coverage is below the threshold.
    InsufficientDocumentation = 4,
    /// Internal errors (bugs, IO failures, adapter contract violations).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// CLI Error
// ============================================================================

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments from the caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// A reference or qualified name did not resolve.
    #[error("no definition found for {reference}")]
    NotFound { reference: String },

    /// Coverage fell short of the configured threshold.
    #[error("documentation coverage {percentage:.1}% ({documented}/{total}) is below {threshold}%")]
    InsufficientDocumentation {
        documented: usize,
        total: usize,
        percentage: f64,
        threshold: f64,
    },

    /// Output could not be written.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// An error from the core library.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CliError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        CliError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(reference: impl Into<String>) -> Self {
        CliError::NotFound {
            reference: reference.into(),
        }
    }
}

impl From<&CliError> for OutputErrorCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            CliError::NotFound { .. } => OutputErrorCode::ResolutionError,
            CliError::InsufficientDocumentation { .. } => OutputErrorCode::InsufficientDocumentation,
            CliError::Output(_) => OutputErrorCode::InternalError,
            CliError::Decode(err) => match err {
                DecodeError::Config(_) | DecodeError::UnknownLanguage { .. } => {
                    OutputErrorCode::InvalidArguments
                }
                DecodeError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
                DecodeError::UnsupportedConversion { .. }
                | DecodeError::InvalidParent { .. }
                | DecodeError::Parse { .. }
                | DecodeError::Io(_) => OutputErrorCode::InternalError,
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
