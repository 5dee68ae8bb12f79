//! decode - documentation coverage and symbol lookup for Ruby code.
//!
//! This crate provides the `decode` CLI binary.
//!
//! ## Modules
//!
//! - `cli` - Command implementations over a built index
//! - `error` - CLI error type and exit codes
//! - `output` - Response types and JSON/text emission

pub mod cli;
pub mod error;
pub mod output;

// Re-export core types for convenience
pub use decode_core::config::Config;
pub use decode_core::index::Index;
pub use error::{CliError, OutputErrorCode};
pub use output::{OutputFormat, SCHEMA_VERSION};
