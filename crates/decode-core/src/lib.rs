//! decode-core: symbol index and reference resolution for documented source
//! code.
//!
//! Language front ends extract [`definition::Definition`]s with their leading
//! comments. The [`index::Index`] publishes them into a prefix trie keyed by
//! lexical path, resolves textual references against it, and parses comments
//! into structured [`documentation::Documentation`] on demand.

pub mod adapter;
pub mod comment;
pub mod config;
pub mod coverage;
pub mod definition;
pub mod documentation;
pub mod error;
pub mod files;
pub mod index;
pub mod language;
pub mod reference;
pub mod rewrite;
pub mod source;
pub mod trie;
pub mod types;

pub use error::{DecodeError, DecodeResult};
