//! Configuration handling for decode

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::definition::{BlockDelimiter, ContainerPolicy};
use crate::error::DecodeError;
use crate::files::FileFilter;

/// Decode configuration, read from `.decode/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Coverage settings
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// File discovery settings
    #[serde(default)]
    pub files: FilesConfig,

    /// Index settings
    #[serde(default)]
    pub index: IndexConfig,
}

/// Coverage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageConfig {
    /// Minimum documented percentage for the coverage command to succeed
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// File discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilesConfig {
    /// Extra exclusion globs, matched against root-relative paths
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Index configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// Block delimiters that make DSL blocks containers
    #[serde(default = "default_container_delimiters")]
    pub container_delimiters: Vec<BlockDelimiter>,
}

fn default_threshold() -> f64 {
    100.0
}

fn default_container_delimiters() -> Vec<BlockDelimiter> {
    vec![BlockDelimiter::DoEnd]
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            container_delimiters: default_container_delimiters(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, DecodeError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DecodeError::Config(format!("failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| DecodeError::Config(format!("failed to parse config file: {}", e)))
    }

    /// Load configuration from .decode/config.toml in the given project root
    pub fn load_from_project(project_root: &Path) -> Result<Self, DecodeError> {
        let config_path = project_root.join(".decode").join("config.toml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn container_policy(&self) -> ContainerPolicy {
        ContainerPolicy::new(self.index.container_delimiters.clone())
    }

    pub fn file_filter(&self) -> Result<FileFilter, DecodeError> {
        FileFilter::new(&self.files.exclude)
    }
}
