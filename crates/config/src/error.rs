//! Error types for the load/save lifecycle.
//!
//! Responsibilities:
//! - Define one variant per failing step of `FileConfiguration::load` and
//!   `FileConfiguration::save`.
//!
//! Does NOT handle:
//! - Path lookups. Missing keys are not errors; reads return `None`.
//!
//! Invariants:
//! - Every variant names the file (or resource) involved.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur while loading or saving a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create configuration file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Default resource '{id}' not found")]
    ResourceNotFound { id: String },

    #[error("Failed to read default resource '{id}': {source}")]
    Resource {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Configuration file {path} must contain a mapping at the top level, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("Failed to encode configuration for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to write configuration file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// True for failures raised by `save`.
    pub fn is_save_error(&self) -> bool {
        matches!(self, ConfigError::Encode { .. } | ConfigError::Write { .. })
    }
}

/// Result alias for lifecycle operations.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
