//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Invalid repository format.
    #[error("invalid repository format: {0}")]
    InvalidRepository(String),

    /// The cache directory must be relative to the project root.
    #[error("cache directory must be a relative path, got {path}")]
    InvalidCacheDir {
        /// The rejected path.
        path: PathBuf,
    },

    /// No repository was configured.
    #[error("no repository configured; set `repo` in the changelog config")]
    MissingRepository,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
