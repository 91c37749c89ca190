//! Error types for GitHub API operations.
//!
//! This module defines the error types that can occur while constructing the
//! client, talking to the GitHub API, decoding its responses, and reading or
//! writing the on-disk response cache.

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client configuration is unusable.
    ///
    /// Raised at construction time, most notably when no authentication
    /// token was supplied.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP request could not be performed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status code.
    #[error("GitHub API returned {status} for {url}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
        /// GitHub's error message, or the canonical reason phrase.
        message: String,
    },

    /// The response body was not valid JSON or did not match the expected
    /// record shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred during cache operations.
    #[error("I/O error during cache operation: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
