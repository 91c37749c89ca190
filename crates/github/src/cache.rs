//! On-disk cache for GitHub API responses.
//!
//! Each cached response is stored as a JSON file named after a UUID v5 of the
//! request URL, together with the validators (`ETag`, `Last-Modified`) needed
//! to revalidate it with a conditional request.
//!
//! # Directory Structure
//!
//! ```text
//! {root}/{cache_dir}/
//! └── github/
//!     ├── 2f1c...e9.json
//!     └── 8a40...13.json
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use serde_json::json;
//! use relnotes_github::{CachedResponse, ResponseCache};
//!
//! # fn example() -> relnotes_github::Result<()> {
//! let cache = ResponseCache::with_path(".cache/github")?;
//! let url = "https://api.github.com/users/octocat";
//!
//! cache.save(url, &CachedResponse::new(json!({"login": "octocat"}), None, None))?;
//!
//! if let Some(cached) = cache.load(url)? {
//!     println!("cached {} ago", cached.age().as_secs());
//! }
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A cached API response with the metadata needed for revalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// The parsed JSON body.
    pub body: serde_json::Value,
    /// When this response was cached.
    pub cached_at: DateTime<Utc>,
    /// `ETag` from the response (for `If-None-Match`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// `Last-Modified` from the response (for `If-Modified-Since`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl CachedResponse {
    /// Creates a new `CachedResponse` stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use relnotes_github::CachedResponse;
    ///
    /// let cached = CachedResponse::new(json!({}), Some("W/\"abc123\"".to_string()), None);
    /// assert_eq!(cached.etag.as_deref(), Some("W/\"abc123\""));
    /// assert!(cached.last_modified.is_none());
    /// ```
    #[must_use]
    pub fn new(
        body: serde_json::Value,
        etag: Option<String>,
        last_modified: Option<String>,
    ) -> Self {
        Self {
            body,
            cached_at: Utc::now(),
            etag,
            last_modified,
        }
    }

    /// Returns the age of the cache entry.
    #[must_use]
    pub fn age(&self) -> Duration {
        let diff = Utc::now().signed_duration_since(self.cached_at);
        // Clock skew can put cached_at in the future
        diff.to_std().unwrap_or(Duration::ZERO)
    }

    /// Returns whether the entry is older than the given maximum age.
    #[must_use]
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

/// File-backed cache of GitHub API responses, keyed by request URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    base_path: PathBuf,
}

impl ResponseCache {
    /// Opens a cache rooted at `base_path`, creating the directory if it
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip_all)]
    pub fn with_path(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        debug!(?base_path, "opening response cache");

        if !base_path.exists() {
            debug!(?base_path, "creating cache directory");
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_path })
    }

    /// Returns the directory this cache writes to.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads the cached response for `url`.
    ///
    /// Returns `None` if nothing is cached for the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file exists but cannot be read or
    /// contains invalid JSON.
    #[instrument(skip(self))]
    pub fn load(&self, url: &str) -> Result<Option<CachedResponse>> {
        let path = self.cache_path(url);

        match fs::read_to_string(&path) {
            Ok(content) => {
                let cached: CachedResponse = serde_json::from_str(&content).map_err(|e| {
                    warn!(?path, error = %e, "failed to parse cache file");
                    Error::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("failed to parse cache file: {e}"),
                    ))
                })?;
                debug!(cached_at = %cached.cached_at, "loaded cached response");
                Ok(Some(cached))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "cache miss");
                Ok(None)
            }
            Err(e) => {
                warn!(?path, error = %e, "failed to read cache file");
                Err(Error::Io(e))
            }
        }
    }

    /// Saves a response for `url`, overwriting any previous entry.
    ///
    /// The entry is written to a temporary file in the cache directory and
    /// renamed over the target, so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file cannot be written.
    #[instrument(skip(self, cached))]
    pub fn save(&self, url: &str, cached: &CachedResponse) -> Result<()> {
        let path = self.cache_path(url);

        let content = serde_json::to_string_pretty(cached).map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("failed to serialize cache entry: {e}"),
            ))
        })?;

        let mut file = NamedTempFile::new_in(&self.base_path)?;
        file.write_all(content.as_bytes())?;
        file.persist(&path).map_err(|e| Error::Io(e.error))?;
        debug!(?path, "cached response");

        Ok(())
    }

    /// Returns the cache file path for a URL.
    pub(crate) fn cache_path(&self, url: &str) -> PathBuf {
        let key = Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes());
        self.base_path.join(format!("{key}.json"))
    }
}
