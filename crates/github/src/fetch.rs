//! HTTP fetching with optional on-disk caching.
//!
//! [`GitHubClient`](crate::GitHubClient) never performs network I/O itself.
//! It hands a URL and a set of [`FetchOptions`] to a [`Fetch`]
//! implementation and gets back the parsed JSON body. [`HttpFetcher`] is the
//! production implementation; tests substitute their own.
//!
//! # Caching
//!
//! When [`FetchOptions::cache_dir`] is set, [`HttpFetcher`] stores every
//! successful response in a [`ResponseCache`] and revalidates it on the next
//! request with `If-None-Match` / `If-Modified-Since`. A `304 Not Modified`
//! answer is served from disk. There is no expiry and no eviction.
//!
//! A cache file that cannot be read or parsed is treated as a miss and is
//! replaced by the next successful response. A `304` arriving when nothing is
//! cached is reported as [`Error::Status`].

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::header::{
    ETAG, HeaderMap, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::cache::{CachedResponse, ResponseCache};
use crate::error::{Error, Result};

/// User agent sent with every request; GitHub rejects requests without one.
const DEFAULT_USER_AGENT: &str = "relnotes";

/// Per-request inputs for a [`Fetch`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Directory to cache responses in. `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
}

/// Fetches a URL and returns its body parsed as JSON.
///
/// Implementations own network I/O, caching, and the mapping of HTTP
/// failures to [`Error`]. Callers propagate whatever error they return.
pub trait Fetch: Send + Sync {
    /// Performs a `GET` request for `url`.
    fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

/// Error payload returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// [`Fetch`] implementation backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher around an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    #[instrument(skip(self, options), fields(cached = options.cache_dir.is_some()))]
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<serde_json::Value> {
        let cache = options
            .cache_dir
            .as_ref()
            .map(ResponseCache::with_path)
            .transpose()?;
        let cached = match &cache {
            Some(cache) => cache.load(url).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable cache entry");
                None
            }),
            None => None,
        };

        let mut request = self.client.get(url).header(USER_AGENT, DEFAULT_USER_AGENT);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(cached) = &cached {
            if let Some(etag) = &cached.etag {
                request = request.header(IF_NONE_MATCH, etag.as_str());
            }
            if let Some(last_modified) = &cached.last_modified {
                request = request.header(IF_MODIFIED_SINCE, last_modified.as_str());
            }
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if status == StatusCode::NOT_MODIFIED
            && let Some(cached) = cached
        {
            debug!("serving cached response");
            return Ok(cached.body);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
            warn!(status = status.as_u16(), %message, "request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        let etag = header_value(response.headers(), ETAG);
        let last_modified = header_value(response.headers(), LAST_MODIFIED);
        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })?;

        if let Some(cache) = &cache {
            let entry = CachedResponse::new(body.clone(), etag, last_modified);
            if let Err(e) = cache.save(url, &entry) {
                warn!(error = %e, "failed to write cache entry");
            }
        }

        Ok(body)
    }
}

/// Returns a header as an owned string, if present and valid UTF-8.
fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
