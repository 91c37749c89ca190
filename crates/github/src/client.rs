//! GitHub API client implementation.
//!
//! This module provides [`GitHubClient`], an authenticated client for the
//! GitHub REST API, and [`ClientConfig`], the values it is built from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::fetch::{Fetch, FetchOptions, HttpFetcher};

/// Origin every request path is appended to.
pub const API_ORIGIN: &str = "https://api.github.com/";

/// Name of the cache namespace owned by this client.
///
/// Keeps GitHub responses apart from other API clients sharing a cache root.
pub const CACHE_NAMESPACE: &str = "github";

/// Inputs for constructing a [`GitHubClient`].
///
/// # Examples
///
/// ```
/// use secrecy::SecretString;
/// use relnotes_github::ClientConfig;
///
/// let config = ClientConfig::new("octocat/Hello-World", "/work/hello")
///     .with_cache_dir(".cache")
///     .with_auth_token(SecretString::from("ghp_xxx".to_string()));
/// assert_eq!(config.repository, "octocat/Hello-World");
/// ```
#[derive(Debug)]
pub struct ClientConfig {
    /// Repository in `owner/name` form.
    pub repository: String,
    /// Project root that `cache_dir` is relative to.
    pub root_dir: PathBuf,
    /// Cache directory relative to `root_dir`. `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Token sent in the `Authorization` header.
    pub auth_token: Option<SecretString>,
}

impl ClientConfig {
    /// Creates a configuration without caching or token.
    #[must_use]
    pub fn new(repository: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            root_dir: root_dir.into(),
            cache_dir: None,
            auth_token: None,
        }
    }

    /// Enables response caching under `root_dir/cache_dir`.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Sets the authentication token.
    #[must_use]
    pub fn with_auth_token(mut self, token: SecretString) -> Self {
        self.auth_token = Some(token);
        self
    }
}

/// Authenticated GitHub API client.
///
/// Every lookup goes through a single request helper that prefixes
/// [`API_ORIGIN`], attaches the `Authorization: token …` header, and hands the
/// request to the [`Fetch`] implementation `F`.
///
/// # Security
///
/// The token is stored as a [`SecretString`] and never appears in `Debug`
/// output.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use relnotes_github::{ClientConfig, GitHubClient};
///
/// # async fn example() -> relnotes_github::Result<()> {
/// let config = ClientConfig::new("octocat/Hello-World", ".")
///     .with_cache_dir(".cache")
///     .with_auth_token(SecretString::from("ghp_your_token".to_string()));
/// let client = GitHubClient::new(config)?;
///
/// let issue = client.get_issue("42").await?;
/// let author = client.get_user(&issue.user.login).await?;
/// println!("{} by {}", issue.title, author.display_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient<F = HttpFetcher> {
    repository: String,
    cache_dir: Option<PathBuf>,
    auth_token: SecretString,
    fetcher: F,
}

impl GitHubClient<HttpFetcher> {
    /// Creates a client that performs requests with [`HttpFetcher`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no token, or an empty one, was
    /// supplied.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_fetcher(config, HttpFetcher::new())
    }
}

impl<F: Fetch> GitHubClient<F> {
    /// Creates a client that performs requests with `fetcher`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no token, or an empty one, was
    /// supplied.
    #[instrument(skip_all, fields(repository = %config.repository))]
    pub fn with_fetcher(config: ClientConfig, fetcher: F) -> Result<Self> {
        let auth_token = config
            .auth_token
            .filter(|token| !token.expose_secret().is_empty())
            .ok_or_else(|| Error::Configuration("Must provide GITHUB_AUTH".to_string()))?;

        let cache_dir = config
            .cache_dir
            .map(|dir| config.root_dir.join(dir).join(CACHE_NAMESPACE));
        debug!(?cache_dir, "creating GitHub client");

        Ok(Self {
            repository: config.repository,
            cache_dir,
            auth_token,
            fetcher,
        })
    }

    /// Returns the repository this client looks up issues in.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the resolved cache directory, or `None` when caching is
    /// disabled.
    #[must_use]
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Returns a reference to the underlying fetcher.
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Requests `path` and decodes the body into `T`.
    pub(crate) async fn request_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.request(path).await?;
        serde_json::from_value(value).map_err(|source| Error::Decode {
            url: api_url(path),
            source,
        })
    }

    /// Requests `path` relative to [`API_ORIGIN`] and returns the JSON body.
    async fn request(&self, path: &str) -> Result<serde_json::Value> {
        let url = api_url(path);
        let options = FetchOptions {
            cache_dir: self.cache_dir.clone(),
            headers: self.headers(),
        };
        debug!(%url, "requesting");
        self.fetcher.fetch(&url, &options).await
    }

    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "Authorization".to_string(),
            format!("token {}", self.auth_token.expose_secret()),
        )])
    }
}

fn api_url(path: &str) -> String {
    format!("{API_ORIGIN}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    /// Records every fetch and answers with a fixed body.
    #[derive(Debug, Default)]
    struct StubFetcher {
        calls: Mutex<Vec<(String, FetchOptions)>>,
        body: serde_json::Value,
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<serde_json::Value> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), options.clone()));
            Ok(self.body.clone())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("octocat/Hello-World", "/work/hello")
            .with_auth_token(SecretString::from("s3cr3t".to_string()))
    }

    #[test]
    fn new_without_token_fails() {
        let config = ClientConfig::new("octocat/Hello-World", "/work/hello");
        let err = GitHubClient::new(config).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg == "Must provide GITHUB_AUTH"));
    }

    #[test]
    fn new_with_empty_token_fails() {
        let config = ClientConfig::new("octocat/Hello-World", "/work/hello")
            .with_auth_token(SecretString::from("".to_string()));
        let err = GitHubClient::new(config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn cache_dir_is_namespaced_under_root() {
        let client = GitHubClient::new(config().with_cache_dir(".cache")).unwrap();
        assert_eq!(
            client.cache_dir(),
            Some(Path::new("/work/hello").join(".cache").join("github").as_path())
        );
    }

    #[test]
    fn cache_dir_absent_without_subdirectory() {
        let client = GitHubClient::new(config()).unwrap();
        assert_eq!(client.cache_dir(), None);
        assert_eq!(client.repository(), "octocat/Hello-World");
    }

    #[test]
    fn debug_output_redacts_token() {
        let client = GitHubClient::new(config()).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("s3cr3t"));
    }

    #[tokio::test]
    async fn request_prefixes_origin_and_sends_only_authorization() {
        let fetcher = StubFetcher {
            body: json!({"ok": true}),
            ..Default::default()
        };
        let client = GitHubClient::with_fetcher(config(), fetcher).unwrap();

        let body = client.request("rate_limit").await.unwrap();
        assert_eq!(body, json!({"ok": true}));

        let calls = client.fetcher().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, options) = &calls[0];
        assert_eq!(url, "https://api.github.com/rate_limit");
        assert_eq!(options.cache_dir, None);
        assert_eq!(
            options.headers,
            BTreeMap::from([("Authorization".to_string(), "token s3cr3t".to_string())])
        );
    }

    #[tokio::test]
    async fn request_passes_resolved_cache_dir() {
        let client =
            GitHubClient::with_fetcher(config().with_cache_dir(".cache"), StubFetcher::default())
                .unwrap();

        client.request("users/octocat").await.unwrap();

        let calls = client.fetcher().calls.lock().unwrap();
        assert_eq!(
            calls[0].1.cache_dir.as_deref(),
            Some(Path::new("/work/hello/.cache/github"))
        );
    }

    #[tokio::test]
    async fn request_as_reports_shape_mismatch_as_decode_error() {
        let fetcher = StubFetcher {
            body: json!({"unexpected": "shape"}),
            ..Default::default()
        };
        let client = GitHubClient::with_fetcher(config(), fetcher).unwrap();

        let err = client.get_user("octocat").await.unwrap_err();
        match err {
            Error::Decode { url, .. } => assert_eq!(url, "https://api.github.com/users/octocat"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
