//! GitHub API client for relnotes.
//!
//! This crate resolves issue, pull request, and contributor metadata from the
//! GitHub REST API so release notes can be rendered without touching HTTP.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`GitHubClient`]: The authenticated API client
//! - [`ClientConfig`]: Repository, cache location, and token for the client
//! - [`IssueRecord`] and [`UserRecord`]: Typed views of the API responses
//! - [`Fetch`] and [`HttpFetcher`]: The HTTP layer the client delegates to
//! - [`ResponseCache`] and [`CachedResponse`]: Persistent response caching
//! - [`Error`]: Error types for GitHub API operations
//!
//! # Authentication
//!
//! A token is mandatory. The client never reads the environment; callers
//! resolve the token (usually from `GITHUB_AUTH`) and pass it in through
//! [`ClientConfig`]. Construction fails with [`Error::Configuration`] when it
//! is missing or empty.
//!
//! # Caching
//!
//! When a cache directory is configured, responses are stored under
//! `{root}/{cache_dir}/github/` and revalidated with conditional requests.
//!
//! # Examples
//!
//! ```no_run
//! use secrecy::SecretString;
//! use relnotes_github::{ClientConfig, GitHubClient};
//!
//! # async fn example() -> relnotes_github::Result<()> {
//! let config = ClientConfig::new("rust-lang/rust", ".")
//!     .with_cache_dir(".cache")
//!     .with_auth_token(SecretString::from("ghp_your_token_here".to_string()));
//! let client = GitHubClient::new(config)?;
//!
//! let issue = client.get_issue("1").await?;
//! if issue.is_pull_request() {
//!     println!("#{} is a pull request", issue.number);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod fetch;
pub mod issue;
pub mod user;

pub use cache::{CachedResponse, ResponseCache};
pub use client::{API_ORIGIN, ClientConfig, GitHubClient};
pub use error::{Error, Result};
pub use fetch::{Fetch, FetchOptions, HttpFetcher};
pub use issue::{Author, IssueRecord, Label, PullRequestRef};
pub use user::UserRecord;
