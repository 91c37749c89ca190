//! Configuration management for relnotes.
//!
//! This crate handles everything resolved at the process boundary before a
//! GitHub client is built: the project's changelog config file and the API
//! token.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`repository`]: Repository identifiers with flexible parsing
//! - [`auth`]: GitHub token resolution from the environment
//! - [`persistence`]: Config file discovery and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Config File
//!
//! `.changelog.json5` (or `.changelog.json`) at the project root:
//!
//! ```json5
//! {
//!   // Short format "owner/repo", or { owner: "...", repo: "..." }
//!   repo: "octocat/Hello-World",
//!   // Relative to the project root; omit to disable caching
//!   cache_dir: ".changelog",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use relnotes_config::{Config, auth::token_from_env};
//!
//! # fn example() -> relnotes_config::Result<()> {
//! let config = Config::load(".")?;
//! let repo = config.repository()?;
//! let token = token_from_env();
//! println!("{repo}: authenticated = {}", token.is_some());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod repository;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use repository::Repository;
