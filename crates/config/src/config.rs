//! Core configuration struct and loading logic.
//!
//! This module provides the [`Config`] struct, the settings a project keeps
//! in its changelog config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file};
use crate::repository::Repository;

/// Project-level changelog configuration.
///
/// # Examples
///
/// ```
/// use relnotes_config::{Config, Repository};
///
/// // Create a default config
/// let config = Config::default();
/// assert!(config.repo.is_none());
///
/// // Create a custom config
/// let config = Config {
///     repo: Some(Repository::new("octocat", "Hello-World")),
///     cache_dir: Some(".cache".into()),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The GitHub repository issues and pull requests are looked up in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<Repository>,

    /// Directory for cached API responses, relative to the project root.
    ///
    /// Caching is disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the project root.
    ///
    /// Looks for `.changelog.json5`, then `.changelog.json`, in `root_dir`.
    /// If neither exists, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use relnotes_config::Config;
    ///
    /// # fn example() -> relnotes_config::Result<()> {
    /// let config = Config::load(".")?;
    /// if let Some(repo) = &config.repo {
    ///     println!("Repository: {repo}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(root_dir: impl AsRef<Path>) -> Result<Self> {
        match find_config_file(root_dir) {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCacheDir`] if `cache_dir` is absolute.
    pub fn validate(&self) -> Result<()> {
        if let Some(cache_dir) = self.cache_dir.as_ref().filter(|dir| dir.is_absolute()) {
            return Err(ConfigError::InvalidCacheDir {
                path: cache_dir.clone(),
            });
        }
        Ok(())
    }

    /// Returns the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRepository`] if none is configured.
    pub fn repository(&self) -> Result<&Repository> {
        self.repo.as_ref().ok_or(ConfigError::MissingRepository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.repo.is_none());
        assert!(config.cache_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn repository_missing() {
        let config = Config::default();
        assert!(matches!(
            config.repository(),
            Err(ConfigError::MissingRepository)
        ));
    }

    #[test]
    fn repository_present() {
        let config = Config {
            repo: Some(Repository::new("owner", "repo")),
            ..Default::default()
        };
        assert_eq!(config.repository().unwrap().full_name(), "owner/repo");
    }

    #[test]
    fn validate_rejects_absolute_cache_dir() {
        let config = Config {
            cache_dir: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCacheDir { .. })
        ));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn deserialize_full() {
        let json = r#"{"repo": "octocat/Hello-World", "cache_dir": ".changelog"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.repo, Some(Repository::new("octocat", "Hello-World")));
        assert_eq!(config.cache_dir, Some(PathBuf::from(".changelog")));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn load_returns_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_json5_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".changelog.json5"),
            r#"
            {
                // The repository to resolve issues in
                repo: "octocat/Hello-World",
                cache_dir: ".changelog",
            }
            "#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.repository().unwrap().full_name(), "octocat/Hello-World");
        assert_eq!(config.cache_dir, Some(PathBuf::from(".changelog")));
    }

    #[test]
    fn load_from_rejects_invalid_repository() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".changelog.json");
        std::fs::write(&path, r#"{"repo": "not-a-repo"}"#).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
