//! Repository identifiers with flexible parsing.
//!
//! This module provides the [`Repository`] type which supports two formats:
//!
//! - Short format: `"owner/repo"` string
//! - Full format: `{ "owner": "...", "repo": "..." }` object
//!
//! # Examples
//!
//! ```
//! use relnotes_config::Repository;
//!
//! // Parse from short format
//! let repo: Repository = serde_json::from_str(r#""rust-lang/rust""#).unwrap();
//! assert_eq!(repo.owner(), "rust-lang");
//! assert_eq!(repo.repo(), "rust");
//!
//! // Parse from full format
//! let repo: Repository = serde_json::from_str(r#"{"owner": "org", "repo": "repo"}"#).unwrap();
//! assert_eq!(repo.full_name(), "org/repo");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A GitHub repository identifier.
///
/// Always serializes to the short `"owner/repo"` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    owner: String,
    repo: String,
}

impl Repository {
    /// Creates a new repository identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use relnotes_config::Repository;
    ///
    /// let repo = Repository::new("rust-lang", "rust");
    /// assert_eq!(repo.owner(), "rust-lang");
    /// assert_eq!(repo.repo(), "rust");
    /// ```
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses a repository from the short format `"owner/repo"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not contain exactly one `/`, or
    /// if either side of it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use relnotes_config::Repository;
    ///
    /// let repo = Repository::parse_short("rust-lang/rust").unwrap();
    /// assert_eq!(repo.owner(), "rust-lang");
    /// assert_eq!(repo.repo(), "rust");
    ///
    /// assert!(Repository::parse_short("invalid").is_err());
    /// assert!(Repository::parse_short("too/many/slashes").is_err());
    /// ```
    pub fn parse_short(s: &str) -> Result<Self> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        };
        if repo.contains('/') {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        }

        let owner = owner.trim();
        let repo = repo.trim();

        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRepository(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        Ok(Self::new(owner, repo))
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the full repository name in `"owner/repo"` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_short(s)
    }
}

impl Serialize for Repository {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Repository {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct RepositoryVisitor;

        impl<'de> Visitor<'de> for RepositoryVisitor {
            type Value = Repository;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'owner/repo' or an object with owner and repo fields")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Repository::parse_short(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut owner: Option<String> = None;
                let mut repo: Option<String> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "owner" => {
                            if owner.is_some() {
                                return Err(de::Error::duplicate_field("owner"));
                            }
                            owner = Some(map.next_value()?);
                        }
                        "repo" => {
                            if repo.is_some() {
                                return Err(de::Error::duplicate_field("repo"));
                            }
                            repo = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                let owner = owner.ok_or_else(|| de::Error::missing_field("owner"))?;
                let repo = repo.ok_or_else(|| de::Error::missing_field("repo"))?;

                Repository::parse_short(&format!("{owner}/{repo}")).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RepositoryVisitor)
    }
}
