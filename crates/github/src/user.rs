//! User lookups.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::fetch::Fetch;

/// A user as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's login.
    pub login: String,
    /// The user's display name. GitHub sends `null` when none is set.
    #[serde(default)]
    pub name: Option<String>,
    /// The user's profile URL.
    pub html_url: String,
}

impl UserRecord {
    /// Returns the display name, falling back to the login.
    ///
    /// # Examples
    ///
    /// ```
    /// use relnotes_github::UserRecord;
    ///
    /// let user: UserRecord = serde_json::from_str(
    ///     r#"{"login": "octocat", "name": null, "html_url": "https://github.com/octocat"}"#,
    /// ).unwrap();
    /// assert_eq!(user.display_name(), "octocat");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }
}

impl<F: Fetch> GitHubClient<F> {
    /// Fetches a user by login.
    ///
    /// # Errors
    ///
    /// Returns whatever error the fetcher produces, or
    /// [`Error::Decode`](crate::Error::Decode) if the body does not look like
    /// a user.
    #[instrument(skip(self))]
    pub async fn get_user(&self, login: &str) -> Result<UserRecord> {
        self.request_as(&format!("users/{login}")).await
    }
}
