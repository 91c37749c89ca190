//! Issue lookups.
//!
//! GitHub serves pull requests through the issues endpoint as well; the two
//! are told apart by the presence of the `pull_request` object.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::fetch::Fetch;

/// An issue (or pull request) as returned by `GET /repos/{repo}/issues/{number}`.
///
/// Only the fields needed for release notes are decoded; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// The issue number.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// Present only when the issue is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRef>,
    /// Labels in the order GitHub returns them.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// The issue author.
    pub user: Author,
}

impl IssueRecord {
    /// Returns whether this issue is actually a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Returns the label names, preserving order.
    ///
    /// # Examples
    ///
    /// ```
    /// use relnotes_github::IssueRecord;
    ///
    /// let issue: IssueRecord = serde_json::from_str(r#"{
    ///     "number": 7,
    ///     "title": "Fix typo",
    ///     "labels": [{"name": "docs"}, {"name": "good first issue"}],
    ///     "user": {"login": "octocat", "html_url": "https://github.com/octocat"}
    /// }"#).unwrap();
    ///
    /// assert_eq!(issue.label_names(), vec!["docs", "good first issue"]);
    /// assert!(!issue.is_pull_request());
    /// ```
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.name.as_str()).collect()
    }
}

/// Link to the pull request backing an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The pull request's web URL.
    pub html_url: String,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label name.
    pub name: String,
}

/// The author of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The author's login.
    pub login: String,
    /// The author's profile URL.
    pub html_url: String,
}

impl<F: Fetch> GitHubClient<F> {
    /// Fetches an issue or pull request by number.
    ///
    /// The number is not validated locally; GitHub's answer to a malformed
    /// value is returned as the error.
    ///
    /// # Errors
    ///
    /// Returns whatever error the fetcher produces (HTTP status, network,
    /// invalid JSON), or [`Error::Decode`](crate::Error::Decode) if the body
    /// does not look like an issue.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: relnotes_github::GitHubClient) -> relnotes_github::Result<()> {
    /// let issue = client.get_issue("42").await?;
    /// println!("#{} {} {:?}", issue.number, issue.title, issue.label_names());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(repository = %self.repository()))]
    pub async fn get_issue(&self, issue: &str) -> Result<IssueRecord> {
        let path = format!("repos/{}/issues/{issue}", self.repository());
        self.request_as(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue_json() -> serde_json::Value {
        json!({
            "number": 42,
            "title": "Add dark mode",
            "state": "closed",
            "labels": [
                {"id": 1, "name": "enhancement", "color": "a2eeef"},
                {"id": 2, "name": "ui", "color": "ededed"}
            ],
            "user": {
                "login": "octocat",
                "id": 583231,
                "html_url": "https://github.com/octocat"
            }
        })
    }

    #[test]
    fn decodes_plain_issue() {
        let issue: IssueRecord = serde_json::from_value(issue_json()).unwrap();

        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Add dark mode");
        assert_eq!(issue.label_names(), vec!["enhancement", "ui"]);
        assert_eq!(issue.user.login, "octocat");
        assert_eq!(issue.user.html_url, "https://github.com/octocat");
        assert!(issue.pull_request.is_none());
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn decodes_pull_request_link() {
        let mut value = issue_json();
        value["pull_request"] = json!({
            "url": "https://api.github.com/repos/octocat/Hello-World/pulls/42",
            "html_url": "https://github.com/octocat/Hello-World/pull/42"
        });

        let issue: IssueRecord = serde_json::from_value(value).unwrap();

        assert!(issue.is_pull_request());
        assert_eq!(
            issue.pull_request.unwrap().html_url,
            "https://github.com/octocat/Hello-World/pull/42"
        );
    }

    #[test]
    fn missing_labels_decode_as_empty() {
        let mut value = issue_json();
        value.as_object_mut().unwrap().remove("labels");

        let issue: IssueRecord = serde_json::from_value(value).unwrap();
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn missing_author_is_rejected() {
        let mut value = issue_json();
        value.as_object_mut().unwrap().remove("user");

        assert!(serde_json::from_value::<IssueRecord>(value).is_err());
    }

    #[test]
    fn plain_issue_serializes_without_pull_request() {
        let issue: IssueRecord = serde_json::from_value(issue_json()).unwrap();
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("pull_request").is_none());
    }
}
