//! Provider abstraction for the repository-hosting API.
//!
//! The release flow only needs the latest published release of one
//! repository; this module keeps that behind a trait so tests can swap in a
//! mock instead of the GitHub API.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use github::{DEFAULT_API_URL, GitHubProvider};

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

impl TryFrom<String> for RepoId {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RepoId> for String {
    fn from(repo: RepoId) -> Self {
        repo.to_string()
    }
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
}

/// The latest published release of the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Release {
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    /// Release title, shown by the CLI when present
    #[serde(default)]
    pub name: Option<String>,
    /// Publication date (ISO 8601)
    #[serde(default)]
    pub published_at: Option<String>,
    /// Downloadable assets, in the order the API listed them
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Source of release metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetch the latest published release of a repository.
    async fn get_latest_release(&self, repo: &RepoId) -> Result<Release>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_parse() {
        let repo: RepoId = "owner/repo".parse().unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.repo, "repo");
    }

    #[test]
    fn test_repo_id_display() {
        let repo = RepoId {
            owner: "owner".into(),
            repo: "repo".into(),
        };
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn test_repo_id_invalid() {
        assert!("invalid".parse::<RepoId>().is_err());
        assert!("".parse::<RepoId>().is_err());
        assert!("/repo".parse::<RepoId>().is_err());
        assert!("owner/".parse::<RepoId>().is_err());
        assert!("a/b/c".parse::<RepoId>().is_err());
    }

    #[test]
    fn test_repo_id_serde_as_string() {
        let repo: RepoId = serde_json::from_str(r#""owner/repo""#).unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(serde_json::to_string(&repo).unwrap(), r#""owner/repo""#);
        assert!(serde_json::from_str::<RepoId>(r#""nope""#).is_err());
    }
}
