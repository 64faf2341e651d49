//! GitHub provider implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use reqwest::Client;

use crate::http::HttpClient;

use super::{Provider, Release, ReleaseAsset, RepoId};

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub tag_name: String,
        pub name: Option<String>,
        pub published_at: Option<String>,
        pub assets: Vec<Asset>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub name: String,
        pub browser_download_url: String,
    }
}

/// GitHub provider implementation.
pub struct GitHubProvider {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubProvider {
    /// Create a new GitHub provider with custom API URL.
    /// Used primarily for testing.
    #[cfg(test)]
    pub fn with_api_url(client: Client, api_url: &str) -> Self {
        Self::from_http_client(HttpClient::new(client), api_url)
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn latest_release_url(&self, repo: &RepoId) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        )
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    #[tracing::instrument(skip(self))]
    async fn get_latest_release(&self, repo: &RepoId) -> Result<Release> {
        let url = self.latest_release_url(repo);
        debug!("Fetching latest release from {}...", url);

        let release: api::Release = self
            .http_client
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch latest release of {}", repo))?;

        Ok(release.into())
    }
}

impl From<api::Release> for Release {
    fn from(r: api::Release) -> Self {
        Release {
            tag: r.tag_name,
            name: r.name,
            published_at: r.published_at,
            assets: r.assets.into_iter().map(|a| a.into()).collect(),
        }
    }
}

impl From<api::Asset> for ReleaseAsset {
    fn from(a: api::Asset) -> Self {
        ReleaseAsset {
            name: a.name,
            download_url: a.browser_download_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;

    fn repo() -> RepoId {
        RepoId {
            owner: "test-owner".to_string(),
            repo: "test-repo".to_string(),
        }
    }

    #[test]
    fn test_github_provider_trims_api_url() {
        let provider = GitHubProvider::with_api_url(Client::new(), DEFAULT_API_URL);
        assert_eq!(
            provider.latest_release_url(&repo()),
            "https://api.github.com/repos/test-owner/test-repo/releases/latest"
        );

        let custom = GitHubProvider::with_api_url(Client::new(), "https://custom.api/");
        assert_eq!(
            custom.latest_release_url(&repo()),
            "https://custom.api/repos/test-owner/test-repo/releases/latest"
        );
    }

    #[test]
    fn test_latest_release_url() {
        let provider = GitHubProvider::with_api_url(Client::new(), "https://custom.api");
        assert_eq!(
            provider.latest_release_url(&repo()),
            "https://custom.api/repos/test-owner/test-repo/releases/latest"
        );
    }

    #[test]
    fn test_release_conversion_keeps_asset_order() {
        let api_release = api::Release {
            tag_name: "v1.0.0".into(),
            name: Some("Release 1.0".into()),
            published_at: None,
            assets: vec![
                api::Asset {
                    name: "void.apk".into(),
                    browser_download_url: "https://example.com/void.apk".into(),
                },
                api::Asset {
                    name: "checksums.txt".into(),
                    browser_download_url: "https://example.com/checksums.txt".into(),
                },
            ],
        };

        let release: Release = api_release.into();
        assert_eq!(release.tag, "v1.0.0");
        assert_eq!(release.name, Some("Release 1.0".into()));
        assert_eq!(release.assets[0].name, "void.apk");
        assert_eq!(release.assets[0].download_url, "https://example.com/void.apk");
        assert_eq!(release.assets[1].name, "checksums.txt");
    }

    #[tokio::test]
    async fn test_get_latest_release() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "v2.1.0",
                    "name": "Void 2.1",
                    "published_at": "2024-05-01T12:00:00Z",
                    "prerelease": false,
                    "assets": [
                        {
                            "name": "void-v2.1.0.apk",
                            "size": 4096,
                            "browser_download_url": "https://example.com/void-v2.1.0.apk"
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let provider = GitHubProvider::with_api_url(Client::new(), &url);
        let release = provider.get_latest_release(&repo()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag, "v2.1.0");
        assert_eq!(release.published_at, Some("2024-05-01T12:00:00Z".into()));
        assert_eq!(release.assets.len(), 1);
        assert_eq!(
            release.assets[0].download_url,
            "https://example.com/void-v2.1.0.apk"
        );
    }

    #[tokio::test]
    async fn test_get_latest_release_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(404)
            .create_async()
            .await;

        let provider = GitHubProvider::with_api_url(Client::new(), &url);
        let err = provider.get_latest_release(&repo()).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err.downcast_ref::<HttpError>(),
            Some(&HttpError::NotFound(404))
        );
        assert!(err.to_string().contains("test-owner/test-repo"));
    }

    #[tokio::test]
    async fn test_get_latest_release_missing_assets_field() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/repos/test-owner/test-repo/releases/latest")
            .with_status(200)
            .with_body(r#"{"tag_name": "v1.0.0"}"#)
            .create_async()
            .await;

        let provider = GitHubProvider::with_api_url(Client::new(), &url);
        let result = provider.get_latest_release(&repo()).await;

        assert!(result.is_err());
    }
}
