use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{
    asset::{DEFAULT_PACKAGE_EXTENSION, ExtensionPicker},
    http::HttpClient,
    provider::{DEFAULT_API_URL, GitHubProvider, RepoId},
};

/// Repository whose releases the page offers.
pub const DEFAULT_REPO: &str = "Void-Team/void";

/// Pause before the request so the loading indicator is perceptible.
pub const DEFAULT_LOADING_DELAY_MS: u64 = 1000;

/// Length of the pulse played on the download area after a successful load.
pub const DEFAULT_SUCCESS_ANIMATION_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub api_url: String,
    pub repo: RepoId,
    pub asset_extension: String,
    pub loading_delay_ms: u64,
    pub success_animation_ms: u64,
    /// Client user agent used for device labeling; `None` leaves the button as is.
    pub user_agent: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repo: RepoId {
                owner: "Void-Team".to_string(),
                repo: "void".to_string(),
            },
            asset_extension: DEFAULT_PACKAGE_EXTENSION.to_string(),
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            success_animation_ms: DEFAULT_SUCCESS_ANIMATION_MS,
            user_agent: None,
        }
    }
}

impl SiteConfig {
    /// Loads a JSON config file; missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn success_animation(&self) -> Duration {
        Duration::from_millis(self.success_animation_ms)
    }

    pub fn picker(&self) -> ExtensionPicker {
        ExtensionPicker::new(self.asset_extension.clone())
    }

    pub fn provider(&self) -> Result<GitHubProvider> {
        let http_client = HttpClient::with_default_client()?;
        Ok(GitHubProvider::from_http_client(http_client, &self.api_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.repo.to_string(), DEFAULT_REPO);
        assert_eq!(config.asset_extension, ".apk");
        assert_eq!(config.loading_delay(), Duration::from_secs(1));
        assert_eq!(config.success_animation(), Duration::from_millis(600));
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"repo": "someone/app", "loading_delay_ms": 0, "user_agent": "Mozilla/5.0 (Linux; Android 14)"}}"#
        )
        .unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.repo.to_string(), "someone/app");
        assert_eq!(config.loading_delay(), Duration::ZERO);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.user_agent.unwrap().contains("Android"));
    }

    #[test]
    fn test_load_invalid_repo() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"repo": "not-a-repo"}}"#).unwrap();

        assert!(SiteConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/void.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_provider_uses_api_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/Void-Team/void/releases/latest")
            .with_status(200)
            .with_body(r#"{"tag_name": "v2.0.0", "assets": []}"#)
            .expect(1)
            .create_async()
            .await;

        let config = SiteConfig {
            api_url: server.url(),
            ..Default::default()
        };
        let release = config
            .provider()
            .unwrap()
            .get_latest_release(&config.repo)
            .await
            .unwrap();

        assert_eq!(release.tag, "v2.0.0");
        mock.assert_async().await;
    }
}
