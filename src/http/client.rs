//! HTTP client with error classification for the release API.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::classify_status;

/// User agent sent with every request; the GitHub API rejects anonymous agents.
pub const USER_AGENT: &str = "void-download";

/// HTTP client issuing single, non-retried JSON requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the crate's user agent.
    pub fn with_default_client() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// Non-2xx statuses become an [`HttpError`](super::HttpError) inside the
    /// returned `anyhow::Error`; transport and decode failures carry context.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_status(status, &body);
            debug!("GET {} failed: {}", url, err);
            return Err(err.into());
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        serde_json::from_slice::<T>(&bytes).context("Failed to parse JSON response")
    }
}
