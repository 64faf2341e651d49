use serde::Serialize;
use std::fmt;

use crate::provider::Release;

/// Release title and publication date, when the API reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ReleaseDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl From<&Release> for ReleaseDetails {
    fn from(release: &Release) -> Self {
        Self {
            name: release.name.clone(),
            published_at: release.published_at.clone(),
        }
    }
}

/// What the version label and download control currently show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    /// Request in flight
    #[default]
    Loading,
    /// Release found with a downloadable package
    Ready {
        tag: String,
        download_url: String,
        #[serde(flatten)]
        details: ReleaseDetails,
    },
    /// Release found, but none of its assets is a package
    ReadyNoAsset {
        tag: String,
        #[serde(flatten)]
        details: ReleaseDetails,
    },
    /// Release data could not be obtained
    Unavailable,
    /// The page could not be updated at all
    Error { message: String },
}

impl UiState {
    pub fn tag(&self) -> Option<&str> {
        match self {
            UiState::Ready { tag, .. } | UiState::ReadyNoAsset { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&ReleaseDetails> {
        match self {
            UiState::Ready { details, .. } | UiState::ReadyNoAsset { details, .. } => {
                Some(details)
            }
            _ => None,
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        match self {
            UiState::Ready { download_url, .. } => Some(download_url),
            _ => None,
        }
    }

    pub fn is_downloadable(&self) -> bool {
        matches!(self, UiState::Ready { .. })
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiState::Loading => write!(f, "loading"),
            UiState::Ready {
                tag, download_url, ..
            } => write!(f, "ready {} ({})", tag, download_url),
            UiState::ReadyNoAsset { tag, .. } => write!(f, "ready {} (no package)", tag),
            UiState::Unavailable => write!(f, "unavailable"),
            UiState::Error { message } => write!(f, "error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ready = UiState::Ready {
            tag: "v1".into(),
            download_url: "https://example.com/v1.apk".into(),
            details: ReleaseDetails::default(),
        };
        assert_eq!(ready.tag(), Some("v1"));
        assert_eq!(ready.download_url(), Some("https://example.com/v1.apk"));
        assert!(ready.is_downloadable());

        let no_asset = UiState::ReadyNoAsset {
            tag: "v1".into(),
            details: ReleaseDetails::default(),
        };
        assert_eq!(no_asset.tag(), Some("v1"));
        assert_eq!(no_asset.download_url(), None);
        assert!(!no_asset.is_downloadable());

        assert_eq!(UiState::default(), UiState::Loading);
        assert_eq!(UiState::Unavailable.tag(), None);
        assert_eq!(UiState::Unavailable.details(), None);
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(UiState::ReadyNoAsset {
            tag: "v2".into(),
            details: ReleaseDetails::default(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "ready_no_asset", "tag": "v2"}));

        let json = serde_json::to_value(UiState::Ready {
            tag: "v3".into(),
            download_url: "https://example.com/v3.apk".into(),
            details: ReleaseDetails {
                name: Some("Void 3".into()),
                published_at: Some("2024-05-01T10:00:00Z".into()),
            },
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "state": "ready",
                "tag": "v3",
                "download_url": "https://example.com/v3.apk",
                "name": "Void 3",
                "published_at": "2024-05-01T10:00:00Z"
            })
        );

        let json = serde_json::to_value(UiState::Unavailable).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unavailable"}));
    }
}
