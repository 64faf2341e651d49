//! Optional download tracking.
//!
//! The page reports downloads to an analytics backend only when one was
//! injected; a site without analytics passes `None` and tracking is skipped.

use serde::Serialize;

/// Event name sent for a started download.
pub const DOWNLOAD_EVENT: &str = "download";
/// Category attached to download events.
pub const PACKAGE_CATEGORY: &str = "APK";

/// Attributes of a tracked event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAttributes {
    pub event_category: String,
    pub event_label: String,
    pub value: u32,
}

impl EventAttributes {
    /// Attributes of a download of release `tag`.
    pub fn download(tag: &str) -> Self {
        Self {
            event_category: PACKAGE_CATEGORY.to_string(),
            event_label: tag.to_string(),
            value: 1,
        }
    }
}

/// Analytics backend receiving page events.
#[cfg_attr(test, mockall::automock)]
pub trait Analytics: Send + Sync {
    fn track(&self, event: &str, attributes: &EventAttributes);
}

/// Backend that writes events to the log, used by the CLI.
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track(&self, event: &str, attributes: &EventAttributes) {
        log::info!(
            "analytics event={} category={} label={} value={}",
            event,
            attributes.event_category,
            attributes.event_label,
            attributes.value
        );
    }
}
