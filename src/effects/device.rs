//! Download button labeling based on the client's user agent.

use serde::Serialize;
use std::fmt;

use crate::page::{DOWNLOAD_BUTTON_ID, Document, PageError};

pub const ANDROID_LABEL: &str = "Download for Android 📱";
pub const ANDROID_ONLY_LABEL: &str = "Available for Android only 📱";

/// Mobile platform family inferred from a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Android,
    Ios,
    Other,
}

/// How the download button should present itself on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labeling {
    pub label: &'static str,
    pub enabled: bool,
}

impl DeviceKind {
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("android") {
            DeviceKind::Android
        } else if ua.contains("iphone") || ua.contains("ipad") {
            DeviceKind::Ios
        } else {
            DeviceKind::Other
        }
    }

    /// `None` leaves the button untouched.
    pub fn labeling(self) -> Option<Labeling> {
        match self {
            DeviceKind::Android => Some(Labeling {
                label: ANDROID_LABEL,
                enabled: true,
            }),
            DeviceKind::Ios => Some(Labeling {
                label: ANDROID_ONLY_LABEL,
                enabled: false,
            }),
            DeviceKind::Other => None,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Android => write!(f, "android"),
            DeviceKind::Ios => write!(f, "ios"),
            DeviceKind::Other => write!(f, "other"),
        }
    }
}

/// Relabels the download button for the detected device.
pub fn apply_device_labeling(doc: &mut Document, user_agent: &str) -> Result<DeviceKind, PageError> {
    let kind = DeviceKind::detect(user_agent);
    let Some(labeling) = kind.labeling() else {
        return Ok(kind);
    };

    let button = doc.element_mut(DOWNLOAD_BUTTON_ID)?;
    button.set_text(labeling.label);
    if !labeling.enabled {
        button.set_attribute("aria-disabled", "true");
        button.set_style("opacity", "0.6");
        button.set_style("cursor", "not-allowed");
    }
    Ok(kind)
}
