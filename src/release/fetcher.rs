use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::{
    analytics::{Analytics, DOWNLOAD_EVENT, EventAttributes},
    asset::{AssetPicker, ExtensionPicker},
    config::SiteConfig,
    page::{DOWNLOAD_BUTTON_ID, DOWNLOAD_WRAP_ID, Listener, Page, PageError, VERSION_ID},
    provider::{Provider, Release, RepoId},
};

use super::state::{ReleaseDetails, UiState};

pub const LOADING_CLASS: &str = "loading";
pub const SUCCESS_CLASS: &str = "success";

pub const UNAVAILABLE_TEXT: &str = "Version unavailable";
pub const FAILED_TEXT: &str = "Failed to load version";
pub const NO_PACKAGE_SUFFIX: &str = " (APK not found)";

pub const MUTED_COLOR: &str = "var(--text-muted)";
pub const ERROR_COLOR: &str = "#ef4444";
pub const DIMMED_OPACITY: &str = "0.6";

/// A load failure that has already been rendered as the fallback state.
///
/// The cause is only reachable through `source()`, so `{:#}` prints it once.
#[derive(Debug)]
pub struct FallbackApplied(pub anyhow::Error);

impl std::fmt::Display for FallbackApplied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Release unavailable, fallback shown")
    }
}

impl std::error::Error for FallbackApplied {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}

/// Loads the latest release and reflects it into the version label and
/// download control.
pub struct ReleaseFetcher {
    provider: Arc<dyn Provider>,
    picker: Box<dyn AssetPicker>,
    repo: RepoId,
    loading_delay: Duration,
    success_animation: Duration,
    analytics: Option<Arc<dyn Analytics>>,
}

impl ReleaseFetcher {
    /// Creates a fetcher with the default package picker and timings.
    pub fn new(provider: Arc<dyn Provider>, repo: RepoId) -> Self {
        let defaults = SiteConfig::default();
        Self {
            provider,
            picker: Box::new(ExtensionPicker::default()),
            repo,
            loading_delay: defaults.loading_delay(),
            success_animation: defaults.success_animation(),
            analytics: None,
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &SiteConfig) -> Self {
        Self::new(provider, config.repo.clone())
            .with_picker(config.picker())
            .with_loading_delay(config.loading_delay())
            .with_success_animation(config.success_animation())
    }

    pub fn with_picker(mut self, picker: impl AssetPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    pub fn with_success_animation(mut self, duration: Duration) -> Self {
        self.success_animation = duration;
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Page-ready entry point: loads the release and settles every failure
    /// into a terminal state instead of returning it.
    #[tracing::instrument(skip(self, page))]
    pub async fn init(&self, page: &Page) -> UiState {
        match self.load_latest_release(page).await {
            Ok(state) => state,
            Err(err) => self.handle_error(page, err),
        }
    }

    /// Loads the latest release into the page.
    ///
    /// The `loading` class is on the version label for the whole attempt.
    /// Failures are rendered as the fallback state and then returned wrapped
    /// in [`FallbackApplied`]; an error that could not even be rendered is
    /// returned as is.
    #[tracing::instrument(skip(self, page), fields(repo = %self.repo))]
    pub async fn load_latest_release(&self, page: &Page) -> Result<UiState> {
        page.update(|doc| {
            doc.element_mut(VERSION_ID)
                .map(|el| el.add_class(LOADING_CLASS))
        })?;

        let result = self.fetch_and_render(page).await;

        let cleared = page.update(|doc| {
            doc.element_mut(VERSION_ID)
                .map(|el| el.remove_class(LOADING_CLASS))
        });

        let state = result?;
        cleared?;
        Ok(state)
    }

    async fn fetch_and_render(&self, page: &Page) -> Result<UiState> {
        tokio::time::sleep(self.loading_delay).await;

        let rendered = self
            .provider
            .get_latest_release(&self.repo)
            .await
            .and_then(|release| self.render_release(page, &release));

        match rendered {
            Ok(state) => Ok(state),
            Err(e) => {
                debug!("Release load failed, showing fallback: {:#}", e);
                show_fallback(page)?;
                Err(FallbackApplied(e).into())
            }
        }
    }

    fn render_release(&self, page: &Page, release: &Release) -> Result<UiState> {
        let asset = self.picker.pick(&release.assets);

        let state = page.update(|doc| -> Result<UiState, PageError> {
            let version = doc.element_mut(VERSION_ID)?;
            version.set_text(format!("Version {}", release.tag));
            version.add_class(SUCCESS_CLASS);

            match asset {
                Some(asset) => {
                    let button = doc.element_mut(DOWNLOAD_BUTTON_ID)?;
                    button.set_href(&asset.download_url);
                    button.set_attribute("aria-disabled", "false");
                    button.remove_attribute("disabled");
                    button.set_style("cursor", "pointer");
                    button.add_listener(Listener::TrackDownload {
                        tag: release.tag.clone(),
                    });

                    Ok(UiState::Ready {
                        tag: release.tag.clone(),
                        download_url: asset.download_url.clone(),
                        details: ReleaseDetails::from(release),
                    })
                }
                None => {
                    doc.element_mut(VERSION_ID)?.append_text(NO_PACKAGE_SUFFIX);
                    let button = doc.element_mut(DOWNLOAD_BUTTON_ID)?;
                    button.set_attribute("aria-disabled", "true");
                    button.set_style("opacity", DIMMED_OPACITY);

                    Ok(UiState::ReadyNoAsset {
                        tag: release.tag.clone(),
                        details: ReleaseDetails::from(release),
                    })
                }
            }
        })?;

        if state.is_downloadable() {
            self.show_success(page)?;
        }

        info!("Loaded release: {}", state);
        Ok(state)
    }

    /// Plays the pulse on the download area and clears it once it has run.
    fn show_success(&self, page: &Page) -> Result<(), PageError> {
        let animation = format!("pulse {}s ease-out", self.success_animation.as_secs_f64());
        page.update(|doc| {
            doc.element_mut(DOWNLOAD_WRAP_ID)
                .map(|el| el.set_style("animation", animation))
        })?;

        let page = page.clone();
        let duration = self.success_animation;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            page.update(|doc| {
                if let Ok(el) = doc.element_mut(DOWNLOAD_WRAP_ID) {
                    el.set_style("animation", "");
                }
            });
        });

        Ok(())
    }

    fn handle_error(&self, page: &Page, err: anyhow::Error) -> UiState {
        warn!("Failed to load release: {:#}", err);

        if err.downcast_ref::<FallbackApplied>().is_some() {
            // The fallback text stays; only the error color is added.
            let styled = page.update(|doc| {
                doc.element_mut(VERSION_ID)
                    .map(|el| el.set_style("color", ERROR_COLOR))
            });
            if let Err(e) = styled {
                warn!("Could not style version label: {}", e);
            }
            return UiState::Unavailable;
        }

        let rendered = page.update(|doc| {
            doc.element_mut(VERSION_ID).map(|el| {
                el.set_text(FAILED_TEXT);
                el.set_style("color", ERROR_COLOR);
            })
        });
        if let Err(e) = rendered {
            warn!("Could not show load error: {}", e);
        }

        UiState::Error {
            message: format!("{:#}", err),
        }
    }

    /// Records a started download and forwards it to analytics when present.
    pub fn track_download(&self, tag: &str) {
        info!("Download started - version: {}", tag);

        if let Some(analytics) = &self.analytics {
            analytics.track(DOWNLOAD_EVENT, &EventAttributes::download(tag));
        }
    }
}

/// Degraded state shown when no release data could be obtained.
fn show_fallback(page: &Page) -> Result<(), PageError> {
    page.update(|doc| -> Result<(), PageError> {
        let version = doc.element_mut(VERSION_ID)?;
        version.set_text(UNAVAILABLE_TEXT);
        version.set_style("color", MUTED_COLOR);

        let button = doc.element_mut(DOWNLOAD_BUTTON_ID)?;
        button.set_attribute("aria-disabled", "true");
        button.set_style("opacity", DIMMED_OPACITY);
        button.set_style("cursor", "not-allowed");
        Ok(())
    })
}
