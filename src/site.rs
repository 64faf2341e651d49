//! Page lifecycle: the page-ready hook and event dispatch.

use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;

use crate::{
    effects::{IntersectionEntry, PresentationEffects, Viewport, apply_device_labeling},
    page::{ElementId, Listener, Page},
    release::{ReleaseFetcher, UiState},
};

/// Browser events forwarded to the page script.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Scroll { y: f64 },
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    /// The visible window changed; visibility is computed from layout.
    Viewport(Viewport),
    /// Visibility reported by the environment.
    Intersection(Vec<IntersectionEntry>),
    Click(ElementId),
}

/// One page view of the download site.
pub struct Site {
    page: Page,
    fetcher: Arc<ReleaseFetcher>,
    effects: PresentationEffects,
    user_agent: Option<String>,
    state: UiState,
}

impl Site {
    pub fn new(page: Page, fetcher: Arc<ReleaseFetcher>) -> Self {
        Self {
            page,
            fetcher,
            effects: PresentationEffects::new(),
            user_agent: None,
            state: UiState::Loading,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn effects(&self) -> &PresentationEffects {
        &self.effects
    }

    /// Runs everything hooked to DOM-ready: effects, device labeling and the
    /// release load. Effect failures are logged, never returned.
    #[tracing::instrument(skip(self))]
    pub async fn ready(&mut self) -> UiState {
        let effects = &mut self.effects;
        let user_agent = self.user_agent.as_deref();

        self.page.update(|doc| {
            match effects.install(doc) {
                Ok(count) => debug!("Prepared {} fade-in blocks", count),
                Err(e) => warn!("Could not prepare fade-in: {}", e),
            }
            if let Some(ua) = user_agent {
                match apply_device_labeling(doc, ua) {
                    Ok(kind) => debug!("Detected device: {}", kind),
                    Err(e) => warn!("Could not label download button: {}", e),
                }
            }
        });

        self.state = self.fetcher.init(&self.page).await;
        self.state.clone()
    }

    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Scroll { y } => {
                self.page.update(|doc| self.effects.on_scroll(doc, y))?;
            }
            Event::PointerEnter(target) => {
                self.page.update(|doc| {
                    doc.try_get_mut(target)?.set_hovered(true);
                    self.effects.on_pointer_enter(doc, target)
                })?;
            }
            Event::PointerLeave(target) => {
                self.page.update(|doc| {
                    doc.try_get_mut(target)?.set_hovered(false);
                    self.effects.on_pointer_leave(doc, target)
                })?;
            }
            Event::Viewport(viewport) => {
                let effects = &mut self.effects;
                let revealed = self.page.update(|doc| effects.on_viewport(doc, viewport));
                debug!("Revealed {} blocks", revealed.len());
            }
            Event::Intersection(entries) => {
                let effects = &mut self.effects;
                self.page.update(|doc| effects.on_intersection(doc, &entries));
            }
            Event::Click(target) => {
                let listeners = self
                    .page
                    .read(|doc| doc.try_get(target).map(|el| el.listeners().to_vec()))?;
                for listener in listeners {
                    match listener {
                        Listener::TrackDownload { tag } => self.fetcher.track_download(&tag),
                    }
                }
            }
        }
        Ok(())
    }
}
