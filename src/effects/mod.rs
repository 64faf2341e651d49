//! Cosmetic page behavior with no dependency on the release flow.
//!
//! - `parallax` - header offset following the scroll position
//! - `hover` - lift of buttons and the brand mark under the pointer
//! - `reveal` - one-shot fade-in of content blocks entering the viewport
//! - `device` - download button labeling from the user agent

mod device;
mod hover;
mod parallax;
mod reveal;

pub use device::{
    ANDROID_LABEL, ANDROID_ONLY_LABEL, DeviceKind, Labeling, apply_device_labeling,
};
pub use hover::{HOVER_LIFT, on_pointer_enter, on_pointer_leave};
pub use parallax::{PARALLAX_FACTOR, on_scroll};
pub use reveal::{
    IntersectionEntry, REVEAL_BOTTOM_MARGIN, REVEAL_THRESHOLD, RevealObserver, Viewport,
};

use crate::page::{Document, ElementId, PageError};

/// Effect state kept for the lifetime of a page view.
#[derive(Debug, Clone, Default)]
pub struct PresentationEffects {
    reveal: RevealObserver,
}

impl PresentationEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares the fade-in blocks. Returns how many are waiting to be revealed.
    pub fn install(&mut self, doc: &mut Document) -> Result<usize, PageError> {
        self.reveal.prepare(doc)
    }

    pub fn on_scroll(&self, doc: &mut Document, scroll_y: f64) -> Result<(), PageError> {
        on_scroll(doc, scroll_y)
    }

    pub fn on_pointer_enter(&self, doc: &mut Document, target: ElementId) -> Result<(), PageError> {
        on_pointer_enter(doc, target)
    }

    pub fn on_pointer_leave(&self, doc: &mut Document, target: ElementId) -> Result<(), PageError> {
        on_pointer_leave(doc, target)
    }

    pub fn on_viewport(&mut self, doc: &mut Document, viewport: Viewport) -> Vec<ElementId> {
        self.reveal.on_viewport(doc, viewport)
    }

    pub fn on_intersection(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
    ) -> Vec<ElementId> {
        self.reveal.on_intersection(doc, entries)
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }
}
