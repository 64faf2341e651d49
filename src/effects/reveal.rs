//! One-shot fade-in of content blocks as they scroll into view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::page::{Document, ElementId, PageError, REVEAL_SELECTOR};

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Bottom root margin in px; negative values shrink the viewport.
pub const REVEAL_BOTTOM_MARGIN: f64 = -50.0;

const HIDDEN_OFFSET: &str = "translateY(20px)";
const SHOWN_OFFSET: &str = "translateY(0)";
const FADE_SECS: f64 = 0.6;
/// Delay added per sibling so blocks appear one after another.
const STAGGER_MS: u32 = 100;

/// Visible window of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// Visibility report for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Tracks which content blocks are still waiting to be revealed.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    observed: BTreeSet<ElementId>,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD, REVEAL_BOTTOM_MARGIN)
    }
}

impl RevealObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            observed: BTreeSet::new(),
        }
    }

    /// Hides every child of the content region and starts observing it.
    ///
    /// Returns the number of elements prepared.
    pub fn prepare(&mut self, doc: &mut Document) -> Result<usize, PageError> {
        let targets = doc.query_all(REVEAL_SELECTOR)?;
        for (index, &id) in targets.iter().enumerate() {
            let delay = f64::from(index as u32 * STAGGER_MS) / 1000.0;
            let el = doc.get_mut(id);
            el.set_style("opacity", "0");
            el.set_style("transform", HIDDEN_OFFSET);
            el.set_style(
                "transition",
                format!(
                    "opacity {FADE_SECS}s ease {delay}s, transform {FADE_SECS}s ease {delay}s"
                ),
            );
            self.observed.insert(id);
        }
        Ok(targets.len())
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    /// Computes visibility of every observed element for a viewport.
    pub fn entries(&self, doc: &Document, viewport: Viewport) -> Vec<IntersectionEntry> {
        let root_top = viewport.scroll_y;
        let root_bottom = viewport.scroll_y + viewport.height + self.bottom_margin;

        self.observed
            .iter()
            .map(|&target| {
                let rect = doc.get(target).rect();
                let overlap = rect.bottom().min(root_bottom) - rect.top.max(root_top);
                let ratio = if rect.height > 0.0 {
                    (overlap / rect.height).clamp(0.0, 1.0)
                } else if rect.top >= root_top && rect.top <= root_bottom {
                    1.0
                } else {
                    0.0
                };
                IntersectionEntry {
                    target,
                    ratio,
                    is_intersecting: ratio > 0.0 && ratio >= self.threshold,
                }
            })
            .collect()
    }

    /// Reveals intersecting elements and stops observing them.
    ///
    /// Returns the elements revealed by this call; elements already shown
    /// are ignored.
    pub fn on_intersection(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
    ) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.observed.remove(&entry.target) {
                continue;
            }
            let el = doc.get_mut(entry.target);
            el.set_style("opacity", "1");
            el.set_style("transform", SHOWN_OFFSET);
            revealed.push(entry.target);
        }
        revealed
    }

    /// Convenience for a scroll or resize: compute entries and reveal.
    pub fn on_viewport(&mut self, doc: &mut Document, viewport: Viewport) -> Vec<ElementId> {
        let entries = self.entries(doc, viewport);
        self.on_intersection(doc, &entries)
    }
}
