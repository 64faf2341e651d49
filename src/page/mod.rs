//! In-memory model of the download page.
//!
//! The release flow and the presentation effects never talk to a browser
//! directly; they read and mutate this model through the same ids and
//! selectors the markup uses. [`Page`] is the shared handle handed to
//! asynchronous work such as the deferred success-animation cleanup.

mod element;
mod selector;

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

pub use element::{Element, ElementId, Listener, Rect};
pub use selector::SelectorList;

/// Version label.
pub const VERSION_ID: &str = "version";
/// Download link.
pub const DOWNLOAD_BUTTON_ID: &str = "downloadBtn";
/// Container around the download link, target of the success animation.
pub const DOWNLOAD_WRAP_ID: &str = "downloadWrap";

pub const HEADER_SELECTOR: &str = ".site-header";
pub const INTERACTIVE_SELECTOR: &str = ".btn, .brand";
pub const HOVERED_DOWNLOAD_SELECTOR: &str = ".download-btn:hover";
pub const REVEAL_SELECTOR: &str = ".card-right > *";

#[derive(Debug, Clone, PartialEq)]
pub enum PageError {
    /// No element carries the requested id or matches the selector.
    MissingElement(String),
    InvalidSelector(String),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::MissingElement(what) => write!(f, "Element not found: {}", what),
            PageError::InvalidSelector(sel) => write!(f, "Unsupported selector: {}", sel),
        }
    }
}

impl std::error::Error for PageError {}

/// Flat arena of elements; parents are referenced by [`ElementId`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the download page with every element the script expects.
    pub fn landing() -> Self {
        let mut doc = Self::new();

        let header = doc.append(
            Element::new("header")
                .with_classes(&["site-header"])
                .with_rect(Rect::new(0.0, 80.0)),
            None,
        );
        doc.append(
            Element::new("a")
                .with_classes(&["brand"])
                .with_text("Void")
                .with_rect(Rect::new(20.0, 40.0)),
            Some(header),
        );
        doc.append(
            Element::new("p")
                .with_classes(&["tagline"])
                .with_text("A private, minimal player for Android")
                .with_rect(Rect::new(120.0, 30.0)),
            None,
        );

        let card = doc.append(
            Element::new("section")
                .with_classes(&["card-right"])
                .with_rect(Rect::new(200.0, 1000.0)),
            None,
        );
        doc.append(
            Element::new("h2")
                .with_text("Download")
                .with_rect(Rect::new(220.0, 40.0)),
            Some(card),
        );
        doc.append(
            Element::new("span")
                .with_id(VERSION_ID)
                .with_text("Loading version...")
                .with_rect(Rect::new(280.0, 24.0)),
            Some(card),
        );
        let wrap = doc.append(
            Element::new("div")
                .with_id(DOWNLOAD_WRAP_ID)
                .with_rect(Rect::new(330.0, 60.0)),
            Some(card),
        );
        doc.append(
            Element::new("a")
                .with_id(DOWNLOAD_BUTTON_ID)
                .with_classes(&["btn", "download-btn"])
                .with_text("Download APK")
                .with_attribute("aria-disabled", "true")
                .with_attribute("disabled", "")
                .with_rect(Rect::new(335.0, 50.0)),
            Some(wrap),
        );
        doc.append(
            Element::new("ul")
                .with_classes(&["features"])
                .with_rect(Rect::new(900.0, 200.0)),
            Some(card),
        );
        doc.append(
            Element::new("a")
                .with_classes(&["btn", "secondary"])
                .with_text("Source code")
                .with_rect(Rect::new(1150.0, 40.0)),
            Some(card),
        );

        doc
    }

    pub fn append(&mut self, mut element: Element, parent: Option<ElementId>) -> ElementId {
        element.parent = parent;
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Element by arena index. Ids are only handed out by this document.
    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Checked lookup for ids that may come from outside this document.
    pub fn try_get(&self, id: ElementId) -> Result<&Element, PageError> {
        self.elements
            .get(id.0)
            .ok_or_else(|| PageError::MissingElement(format!("{:?}", id)))
    }

    pub fn try_get_mut(&mut self, id: ElementId) -> Result<&mut Element, PageError> {
        self.elements
            .get_mut(id.0)
            .ok_or_else(|| PageError::MissingElement(format!("{:?}", id)))
    }

    pub fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id() == Some(id))
            .map(ElementId)
    }

    pub fn element(&self, id: &str) -> Result<&Element, PageError> {
        self.find_by_id(id)
            .map(|i| self.get(i))
            .ok_or_else(|| PageError::MissingElement(format!("#{}", id)))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element, PageError> {
        let index = self
            .find_by_id(id)
            .ok_or_else(|| PageError::MissingElement(format!("#{}", id)))?;
        Ok(self.get_mut(index))
    }

    /// All elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<ElementId>, PageError> {
        let list: SelectorList = selector.parse()?;
        Ok((0..self.elements.len())
            .map(ElementId)
            .filter(|&id| list.matches(self, id))
            .collect())
    }

    /// First element matching `selector`.
    pub fn query(&self, selector: &str) -> Result<ElementId, PageError> {
        self.query_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::MissingElement(selector.to_string()))
    }

    pub fn matches(&self, id: ElementId, selector: &str) -> Result<bool, PageError> {
        self.try_get(id)?;
        let list: SelectorList = selector.parse()?;
        Ok(list.matches(self, id))
    }
}

/// Shared handle to a [`Document`].
///
/// The lock is only taken inside the closures passed to [`Page::read`] and
/// [`Page::update`], so it is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct Page {
    inner: Arc<Mutex<Document>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    pub fn landing() -> Self {
        Self::new(Document::landing())
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let doc = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&doc)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut doc = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_has_required_elements() {
        let doc = Document::landing();
        assert!(doc.element(VERSION_ID).is_ok());
        assert!(doc.element(DOWNLOAD_BUTTON_ID).is_ok());
        assert!(doc.element(DOWNLOAD_WRAP_ID).is_ok());
        assert!(doc.query(HEADER_SELECTOR).is_ok());
        assert!(doc.query(".tagline").is_ok());
    }

    #[test]
    fn test_landing_download_starts_disabled() {
        let doc = Document::landing();
        let btn = doc.element(DOWNLOAD_BUTTON_ID).unwrap();
        assert!(btn.is_disabled());
        assert_eq!(btn.href(), None);
    }

    #[test]
    fn test_missing_element() {
        let doc = Document::new();
        assert_eq!(
            doc.element(VERSION_ID).unwrap_err(),
            PageError::MissingElement("#version".to_string())
        );
        assert_eq!(
            doc.query(HEADER_SELECTOR).unwrap_err(),
            PageError::MissingElement(".site-header".to_string())
        );
    }

    #[test]
    fn test_query_all_selector_list() {
        let doc = Document::landing();
        let interactive = doc.query_all(INTERACTIVE_SELECTOR).unwrap();
        // brand, download button, secondary button
        assert_eq!(interactive.len(), 3);
        assert!(doc.get(interactive[0]).has_class("brand"));
    }

    #[test]
    fn test_query_children_only() {
        let doc = Document::landing();
        let children = doc.query_all(REVEAL_SELECTOR).unwrap();
        let tags: Vec<_> = children.iter().map(|&id| doc.get(id).tag_name()).collect();
        // The download link sits in the wrapper, so it is a grandchild.
        assert_eq!(tags, vec!["h2", "span", "div", "ul", "a"]);
    }

    #[test]
    fn test_hover_selector_tracks_hover_state() {
        let mut doc = Document::landing();
        let btn = doc.find_by_id(DOWNLOAD_BUTTON_ID).unwrap();
        assert!(!doc.matches(btn, HOVERED_DOWNLOAD_SELECTOR).unwrap());

        doc.get_mut(btn).set_hovered(true);
        assert!(doc.matches(btn, HOVERED_DOWNLOAD_SELECTOR).unwrap());
    }

    #[test]
    fn test_checked_lookup_rejects_foreign_id() {
        let mut doc = Document::new();
        let foreign = Document::landing().find_by_id(DOWNLOAD_BUTTON_ID).unwrap();

        assert!(matches!(
            doc.try_get(foreign),
            Err(PageError::MissingElement(_))
        ));
        assert!(doc.try_get_mut(foreign).is_err());
        assert!(doc.matches(foreign, INTERACTIVE_SELECTOR).is_err());

        let own = doc.append(Element::new("div"), None);
        assert_eq!(doc.try_get(own).unwrap().tag_name(), "div");
    }

    #[test]
    fn test_page_handle_shares_document() {
        let page = Page::landing();
        let other = page.clone();

        other.update(|doc| doc.element_mut(VERSION_ID).map(|el| el.set_text("Version v1")))
            .unwrap();

        let text = page.read(|doc| doc.element(VERSION_ID).map(|el| el.text().to_string()));
        assert_eq!(text.unwrap(), "Version v1");
    }
}
