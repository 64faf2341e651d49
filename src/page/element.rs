//! A single node of the page model.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Index of an element inside its [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub(crate) usize);

/// Vertical placement of an element in document coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Behavior attached to an element's click event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Listener {
    /// Report a download of the given release tag.
    TrackDownload { tag: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Element {
    pub(crate) id: Option<String>,
    pub(crate) tag_name: String,
    pub(crate) parent: Option<ElementId>,
    classes: BTreeSet<String>,
    text: String,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    href: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    listeners: Vec<Listener>,
    hovered: bool,
    rect: Rect,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    // Text

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    // Classes

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    // Inline style

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Sets an inline style property; an empty value clears it.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.styles.remove(property);
        } else {
            self.styles.insert(property.to_string(), value);
        }
    }

    // Attributes

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// True when the element advertises itself as non-interactive.
    pub fn is_disabled(&self) -> bool {
        self.attribute("aria-disabled") == Some("true") || self.attribute("disabled").is_some()
    }

    // Link target

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn set_href(&mut self, href: &str) {
        self.href = Some(href.to_string());
    }

    // Events

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn add_listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    // Layout

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_style_clears_property() {
        let mut el = Element::new("div");
        el.set_style("transform", "translateY(-2px)");
        assert_eq!(el.style("transform"), Some("translateY(-2px)"));

        el.set_style("transform", "");
        assert_eq!(el.style("transform"), None);
    }

    #[test]
    fn test_classes() {
        let mut el = Element::new("span").with_classes(&["a", "b"]);
        assert!(el.has_class("a"));
        el.remove_class("a");
        el.remove_class("missing");
        assert!(!el.has_class("a"));
        assert_eq!(el.classes().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_is_disabled() {
        let mut el = Element::new("a").with_attribute("disabled", "");
        assert!(el.is_disabled());

        el.remove_attribute("disabled");
        el.set_attribute("aria-disabled", "false");
        assert!(!el.is_disabled());

        el.set_attribute("aria-disabled", "true");
        assert!(el.is_disabled());
    }

    #[test]
    fn test_append_text() {
        let mut el = Element::new("p").with_text("Version v1");
        el.append_text(" (APK not found)");
        assert_eq!(el.text(), "Version v1 (APK not found)");
    }
}
