use crate::page::{Document, ElementId, HOVERED_DOWNLOAD_SELECTOR, INTERACTIVE_SELECTOR, PageError};

pub const HOVER_LIFT: &str = "translateY(-2px)";

/// Lifts an interactive element under the pointer.
pub fn on_pointer_enter(doc: &mut Document, target: ElementId) -> Result<(), PageError> {
    if doc.matches(target, INTERACTIVE_SELECTOR)? {
        doc.try_get_mut(target)?.set_style("transform", HOVER_LIFT);
    }
    Ok(())
}

/// Drops the lift again, except on a download button that still reports hover.
pub fn on_pointer_leave(doc: &mut Document, target: ElementId) -> Result<(), PageError> {
    if !doc.matches(target, INTERACTIVE_SELECTOR)? {
        return Ok(());
    }
    if !doc.matches(target, HOVERED_DOWNLOAD_SELECTOR)? {
        doc.try_get_mut(target)?.set_style("transform", "");
    }
    Ok(())
}
