use crate::page::{Document, HEADER_SELECTOR, PageError};

/// Fraction of the scroll offset applied to the header.
pub const PARALLAX_FACTOR: f64 = 0.1;

/// Shifts the header proportionally to the scroll position.
pub fn on_scroll(doc: &mut Document, scroll_y: f64) -> Result<(), PageError> {
    let header = doc.query(HEADER_SELECTOR)?;
    doc.get_mut(header).set_style(
        "transform",
        format!("translateY({}px)", scroll_y * PARALLAX_FACTOR),
    );
    Ok(())
}
