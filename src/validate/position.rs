//! Text boxes must leave a clear band above the bottom edge of the slide.

use crate::extract::slide_data::Element;
use crate::units::round_to;

/// Required clearance between a text box and the slide bottom, in inches.
pub const MIN_BOTTOM_MARGIN_IN: f64 = 0.5;
/// Text at or below this size (points) is exempt (footers, captions).
pub const EXEMPT_FONT_SIZE_PT: f64 = 10.5;

pub fn bottom_margin_errors(elements: &[Element], slide_height_in: f64) -> Vec<String> {
    elements
        .iter()
        .filter_map(Element::text_box)
        .filter(|(_, font_size, _)| *font_size > EXEMPT_FONT_SIZE_PT)
        .filter_map(|(text, _, position)| {
            let distance = slide_height_in - position.bottom();
            if distance >= MIN_BOTTOM_MARGIN_IN {
                return None;
            }
            let excerpt: String = text.chars().take(50).collect();
            let ellipsis = if text.chars().count() > 50 { "..." } else { "" };
            Some(format!(
                "Text box \"{excerpt}{ellipsis}\" ends too close to bottom edge ({:.2}\" from bottom, minimum 0.5\" required)",
                round_to(distance, 2)
            ))
        })
        .collect()
}
