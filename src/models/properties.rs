// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Dimension;

/// Represents the styling that can be applied to a TextRun.
/// Unset properties inherit from the text box defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The font family of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// The size of the text's font, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    /// The foreground color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<RgbColor>,

    /// Text transparency from 0 (opaque) to 100 (invisible).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

/// The text alignment for a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Aligned to the start of the line (left for LTR).
    Start,
    /// Centered.
    Center,
    /// Aligned to the end of the line (right for LTR).
    End,
    /// Text is stretched to fill the line (justified).
    Justified,
}

/// Styles that apply to a whole paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Exact line height, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<Dimension>,

    /// Extra space above the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,

    /// Extra space below the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,

    /// Left margin of the paragraph (bullet position for list items).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,
}
