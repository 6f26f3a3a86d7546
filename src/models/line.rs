use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Dimension;

/// The properties of a Line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProperties {
    pub color: RgbColor,
    /// The thickness of the line.
    pub weight: Dimension,
    /// Whether the line runs right-to-left within its bounding box.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flip_horizontal: bool,
    /// Whether the line runs bottom-to-top within its bounding box.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flip_vertical: bool,
}

/// A PageElement kind representing a straight connector. The line spans
/// the element's bounding box corner to corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub line_properties: LineProperties,
}
