use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Dimension;

/// Vertical placement of text inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    pub color: RgbColor,
    /// Fill transparency from 0 (opaque) to 100 (invisible).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,
}

/// The picture fill. The shape is filled entirely with the picture,
/// stretched to fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchedPictureFill {
    /// File path (or data URL) of the picture.
    pub content_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeBackgroundFill {
    SolidFill(SolidFill),
    StretchedPictureFill(StretchedPictureFill),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub color: RgbColor,
    pub weight: Dimension,
}

/// An outer drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    /// Direction of the offset in degrees, clockwise from the positive x axis.
    pub angle: f64,
    pub blur_radius: Dimension,
    pub distance: Dimension,
    pub color: RgbColor,
    /// Shadow opacity from 0.0 to 1.0.
    pub alpha: f64,
}

/// Space between a text box edge and its text, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

/// The properties of a Shape element. Only properties that were actually
/// detected on the source element are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_background_fill: Option<ShapeBackgroundFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Corner radius of rounded rectangles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_alignment: Option<ContentAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insets: Option<Insets>,
}
