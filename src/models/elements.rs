// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Rect, Size};
use crate::models::image::Image;
use crate::models::line::Line;
use crate::models::shape::Shape;
use crate::models::table::Table;

/// The specific kind of PageElement represented as an enum with associated data.
/// The JSON representation uses the field name as the key (e.g., "shape": {...}, "image": {...}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageElementKind {
    /// A text box or an autoshape.
    Shape(Shape),
    /// A picture.
    Image(Image),
    /// A straight connector.
    Line(Line),
    /// A native table.
    Table(Table),
}

/// A visual element placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// The object ID for this page element, unique within its slide.
    pub object_id: String,

    /// The size of the page element.
    pub size: Size,

    /// The placement of the page element's top-left corner.
    pub transform: AffineTransform,

    /// Clockwise rotation around the element's center, in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    /// The specific kind of element and its properties.
    #[serde(flatten)]
    pub element_kind: PageElementKind,
}

impl PageElement {
    /// Places `kind` at `frame` (inches), converting to EMU.
    pub fn new(object_id: impl Into<String>, frame: Rect, element_kind: PageElementKind) -> Self {
        Self {
            object_id: object_id.into(),
            size: frame.size(),
            transform: frame.transform(),
            rotation: None,
            element_kind,
        }
    }

    pub fn with_rotation(mut self, rotation: Option<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.element_kind {
            PageElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match &self.element_kind {
            PageElementKind::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.element_kind {
            PageElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match &self.element_kind {
            PageElementKind::Line(line) => Some(line),
            _ => None,
        }
    }
}
