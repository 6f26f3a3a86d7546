use serde::{Deserialize, Serialize};

use crate::models::shape_properties::ShapeProperties;
use crate::models::text::TextContent;

/// The type of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// Text box shape.
    TextBox,
    /// Rectangle shape.
    Rectangle,
    /// Round corner rectangle shape.
    RoundRectangle,
}

/// A PageElement kind representing a text box or an autoshape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub shape_type: ShapeType,

    /// The text content of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,

    pub shape_properties: ShapeProperties,
}
