use serde::{Deserialize, Serialize};

use crate::models::shape_properties::Shadow;

/// A PageElement kind representing a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// File path or data URL of the picture.
    pub source_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}
