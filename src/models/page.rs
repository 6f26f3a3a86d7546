// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Rect;
use crate::models::elements::{PageElement, PageElementKind};

/// The background fill of a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideBackground {
    /// Solid color fill.
    Color(RgbColor),
    /// Stretched picture fill, by file path or data URL.
    Picture(String),
}

/// A slide in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// The object ID for this slide.
    pub object_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<SlideBackground>,

    /// The page elements rendered on the slide, back to front.
    pub page_elements: Vec<PageElement>,
}

impl Slide {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            background: None,
            page_elements: Vec::new(),
        }
    }

    pub fn set_background(&mut self, background: SlideBackground) {
        self.background = Some(background);
    }

    /// Adds an element at `frame` (inches) and returns it for further adjustment.
    pub fn add_element(&mut self, frame: Rect, kind: PageElementKind) -> &mut PageElement {
        let object_id = format!("{}_e{}", self.object_id, self.page_elements.len());
        self.page_elements.push(PageElement::new(object_id, frame, kind));
        let last = self.page_elements.len() - 1;
        &mut self.page_elements[last]
    }
}
