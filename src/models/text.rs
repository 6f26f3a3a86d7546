// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::common::Dimension;
use crate::models::properties::{ParagraphStyle, TextStyle};

/// Describes the bullet of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// The nesting level of this paragraph in the list: 0 for a top-level
    /// bullet, 1 for a sub-bullet, 2 for a sub-sub-bullet.
    pub nesting_level: u8,

    /// Distance between the bullet glyph and the text.
    pub indent: Dimension,
}

/// Represents a segment of text with consistent styling within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub content: String,
    pub style: TextStyle,
}

/// Marks the beginning of a new paragraph in the text element stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMarker {
    pub style: ParagraphStyle,

    /// The bullet for this paragraph. If unset, the paragraph has no bullet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

/// A single logical element in the text stream of a shape or table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextElement {
    /// A marker indicating the beginning of a paragraph and its properties.
    ParagraphMarker(ParagraphMarker),
    /// A run of text with consistent styling.
    TextRun(TextRun),
}

/// Represents the textual content of a Shape or TableCell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text_elements: Vec<TextElement>,
}

impl TextContent {
    /// Starts a new paragraph.
    pub fn push_paragraph(&mut self, marker: ParagraphMarker) {
        self.text_elements.push(TextElement::ParagraphMarker(marker));
    }

    /// Appends a run to the current paragraph, opening a default one first if needed.
    pub fn push_run(&mut self, content: impl Into<String>, style: TextStyle) {
        if self.text_elements.is_empty() {
            self.push_paragraph(ParagraphMarker::default());
        }
        self.text_elements.push(TextElement::TextRun(TextRun {
            content: content.into(),
            style,
        }));
    }

    /// The concatenated text of all runs, paragraphs separated by newlines.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for (index, element) in self.text_elements.iter().enumerate() {
            match element {
                TextElement::ParagraphMarker(_) if index > 0 => text.push('\n'),
                TextElement::ParagraphMarker(_) => {}
                TextElement::TextRun(run) => text.push_str(&run.content),
            }
        }
        text
    }

    /// Iterates over paragraph markers.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphMarker> {
        self.text_elements.iter().filter_map(|element| match element {
            TextElement::ParagraphMarker(marker) => Some(marker),
            TextElement::TextRun(_) => None,
        })
    }
}
