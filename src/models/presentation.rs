use serde::{Deserialize, Serialize};

use crate::errors::{ConversionError, Result};
use crate::models::page::Slide;
use crate::units::emu_to_in;

/// The physical size of every slide, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresLayout {
    pub width: i64,
    pub height: i64,
}

impl PresLayout {
    /// 10" × 5.625" (16:9).
    pub const LAYOUT_16X9: PresLayout = PresLayout {
        width: 9_144_000,
        height: 5_143_500,
    };
    /// 10" × 6.25" (16:10).
    pub const LAYOUT_16X10: PresLayout = PresLayout {
        width: 9_144_000,
        height: 5_715_000,
    };
    /// 10" × 7.5" (4:3).
    pub const LAYOUT_4X3: PresLayout = PresLayout {
        width: 9_144_000,
        height: 6_858_000,
    };
    /// 13.333" × 7.5".
    pub const LAYOUT_WIDE: PresLayout = PresLayout {
        width: 12_192_000,
        height: 6_858_000,
    };

    pub fn width_in(&self) -> f64 {
        emu_to_in(self.width)
    }

    pub fn height_in(&self) -> f64 {
        emu_to_in(self.height)
    }
}

impl Default for PresLayout {
    fn default() -> Self {
        Self::LAYOUT_16X9
    }
}

/// An in-memory presentation: the slide graph handed to a file writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The size of slides in the presentation.
    pub pres_layout: PresLayout,

    /// The slides in the presentation.
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn new(pres_layout: PresLayout) -> Self {
        Self {
            pres_layout,
            slides: Vec::new(),
        }
    }

    /// Creates an empty slide object not yet part of the presentation.
    pub fn new_slide(&self) -> Slide {
        Slide::new(format!("slide{}", self.slides.len() + 1))
    }

    /// Appends a new empty slide and returns its index.
    pub fn add_slide(&mut self) -> usize {
        let slide = self.new_slide();
        self.slides.push(slide);
        self.slides.len() - 1
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Stores `slide` at `index`, or appends it when `index` is `None`.
    /// Returns the index the slide now occupies.
    pub fn commit_slide(&mut self, index: Option<usize>, slide: Slide) -> Result<usize> {
        match index {
            Some(index) => {
                let count = self.slides.len();
                let target = self.slides.get_mut(index).ok_or_else(|| {
                    ConversionError::InvalidSlide(format!("slide index {index} out of range ({count} slides)"))
                })?;
                *target = slide;
                Ok(index)
            }
            None => {
                self.slides.push(slide);
                Ok(self.slides.len() - 1)
            }
        }
    }
}
