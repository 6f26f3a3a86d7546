use serde::{Deserialize, Serialize};

use crate::units::{in_to_emu, pt_to_emu};

/// Specifies a unit of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    pub magnitude: f64,
    /// The units for magnitude.
    pub unit: Unit,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }

    pub fn emu(magnitude: i64) -> Self {
        Self {
            magnitude: magnitude as f64,
            unit: Unit::Emu,
        }
    }

    /// Builds an EMU dimension from a length in inches.
    pub fn inches(inches: f64) -> Self {
        Self::emu(in_to_emu(inches))
    }

    /// The magnitude expressed in EMU.
    pub fn to_emu(&self) -> i64 {
        match self.unit {
            Unit::Emu => self.magnitude.round() as i64,
            Unit::Pt => pt_to_emu(self.magnitude),
        }
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// Formula:
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
///
/// Elements built from HTML are never sheared; rotation is carried separately
/// on the page element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub shear_x: f64,
    pub shear_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// The units for the translation elements.
    pub unit: Unit,
}

impl AffineTransform {
    /// A pure translation, in EMU.
    pub fn translate(x_emu: i64, y_emu: i64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            translate_x: x_emu as f64,
            translate_y: y_emu as f64,
            unit: Unit::Emu,
        }
    }
}

/// An axis-aligned rectangle in inches, measured from the canvas top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The size of this rectangle in EMU.
    pub fn size(&self) -> Size {
        Size {
            width: Dimension::inches(self.w),
            height: Dimension::inches(self.h),
        }
    }

    /// The translation placing this rectangle on the slide, in EMU.
    pub fn transform(&self) -> AffineTransform {
        AffineTransform::translate(in_to_emu(self.x), in_to_emu(self.y))
    }
}
