//! The extraction result: a flat list of typed elements measured from the
//! rendered page, plus background and placeholder data. Positions are in
//! inches; font sizes, spacing and line widths in points.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Rect;
use crate::models::placeholder::Placeholder;

/// Horizontal text alignment as computed by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Paragraph and heading tags that become text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl TextTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "p" => TextTag::P,
            "h1" => TextTag::H1,
            "h2" => TextTag::H2,
            "h3" => TextTag::H3,
            "h4" => TextTag::H4,
            "h5" => TextTag::H5,
            "h6" => TextTag::H6,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletOptions {
    /// Gap between glyph and text, in points.
    pub indent: f64,
    /// 0 = bullet, 1 = sub-bullet, 2 = sub-sub-bullet.
    pub level: u8,
}

/// Formatting of one inline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// The run ends its paragraph.
    #[serde(default)]
    pub break_line: bool,
    /// Set on the first run of a list item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<BulletOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub options: RunOptions,
}

impl TextRun {
    pub fn new(text: impl Into<String>, options: RunOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

fn runs_text(runs: &[TextRun]) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&run.text);
        if run.options.break_line {
            out.push(' ');
        }
    }
    out.trim_end().to_string()
}

/// Either a single string with element-level formatting or inline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextBody {
    Plain(String),
    Runs(Vec<TextRun>),
}

impl TextBody {
    /// All text with runs concatenated, used in error messages.
    pub fn plain_text(&self) -> String {
        match self {
            TextBody::Plain(text) => text.clone(),
            TextBody::Runs(runs) => runs_text(runs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub font_face: String,
    pub color: Option<RgbColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    pub align: Option<TextAlign>,
    /// Exact line height, when the page sets one.
    pub line_spacing: Option<f64>,
    pub para_space_before: f64,
    pub para_space_after: f64,
    /// `[left, right, bottom, top]` insets.
    pub margin: Option<[f64; 4]>,
    /// Clockwise rotation in degrees; `None` when upright.
    pub rotate: Option<f64>,
    /// 0 (opaque) to 100 (invisible).
    pub transparency: Option<f64>,
}

/// An outer drop shadow parsed from `box-shadow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub angle: f64,
    pub blur: f64,
    pub color: RgbColor,
    pub offset: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: RgbColor,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub fill: Option<RgbColor>,
    pub line: Option<LineStyle>,
    /// Corner radius in inches; 0 for square corners.
    #[serde(default)]
    pub rect_radius: f64,
    pub background_image: Option<String>,
    pub shadow: Option<ShadowStyle>,
    pub transparency: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterizationType {
    Svg,
    Canvas,
    Gradient,
}

impl RasterizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RasterizationType::Svg => "svg",
            RasterizationType::Canvas => "canvas",
            RasterizationType::Gradient => "gradient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub tag: TextTag,
    pub text: TextBody,
    pub style: TextStyle,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListElement {
    pub items: Vec<TextRun>,
    pub style: TextStyle,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub src: String,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterizedImage {
    /// Value of the element's `data-h2p-node` attribute in the page.
    pub rasterize_id: String,
    pub rasterization_type: RasterizationType,
    /// Path of the captured PNG; set by the rasterizer.
    pub src: Option<String>,
    pub shadow: Option<ShadowStyle>,
    pub position: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub shape: ShapeStyle,
    pub text: Option<TextBody>,
    pub position: Rect,
}

/// A straight line between two points, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: RgbColor,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub fill: Option<RgbColor>,
    pub color: Option<RgbColor>,
    pub bold: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCellData {
    pub text: String,
    pub colspan: u32,
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Column widths in inches.
    pub col_w: Vec<f64>,
    pub font_size: f64,
    pub font_face: String,
    pub border: Option<LineStyle>,
    pub header: Option<CellStyle>,
    pub label: Option<CellStyle>,
    pub data: Option<CellStyle>,
    /// Row index → style replacing the header/label/data defaults for that row.
    pub row_styles: IndexMap<usize, CellStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub rows: Vec<Vec<TableCellData>>,
    pub options: TableOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    pub table_data: TableData,
    pub position: Rect,
}

/// One measured element, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Text(TextElement),
    List(ListElement),
    Image(ImageElement),
    RasterizedImage(RasterizedImage),
    Shape(ShapeElement),
    Line(LineElement),
    PptxTable(TableElement),
}

impl Element {
    /// Text, font size and box of elements that carry readable text.
    pub fn text_box(&self) -> Option<(String, f64, Rect)> {
        match self {
            Element::Text(text) => Some((text.text.plain_text(), text.style.font_size, text.position)),
            Element::List(list) => Some((runs_text(&list.items), list.style.font_size, list.position)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// A picture path, or a raw CSS gradient that must be rasterized first.
    Image { path: String },
    Color { value: RgbColor },
}

impl Background {
    pub fn is_gradient(&self) -> bool {
        matches!(self, Background::Image { path } if crate::raster::gradient::is_gradient(path))
    }
}

/// Root extraction result for one HTML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    pub elements: Vec<Element>,
    pub background: Background,
    pub placeholders: Vec<Placeholder>,
    pub html: String,
    pub errors: Vec<String>,
}

impl SlideData {
    pub fn rasterized_mut(&mut self) -> impl Iterator<Item = &mut RasterizedImage> {
        self.elements.iter_mut().filter_map(|element| match element {
            Element::RasterizedImage(raster) => Some(raster),
            _ => None,
        })
    }

    /// The first rasterized element still lacking an image, if any.
    pub fn unrasterized(&self) -> Option<&RasterizedImage> {
        self.elements.iter().find_map(|element| match element {
            Element::RasterizedImage(raster) if raster.src.is_none() => Some(raster),
            _ => None,
        })
    }
}
