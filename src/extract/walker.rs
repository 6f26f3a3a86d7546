//! Pre-order classification of the DOM snapshot into slide elements.

use log::debug;

use crate::extract::css;
use crate::extract::inline::{self, collect_runs, has_inline_formatting, text_style};
use crate::extract::list::extract_list;
use crate::extract::slide_data::{
    Background, Element, ImageElement, LineElement, LineStyle, RasterizationType, RasterizedImage,
    ShapeElement, ShapeStyle, SlideData, TextBody, TextElement, TextTag,
};
use crate::extract::snapshot::{ComputedStyle, DomNode, DomSnapshot};
use crate::extract::table::extract_table;
use crate::models::common::Rect;
use crate::models::placeholder::Placeholder;
use crate::raster::gradient::is_gradient;
use crate::units::{parse_px_or_zero, px_to_in, px_to_pt, round_to, PT_PER_PX};

const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li"];
const LAYOUT_TAGS: &[&str] = &["div", "section", "article", "header", "footer", "aside", "main", "nav"];
pub const PLACEHOLDER_CLASS: &str = "placeholder";
pub const PLACEHOLDER_ATTR: &str = "data-placeholder";

/// Walks a snapshot into [`SlideData`]. Never fails: invalid constructs are
/// reported through `SlideData::errors`.
pub fn extract_slide_data(snapshot: DomSnapshot) -> SlideData {
    let mut walker = Walker::default();
    for child in snapshot.body.element_children() {
        walker.visit(child);
    }
    debug!(
        "extracted {} elements, {} placeholders, {} errors",
        walker.elements.len(),
        walker.placeholders.len(),
        walker.errors.len()
    );
    SlideData {
        elements: walker.elements,
        background: body_background(&snapshot.body.style),
        placeholders: walker.placeholders,
        html: snapshot.html,
        errors: walker.errors,
    }
}

fn body_background(style: &ComputedStyle) -> Background {
    if is_gradient(&style.background_image) {
        return Background::Image {
            path: style.background_image.clone(),
        };
    }
    if let Some(path) = css::extract_url(&style.background_image) {
        return Background::Image { path };
    }
    Background::Color {
        value: css::rgb_to_hex(&style.background_color),
    }
}

/// Box of a node in inches. Rotated nodes report their unrotated size
/// centered on the rotated bounding box.
pub fn position(node: &DomNode, rotation: Option<f64>) -> Rect {
    let rect = node.rect;
    let (w, h) = match rotation {
        None => (rect.w, rect.h),
        Some(angle) if angle == 90.0 || angle == 270.0 => (rect.h, rect.w),
        Some(_) => (node.offset_width, node.offset_height),
    };
    let center_x = rect.x + rect.w / 2.0;
    let center_y = rect.y + rect.h / 2.0;
    Rect::new(
        px_to_in(center_x - w / 2.0),
        px_to_in(center_y - h / 2.0),
        px_to_in(w),
        px_to_in(h),
    )
}

fn first_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

struct Borders {
    widths: [f64; 4],
    colors: [String; 4],
}

impl Borders {
    fn of(style: &ComputedStyle) -> Self {
        Self {
            widths: [
                css::px_to_points(&style.border_top_width),
                css::px_to_points(&style.border_right_width),
                css::px_to_points(&style.border_bottom_width),
                css::px_to_points(&style.border_left_width),
            ],
            colors: [
                style.border_top_color.clone(),
                style.border_right_color.clone(),
                style.border_bottom_color.clone(),
                style.border_left_color.clone(),
            ],
        }
    }

    fn any(&self) -> bool {
        self.widths.iter().any(|w| *w > 0.0)
    }

    fn uniform(&self) -> bool {
        self.widths[0] > 0.0
            && self.widths.iter().all(|w| *w == self.widths[0])
            && self.colors.iter().all(|c| *c == self.colors[0])
    }
}

#[derive(Default)]
struct Walker {
    elements: Vec<Element>,
    placeholders: Vec<Placeholder>,
    errors: Vec<String>,
}

impl Walker {
    fn visit(&mut self, node: &DomNode) {
        let tag = node.tag.as_str();

        if TEXT_TAGS.contains(&tag) && self.reject_decorated_text(node) {
            return;
        }
        if node.has_class(PLACEHOLDER_CLASS) || node.attribute(PLACEHOLDER_ATTR).is_some() {
            self.placeholder(node);
            return;
        }
        match tag {
            "svg" | "canvas" => {
                let kind = if tag == "svg" {
                    RasterizationType::Svg
                } else {
                    RasterizationType::Canvas
                };
                self.rasterized(node, kind);
                return;
            }
            _ if is_gradient(&node.style.background_image) => {
                if LAYOUT_TAGS.contains(&tag) {
                    self.reject_unwrapped_text(node);
                }
                self.rasterized(node, RasterizationType::Gradient);
                self.visit_children(node);
                return;
            }
            "img" => {
                self.image(node);
                return;
            }
            "table" => {
                let element = extract_table(node, position(node, None));
                self.elements.push(Element::PptxTable(element));
                return;
            }
            "hr" => {
                self.rule(node);
                return;
            }
            "ul" | "ol" => {
                let element = extract_list(node, position(node, None), &mut self.errors);
                if !element.items.is_empty() {
                    self.elements.push(Element::List(element));
                }
                return;
            }
            _ => {}
        }
        if let Some(text_tag) = TextTag::from_tag(tag) {
            self.text(node, text_tag);
            return;
        }
        if LAYOUT_TAGS.contains(&tag) {
            self.container(node);
        }
        self.visit_children(node);
    }

    fn visit_children(&mut self, node: &DomNode) {
        for child in node.element_children() {
            self.visit(child);
        }
    }

    fn reject_decorated_text(&mut self, node: &DomNode) -> bool {
        let style = &node.style;
        let mut issues = Vec::new();
        if css::is_visible_color(&style.background_color)
            || (!style.background_image.is_empty() && style.background_image != "none")
        {
            issues.push("background");
        }
        if Borders::of(style).any() {
            issues.push("border");
        }
        if css::parse_box_shadow(&style.box_shadow).is_some() {
            issues.push("shadow");
        }
        if issues.is_empty() {
            return false;
        }
        self.errors.push(format!(
            "Text element <{}> has {}. Backgrounds, borders, and shadows are only supported on <div> elements, not text elements.",
            node.tag,
            issues.join(", ")
        ));
        true
    }

    fn placeholder(&mut self, node: &DomNode) {
        let id = node
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                node.attribute(PLACEHOLDER_ATTR)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("placeholder-{}", self.placeholders.len()));
        if node.rect.w == 0.0 || node.rect.h == 0.0 {
            let axis = if node.rect.w == 0.0 { "width" } else { "height" };
            self.errors.push(format!(
                "Placeholder \"{id}\" has {axis}: 0. Placeholders need an explicit size in the layout."
            ));
            return;
        }
        let rect = position(node, None);
        self.placeholders.push(Placeholder {
            id,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        });
    }

    fn rasterized(&mut self, node: &DomNode, kind: RasterizationType) {
        if node.rect.is_empty() {
            debug!("skipping empty {} node {}", kind.as_str(), node.node_id);
            return;
        }
        self.elements.push(Element::RasterizedImage(RasterizedImage {
            rasterize_id: node.node_id.clone(),
            rasterization_type: kind,
            src: None,
            shadow: css::parse_box_shadow(&node.style.box_shadow),
            position: position(node, None),
        }));
    }

    fn image(&mut self, node: &DomNode) {
        let Some(src) = node.attribute("src").filter(|src| !src.is_empty()) else {
            return;
        };
        if node.rect.is_empty() {
            return;
        }
        self.elements.push(Element::Image(ImageElement {
            src: src.to_string(),
            position: position(node, None),
        }));
    }

    fn rule(&mut self, node: &DomNode) {
        let style = &node.style;
        let px = parse_px_or_zero(&style.border_top_width).max(1.0);
        let y = px_to_in(node.rect.y + px / 2.0);
        self.elements.push(Element::Line(LineElement {
            x1: px_to_in(node.rect.x),
            y1: y,
            x2: px_to_in(node.rect.x + node.rect.w),
            y2: y,
            color: css::rgb_to_hex(&style.border_top_color),
            width: px_to_pt(px),
        }));
    }

    fn reject_unwrapped_text(&mut self, node: &DomNode) {
        let stray: String = node.direct_text().collect();
        let stray = css::collapse_whitespace(&stray);
        let stray = stray.trim();
        if !stray.is_empty() {
            self.errors.push(format!(
                "{} element contains unwrapped text \"{}{}\". All text must be wrapped in <p>, <h1>-<h6>, <ul>, or <ol> tags to appear in PowerPoint.",
                node.tag.to_uppercase(),
                first_chars(stray, 50),
                if stray.chars().count() > 50 { "..." } else { "" }
            ));
        }
    }

    fn container(&mut self, node: &DomNode) {
        self.reject_unwrapped_text(node);

        let style = &node.style;
        let has_fill = css::is_visible_color(&style.background_color);
        let picture = css::extract_url(&style.background_image);
        let borders = Borders::of(style);
        let uniform = borders.uniform();
        let shadow = css::parse_box_shadow(&style.box_shadow);

        if has_fill || picture.is_some() || uniform || shadow.is_some() {
            let radius = css::border_radius_inches(&style.border_radius, &node.rect);
            let shape = ShapeStyle {
                fill: has_fill.then(|| css::rgb_to_hex(&style.background_color)),
                line: uniform.then(|| LineStyle {
                    color: css::rgb_to_hex(&borders.colors[0]),
                    width: borders.widths[0],
                }),
                rect_radius: round_to(radius, 4),
                background_image: picture,
                shadow,
                transparency: if has_fill {
                    css::transparency(&style.background_color, &style.opacity)
                } else {
                    None
                },
            };
            self.elements.push(Element::Shape(ShapeElement {
                shape,
                text: None,
                position: position(node, None),
            }));
        }

        if borders.any() && !uniform {
            self.border_lines(node, &borders);
        }
    }

    /// One line per drawn edge, inset by half its width so the stroke stays
    /// inside the box.
    fn border_lines(&mut self, node: &DomNode, borders: &Borders) {
        let r = node.rect;
        for (side, (&width_pt, color)) in borders.widths.iter().zip(&borders.colors).enumerate() {
            if width_pt <= 0.0 {
                continue;
            }
            let inset = width_pt / PT_PER_PX / 2.0;
            let (x1, y1, x2, y2) = match side {
                0 => (r.x, r.y + inset, r.x + r.w, r.y + inset),
                1 => (r.x + r.w - inset, r.y, r.x + r.w - inset, r.y + r.h),
                2 => (r.x, r.y + r.h - inset, r.x + r.w, r.y + r.h - inset),
                _ => (r.x + inset, r.y, r.x + inset, r.y + r.h),
            };
            self.elements.push(Element::Line(LineElement {
                x1: px_to_in(x1),
                y1: px_to_in(y1),
                x2: px_to_in(x2),
                y2: px_to_in(y2),
                color: css::rgb_to_hex(color),
                width: width_pt,
            }));
        }
    }

    fn text(&mut self, node: &DomNode, tag: TextTag) {
        let plain = inline::rendered_text(node);
        if plain.is_empty() {
            return;
        }
        if let Some(glyph) = inline::leading_bullet(&plain) {
            self.errors.push(format!(
                "Text element <{}> starts with bullet symbol \"{glyph}\". Use <ul> or <ol> lists instead of manual bullet symbols.",
                node.tag
            ));
            return;
        }

        let mut style = text_style(&node.style);
        let text = if has_inline_formatting(node) {
            let runs = collect_runs(node, &style, &mut self.errors);
            if let Some(spacing) = style.line_spacing {
                let largest = inline::max_run_font_size(&runs, style.font_size);
                if style.font_size > 0.0 && largest > style.font_size {
                    style.line_spacing = Some(round_to(spacing * largest / style.font_size, 2));
                }
            }
            TextBody::Runs(runs)
        } else {
            TextBody::Plain(plain)
        };

        let rect = position(node, style.rotate);
        self.elements.push(Element::Text(TextElement {
            tag,
            text,
            style,
            position: rect,
        }));
    }
}
