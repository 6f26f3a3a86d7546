//! Text boxes for paragraphs, headings and lists.

use crate::extract::slide_data::{ListElement, RunOptions, TextAlign, TextBody, TextElement, TextRun, TextStyle};
use crate::models::common::{Dimension, Rect};
use crate::models::elements::PageElementKind;
use crate::models::page::Slide;
use crate::models::properties::{self, Alignment, ParagraphStyle};
use crate::models::shape::{Shape, ShapeType};
use crate::models::shape_properties::{ContentAlignment, Insets, ShapeProperties};
use crate::models::text::{Bullet, ParagraphMarker, TextContent};
use crate::units::pt_to_in;

/// Width added to single-line boxes so font metric differences between the
/// browser and the presentation renderer do not wrap the line.
pub const SINGLE_LINE_PADDING: f64 = 0.02;
/// A box up to this many line heights tall counts as a single line.
pub const SINGLE_LINE_RATIO: f64 = 1.5;
/// Line height assumed when the page leaves `line-height: normal`.
pub const NORMAL_LINE_HEIGHT: f64 = 1.2;

/// Frame for a text box, widened when the text fits on one line.
pub fn text_frame(style: &TextStyle, position: Rect) -> Rect {
    let line_height = pt_to_in(style.line_spacing.unwrap_or(style.font_size * NORMAL_LINE_HEIGHT));
    if position.h > line_height * SINGLE_LINE_RATIO {
        return position;
    }
    let growth = position.w * SINGLE_LINE_PADDING;
    let x = match style.align {
        Some(TextAlign::Center) => position.x - growth / 2.0,
        Some(TextAlign::Right) => position.x - growth,
        _ => position.x,
    };
    Rect::new(x, position.y, position.w + growth, position.h)
}

fn alignment(align: Option<TextAlign>) -> Option<Alignment> {
    align.map(|align| match align {
        TextAlign::Left => Alignment::Start,
        TextAlign::Center => Alignment::Center,
        TextAlign::Right => Alignment::End,
        TextAlign::Justify => Alignment::Justified,
    })
}

fn paragraph_style(style: &TextStyle) -> ParagraphStyle {
    let nonzero = |pt: f64| (pt != 0.0).then(|| Dimension::pt(pt));
    ParagraphStyle {
        alignment: alignment(style.align),
        line_spacing: style.line_spacing.map(Dimension::pt),
        space_above: nonzero(style.para_space_before),
        space_below: nonzero(style.para_space_after),
        indent_start: None,
    }
}

/// Full run style of the element.
pub fn base_run_style(style: &TextStyle) -> properties::TextStyle {
    properties::TextStyle {
        font_family: (!style.font_face.is_empty()).then(|| style.font_face.clone()),
        font_size: (style.font_size > 0.0).then(|| Dimension::pt(style.font_size)),
        foreground_color: style.color,
        transparency: style.transparency,
        bold: Some(style.bold),
        italic: Some(style.italic),
        underline: Some(style.underline),
    }
}

fn run_style(base: &properties::TextStyle, options: &RunOptions) -> properties::TextStyle {
    let mut style = base.clone();
    if let Some(bold) = options.bold {
        style.bold = Some(bold);
    }
    if let Some(italic) = options.italic {
        style.italic = Some(italic);
    }
    if let Some(underline) = options.underline {
        style.underline = Some(underline);
    }
    if let Some(color) = options.color {
        style.foreground_color = Some(color);
    }
    if options.transparency.is_some() {
        style.transparency = options.transparency;
    }
    if let Some(size) = options.font_size {
        style.font_size = Some(Dimension::pt(size));
    }
    style
}

/// Paragraphs from runs: a run with `break_line` closes its paragraph and
/// the first run of each paragraph supplies its bullet.
pub fn runs_content(runs: &[TextRun], style: &TextStyle) -> TextContent {
    let base = base_run_style(style);
    let paragraph = paragraph_style(style);
    let mut content = TextContent::default();
    let mut open = false;
    for run in runs {
        if !open {
            content.push_paragraph(ParagraphMarker {
                style: paragraph.clone(),
                bullet: run.options.bullet.map(|bullet| Bullet {
                    nesting_level: bullet.level,
                    indent: Dimension::pt(bullet.indent),
                }),
            });
            open = true;
        }
        if !run.text.is_empty() {
            content.push_run(run.text.clone(), run_style(&base, &run.options));
        }
        if run.options.break_line {
            open = false;
        }
    }
    content
}

pub fn body_content(body: &TextBody, style: &TextStyle) -> TextContent {
    match body {
        TextBody::Plain(text) => {
            let mut content = TextContent::default();
            content.push_paragraph(ParagraphMarker {
                style: paragraph_style(style),
                bullet: None,
            });
            content.push_run(text.clone(), base_run_style(style));
            content
        }
        TextBody::Runs(runs) => runs_content(runs, style),
    }
}

fn insets(style: &TextStyle) -> Insets {
    style.margin.map_or_else(Insets::default, |[left, right, bottom, top]| Insets {
        left,
        right,
        bottom,
        top,
    })
}

fn text_box(content: TextContent, style: &TextStyle) -> PageElementKind {
    PageElementKind::Shape(Shape {
        shape_type: ShapeType::TextBox,
        text: Some(content),
        shape_properties: ShapeProperties {
            content_alignment: Some(ContentAlignment::Top),
            insets: Some(insets(style)),
            ..ShapeProperties::default()
        },
    })
}

pub fn add_text(slide: &mut Slide, element: &TextElement) {
    let frame = text_frame(&element.style, element.position);
    let content = body_content(&element.text, &element.style);
    slide
        .add_element(frame, text_box(content, &element.style))
        .rotation = element.style.rotate;
}

pub fn add_list(slide: &mut Slide, element: &ListElement) {
    let content = runs_content(&element.items, &element.style);
    slide.add_element(element.position, text_box(content, &element.style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::slide_data::BulletOptions;
    use crate::models::text::TextElement as StreamElement;

    fn style(align: Option<TextAlign>) -> TextStyle {
        TextStyle {
            font_size: 20.0,
            align,
            ..TextStyle::default()
        }
    }

    #[test]
    fn single_line_padding_follows_alignment() {
        // 20pt at 1.2 line height is a third of an inch.
        let position = Rect::new(1.0, 1.0, 4.0, 0.4);
        let center = text_frame(&style(Some(TextAlign::Center)), position);
        assert!((center.w - 4.08).abs() < 1e-9);
        assert!((center.x - 0.96).abs() < 1e-9);
        let right = text_frame(&style(Some(TextAlign::Right)), position);
        assert!((right.w - 4.08).abs() < 1e-9);
        assert!((right.x - 0.92).abs() < 1e-9);
        let left = text_frame(&style(None), position);
        assert_eq!(left.x, 1.0);
        assert!((left.w - 4.08).abs() < 1e-9);
    }

    #[test]
    fn multi_line_boxes_are_untouched() {
        let position = Rect::new(1.0, 1.0, 4.0, 1.5);
        assert_eq!(text_frame(&style(Some(TextAlign::Center)), position), position);
    }

    #[test]
    fn breaks_open_paragraphs_with_bullets() {
        let bullet = |level| RunOptions {
            bullet: Some(BulletOptions { indent: 15.0, level }),
            break_line: true,
            ..RunOptions::default()
        };
        let runs = vec![
            TextRun::new("Top", bullet(0)),
            TextRun::new("Nested ", RunOptions {
                bullet: Some(BulletOptions { indent: 15.0, level: 1 }),
                ..RunOptions::default()
            }),
            TextRun::new("bold", RunOptions {
                bold: Some(true),
                ..RunOptions::default()
            }),
        ];
        let content = runs_content(&runs, &style(None));
        let levels: Vec<u8> = content
            .paragraphs()
            .filter_map(|p| p.bullet.as_ref().map(|b| b.nesting_level))
            .collect();
        assert_eq!(levels, vec![0, 1]);
        assert_eq!(content.plain_text(), "Top\nNested bold");
        let StreamElement::TextRun(last) = content.text_elements.last().unwrap() else {
            panic!("expected a run")
        };
        assert_eq!(last.style.bold, Some(true));
        assert_eq!(last.style.font_size, Some(Dimension::pt(20.0)));
    }

    #[test]
    fn rotation_is_carried_to_the_element() {
        let mut slide = Slide::new("s");
        let element = TextElement {
            tag: crate::extract::slide_data::TextTag::P,
            text: TextBody::Plain("Side".into()),
            style: TextStyle {
                rotate: Some(270.0),
                ..style(None)
            },
            position: Rect::new(0.0, 0.0, 2.0, 2.0),
        };
        add_text(&mut slide, &element);
        assert_eq!(slide.page_elements[0].rotation, Some(270.0));
    }
}
