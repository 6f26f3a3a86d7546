//! Autoshapes, pictures and connector lines.

use crate::builder::strip_file_url;
use crate::builder::text::body_content;
use crate::extract::slide_data::{LineElement, ShadowStyle, ShapeElement, TextStyle};
use crate::models::common::{Dimension, Rect};
use crate::models::elements::PageElementKind;
use crate::models::image::Image;
use crate::models::line::{Line, LineProperties};
use crate::models::page::Slide;
use crate::models::shape::{Shape, ShapeType};
use crate::models::shape_properties::{
    Outline, Shadow, ShapeBackgroundFill, ShapeProperties, SolidFill, StretchedPictureFill,
};

pub fn shadow(style: &ShadowStyle) -> Shadow {
    Shadow {
        angle: style.angle,
        blur_radius: Dimension::pt(style.blur),
        distance: Dimension::pt(style.offset),
        color: style.color,
        alpha: style.opacity,
    }
}

/// Picture fill wins over a flat fill when both are present.
pub fn shape_kind(element: &ShapeElement) -> PageElementKind {
    let style = &element.shape;
    let fill = match (&style.background_image, style.fill) {
        (Some(picture), _) => Some(ShapeBackgroundFill::StretchedPictureFill(StretchedPictureFill {
            content_url: strip_file_url(picture),
        })),
        (None, Some(color)) => Some(ShapeBackgroundFill::SolidFill(SolidFill {
            color,
            transparency: style.transparency,
        })),
        (None, None) => None,
    };
    let rounded = style.rect_radius > 0.0;
    PageElementKind::Shape(Shape {
        shape_type: if rounded {
            ShapeType::RoundRectangle
        } else {
            ShapeType::Rectangle
        },
        text: element
            .text
            .as_ref()
            .map(|body| body_content(body, &TextStyle::default())),
        shape_properties: ShapeProperties {
            shape_background_fill: fill,
            outline: style.line.as_ref().map(|line| Outline {
                color: line.color,
                weight: Dimension::pt(line.width),
            }),
            shadow: style.shadow.as_ref().map(shadow),
            corner_radius: rounded.then(|| Dimension::inches(style.rect_radius)),
            content_alignment: None,
            insets: None,
        },
    })
}

pub fn add_shape(slide: &mut Slide, element: &ShapeElement) {
    slide.add_element(element.position, shape_kind(element));
}

pub fn add_image(slide: &mut Slide, src: &str, shadow_spec: Option<&ShadowStyle>, position: Rect) {
    slide.add_element(
        position,
        PageElementKind::Image(Image {
            source_url: strip_file_url(src),
            shadow: shadow_spec.map(shadow),
        }),
    );
}

/// A connector spanning its bounding box; flips encode the direction.
pub fn add_line(slide: &mut Slide, line: &LineElement) {
    let frame = Rect::new(
        line.x1.min(line.x2),
        line.y1.min(line.y2),
        (line.x2 - line.x1).abs(),
        (line.y2 - line.y1).abs(),
    );
    slide.add_element(
        frame,
        PageElementKind::Line(Line {
            line_properties: LineProperties {
                color: line.color,
                weight: Dimension::pt(line.width),
                flip_horizontal: line.x2 < line.x1,
                flip_vertical: line.y2 < line.y1,
            },
        }),
    );
}
