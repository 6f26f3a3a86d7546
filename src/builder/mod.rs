//! Folds [`SlideData`] into a [`Slide`]. Dispatch is an exhaustive match
//! over [`Element`], so every element kind has a handler.

pub mod background;
pub mod shape;
pub mod table;
pub mod text;

use url::Url;

use crate::config::ConvertOptions;
use crate::errors::{ConversionError, Result};
use crate::extract::slide_data::{Element, RasterizedImage, SlideData};
use crate::models::page::Slide;
use crate::models::presentation::PresLayout;

/// Local path for a `file://` URL (percent-decoded); other sources unchanged.
pub fn strip_file_url(src: &str) -> String {
    Url::parse(src)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| src.to_string())
}

fn missing_source(raster: &RasterizedImage) -> ConversionError {
    ConversionError::MissingRasterSource {
        kind: raster.rasterization_type.as_str().to_string(),
        id: raster.rasterize_id.clone(),
    }
}

/// Every rasterized element must carry an image before building starts.
pub fn ensure_rasterized(data: &SlideData) -> Result<()> {
    match data.unrasterized() {
        Some(raster) => Err(missing_source(raster)),
        None => Ok(()),
    }
}

fn add_element(slide: &mut Slide, element: &Element, options: &ConvertOptions) -> Result<()> {
    match element {
        Element::Text(text) => text::add_text(slide, text),
        Element::List(list) => text::add_list(slide, list),
        Element::Image(image) => shape::add_image(slide, &image.src, None, image.position),
        Element::RasterizedImage(raster) => {
            let src = raster.src.as_deref().ok_or_else(|| missing_source(raster))?;
            shape::add_image(slide, src, raster.shadow.as_ref(), raster.position);
        }
        Element::Shape(shape) => shape::add_shape(slide, shape),
        Element::Line(line) => shape::add_line(slide, line),
        Element::PptxTable(table) => table::add_table(slide, table, &options.theme),
    }
    Ok(())
}

/// Builds `data` into `slide`: background first, then elements back to front.
pub async fn build_slide(
    slide: &mut Slide,
    data: &SlideData,
    layout: &PresLayout,
    options: &ConvertOptions,
) -> Result<()> {
    ensure_rasterized(data)?;
    background::apply_background(slide, &data.background, layout, &options.tmp_dir).await?;
    for element in &data.elements {
        add_element(slide, element, options)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::slide_data::{Background, ImageElement, RasterizationType};
    use crate::models::colors::RgbColor;
    use crate::models::common::Rect;
    use crate::models::elements::PageElementKind;

    fn data(elements: Vec<Element>) -> SlideData {
        SlideData {
            elements,
            background: Background::Color { value: RgbColor::WHITE },
            placeholders: Vec::new(),
            html: String::new(),
            errors: Vec::new(),
        }
    }

    fn raster(src: Option<&str>) -> Element {
        Element::RasterizedImage(RasterizedImage {
            rasterize_id: "9".into(),
            rasterization_type: RasterizationType::Canvas,
            src: src.map(str::to_string),
            shadow: None,
            position: Rect::new(1.0, 1.0, 1.0, 1.0),
        })
    }

    #[test]
    fn file_urls_become_paths() {
        assert_eq!(strip_file_url("file:///tmp/a%20b.png"), "/tmp/a b.png");
        assert_eq!(strip_file_url("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(strip_file_url("file:///tmp/100%"), "/tmp/100%");
        assert_eq!(strip_file_url("file://localhost/tmp/logo.png"), "/tmp/logo.png");
        assert_eq!(strip_file_url("/tmp/plain.png"), "/tmp/plain.png");
    }

    #[tokio::test]
    async fn unrasterized_elements_abort_before_any_output() {
        let mut slide = Slide::new("s");
        let slide_data = data(vec![
            Element::Image(ImageElement {
                src: "file:///tmp/logo.png".into(),
                position: Rect::new(0.0, 0.0, 1.0, 1.0),
            }),
            raster(None),
        ]);
        let err = build_slide(&mut slide, &slide_data, &PresLayout::default(), &ConvertOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Rasterized canvas element 9 has no image source");
        assert!(slide.page_elements.is_empty());
        assert!(slide.background.is_none());
    }

    #[tokio::test]
    async fn elements_are_added_in_document_order() {
        let mut slide = Slide::new("s");
        let slide_data = data(vec![
            Element::Image(ImageElement {
                src: "file:///tmp/logo.png".into(),
                position: Rect::new(0.0, 0.0, 1.0, 1.0),
            }),
            raster(Some("/tmp/rasterized-canvas-0123.png")),
        ]);
        build_slide(&mut slide, &slide_data, &PresLayout::default(), &ConvertOptions::default())
            .await
            .unwrap();
        let sources: Vec<&str> = slide
            .page_elements
            .iter()
            .filter_map(|element| match &element.element_kind {
                PageElementKind::Image(image) => Some(image.source_url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sources, vec!["/tmp/logo.png", "/tmp/rasterized-canvas-0123.png"]);
    }
}
