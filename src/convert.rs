//! The HTML → slide pipeline.
//!
//! Phases run strictly in sequence on one page: preparation, dimension
//! checks, extraction, rasterization, audit artifacts, the validation
//! verdict, and finally slide building. The slide is built on a scratch copy
//! and committed to the presentation only when every phase succeeded.

use std::path::Path;

use log::{debug, info, warn};

use crate::builder::build_slide;
use crate::config::{ConvertOptions, DebugMode};
use crate::errors::{ConversionError, Result};
use crate::extract::{extract_slide_data, SlideData};
use crate::models::placeholder::Placeholder;
use crate::models::presentation::Presentation;
use crate::page::driver::{BrowserLauncher, PageDriver, ScreenshotRequest};
use crate::page::prepare::prepare_page;
use crate::page::{rpc, with_timeout};
use crate::raster::rasterize_all;
use crate::validate::dimensions::{dimension_errors, measure_body};
use crate::validate::position::bottom_margin_errors;
use crate::validate::ValidationGate;

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Index of the built slide in the presentation.
    pub slide: usize,
    /// Regions reserved for content added after conversion.
    pub placeholders: Vec<Placeholder>,
    /// The document's HTML as rendered at extraction time.
    pub html: String,
}

async fn checkpoint<P: PageDriver + ?Sized>(page: &mut P, debug: DebugMode, name: &str, has_errors: bool) -> Result<()> {
    if debug.should_pause(has_errors) {
        warn!("debug pause at {name} checkpoint (errors: {has_errors})");
        page.pause().await?;
    }
    Ok(())
}

/// Writes `{basename}-{timestamp}.png` (full page) and `.html` to `tmp_dir`.
async fn save_artifacts<P: PageDriver + ?Sized>(
    page: &mut P,
    html_path: &Path,
    data: &SlideData,
    options: &ConvertOptions,
) -> Result<()> {
    let basename = html_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "slide".to_string());
    let stamp = chrono::Utc::now().timestamp_millis();
    let screenshot = with_timeout(
        "capturing full-page screenshot",
        options.timeouts.screenshot,
        page.screenshot(ScreenshotRequest::full_page()),
    )
    .await?;
    let png = options.tmp_dir.join(format!("{basename}-{stamp}.png"));
    tokio::fs::write(&png, screenshot).await?;
    let html = options.tmp_dir.join(format!("{basename}-{stamp}.html"));
    tokio::fs::write(&html, &data.html).await?;
    debug!("saved {} and {}", png.display(), html.display());
    Ok(())
}

async fn run<P: PageDriver + ?Sized>(
    page: &mut P,
    html_path: &Path,
    presentation: &mut Presentation,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let layout = presentation.pres_layout;
    let timeouts = &options.timeouts;
    if let Some(index) = options.slide {
        if presentation.slide(index).is_none() {
            return Err(ConversionError::InvalidSlide(format!(
                "slide index {index} out of range ({} slides)",
                presentation.slides.len()
            )));
        }
    }

    prepare_page(page, html_path, &layout, timeouts).await?;

    let mut gate = ValidationGate::new();
    let metrics = measure_body(page, timeouts).await?;
    let found = gate.record("dimensions", dimension_errors(&metrics, &layout));
    checkpoint(page, options.debug, "dimensions", found > 0).await?;

    let snapshot = rpc::snapshot(page, timeouts).await?;
    let mut data = extract_slide_data(snapshot);
    let mut found = gate.record("extraction", data.errors.iter().cloned());
    found += gate.record("text position", bottom_margin_errors(&data.elements, layout.height_in()));
    checkpoint(page, options.debug, "extraction", found > 0).await?;

    let captured = rasterize_all(page, &mut data, &options.tmp_dir, timeouts).await?;
    debug!("rasterized {captured} elements");
    save_artifacts(page, html_path, &data, options).await?;

    gate.finish().into_result()?;

    let mut slide = match options.slide {
        Some(index) => presentation.slides[index].clone(),
        None => presentation.new_slide(),
    };
    build_slide(&mut slide, &data, &layout, options).await?;
    let index = presentation.commit_slide(options.slide, slide)?;
    info!(
        "converted {} into slide {} ({} elements, {} placeholders)",
        html_path.display(),
        index + 1,
        data.elements.len(),
        data.placeholders.len()
    );
    Ok(Conversion {
        slide: index,
        placeholders: data.placeholders,
        html: data.html,
    })
}

/// Converts one HTML file on an already open page. On any error the
/// presentation is left exactly as it was.
pub async fn html_to_slide<P: PageDriver + ?Sized>(
    page: &mut P,
    html_path: &Path,
    presentation: &mut Presentation,
    options: &ConvertOptions,
) -> Result<Conversion> {
    run(page, html_path, presentation, options)
        .await
        .map_err(|err| err.in_file(html_path))
}

/// Launches a page, converts `html_path`, and closes the page on every exit
/// path before returning.
pub async fn convert_file<L: BrowserLauncher>(
    launcher: &L,
    html_path: &Path,
    presentation: &mut Presentation,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let mut page = launcher.launch().await.map_err(|err| err.in_file(html_path))?;
    let outcome = html_to_slide(&mut page, html_path, presentation, options).await;
    let closed = with_timeout("closing browser", options.timeouts.evaluation, page.close()).await;
    match (outcome, closed) {
        (Ok(conversion), Ok(())) => Ok(conversion),
        (Ok(_), Err(err)) => Err(err.in_file(html_path)),
        (Err(err), close_result) => {
            if let Err(close_err) = close_result {
                warn!("failed to close browser after error: {close_err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::snapshot::{ComputedStyle, DomChild, DomNode, PxRect};
    use crate::models::elements::PageElementKind;
    use crate::models::presentation::PresLayout;
    use crate::page::fake::{FakeLauncher, FakePage};

    fn node(id: &str, tag: &str, rect: PxRect, children: Vec<DomChild>) -> DomNode {
        DomNode {
            node_id: id.into(),
            tag: tag.into(),
            rect,
            offset_width: rect.w,
            offset_height: rect.h,
            style: ComputedStyle {
                font_size: "32px".into(),
                font_family: "Arial".into(),
                font_weight: "700".into(),
                color: "rgb(17, 17, 17)".into(),
                opacity: "1".into(),
                ..ComputedStyle::default()
            },
            children,
            ..DomNode::default()
        }
    }

    fn title_and_chart() -> FakePage {
        FakePage::with_body(vec![
            node(
                "1",
                "h1",
                PxRect { x: 48.0, y: 48.0, w: 600.0, h: 48.0 },
                vec![DomChild::Text("Quarterly review".into())],
            ),
            node("2", "svg", PxRect { x: 96.0, y: 144.0, w: 384.0, h: 192.0 }, vec![]),
        ])
    }

    fn html_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("slide1.html");
        std::fs::write(&path, "<html><body><h1>Quarterly review</h1><svg></svg></body></html>").unwrap();
        path
    }

    #[tokio::test]
    async fn heading_and_svg_convert_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_file(dir.path());
        let launcher = FakeLauncher { template: title_and_chart() };
        let options = ConvertOptions::default().with_tmp_dir(dir.path());
        let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);

        let conversion = convert_file(&launcher, &html, &mut presentation, &options)
            .await
            .unwrap();

        assert_eq!(conversion.slide, 0);
        assert!(conversion.placeholders.is_empty());
        assert_eq!(presentation.slides.len(), 1);
        let images: Vec<&str> = presentation.slides[0]
            .page_elements
            .iter()
            .filter_map(|element| match &element.element_kind {
                PageElementKind::Image(image) => Some(image.source_url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 1);
        assert!(images[0].starts_with(dir.path().to_str().unwrap()));
        assert!(images[0].contains("rasterized-svg-"));
        assert!(Path::new(images[0]).exists());
        assert!(launcher.template.is_closed());

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|name| name.starts_with("slide1-") && name.ends_with(".html")));
        assert!(names.iter().any(|name| name.starts_with("slide1-") && name.ends_with(".png")));
    }

    #[tokio::test]
    async fn validation_failure_leaves_presentation_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_file(dir.path());
        let mut template = title_and_chart();
        template.metrics = (960.0, 540.0, 960.0, 601.0);
        let launcher = FakeLauncher { template };
        let options = ConvertOptions::default().with_tmp_dir(dir.path());
        let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);

        let err = convert_file(&launcher, &html, &mut presentation, &options)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(&html.display().to_string()));
        assert!(message.contains("HTML content overflows body by 45.0pt vertically"));
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
        assert!(presentation.slides.is_empty());
        assert!(launcher.template.is_closed());
    }

    #[tokio::test]
    async fn precondition_failures_still_close_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_file(dir.path());
        let mut template = title_and_chart();
        template.missing_nodes = vec!["2".into()];
        let launcher = FakeLauncher { template };
        let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);

        let err = convert_file(
            &launcher,
            &html,
            &mut presentation,
            &ConvertOptions::default().with_tmp_dir(dir.path()),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Cannot rasterize svg element 2"));
        assert!(err.validation_errors().is_none());
        assert!(presentation.slides.is_empty());
        assert!(launcher.template.is_closed());
    }

    #[tokio::test]
    async fn draws_into_an_existing_slide() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_file(dir.path());
        let mut page = title_and_chart();
        let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);
        presentation.add_slide();
        presentation.add_slide();
        let options = ConvertOptions::default().with_tmp_dir(dir.path()).with_slide(1);

        let conversion = html_to_slide(&mut page, &html, &mut presentation, &options)
            .await
            .unwrap();
        assert_eq!(conversion.slide, 1);
        assert_eq!(presentation.slides.len(), 2);
        assert!(presentation.slides[0].page_elements.is_empty());
        assert_eq!(presentation.slides[1].page_elements.len(), 2);

        let out_of_range = ConvertOptions::default().with_tmp_dir(dir.path()).with_slide(5);
        let err = html_to_slide(&mut page, &html, &mut presentation, &out_of_range)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid slide"));
    }

    #[tokio::test]
    async fn debug_always_pauses_at_each_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_file(dir.path());
        let mut page = title_and_chart();
        let mut presentation = Presentation::new(PresLayout::LAYOUT_16X9);
        let mut options = ConvertOptions::default().with_tmp_dir(dir.path());
        options.debug = DebugMode::Always;
        html_to_slide(&mut page, &html, &mut presentation, &options)
            .await
            .unwrap();
        assert_eq!(page.pauses, 2);

        let mut quiet = title_and_chart();
        options.debug = DebugMode::OnError;
        html_to_slide(&mut quiet, &html, &mut presentation, &options)
            .await
            .unwrap();
        assert_eq!(quiet.pauses, 0);
    }
}
