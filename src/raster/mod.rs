//! Rasterization of content a slide cannot represent natively (SVG, canvas,
//! CSS gradients) into PNG files, one isolated element at a time.

pub mod gradient;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use sha2::{Digest, Sha256};

use crate::config::Timeouts;
use crate::errors::{ConversionError, Result};
use crate::extract::slide_data::{RasterizationType, RasterizedImage, SlideData};
use crate::extract::snapshot::node_selector;
use crate::page::driver::{PageDriver, ScreenshotRequest};
use crate::page::{rpc, with_timeout};

static ARTIFACT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 16 hex characters unique per call: SHA-256 over the id, wall-clock
/// nanoseconds and a process-wide counter.
pub fn artifact_hash(id: &str) -> String {
    let sequence = ARTIFACT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher
        .finalize()
        .iter()
        .take(8)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

pub fn rasterized_file_name(kind: RasterizationType, id: &str) -> String {
    format!("rasterized-{}-{}.png", kind.as_str(), artifact_hash(id))
}

pub fn gradient_file_name(css: &str) -> String {
    format!("gradient-{}.png", artifact_hash(css))
}

/// Stylesheet that leaves only `selector` visible. SVG content needs its
/// descendants revealed too; gradient captures drop the box shadow so it
/// does not bleed into the crop.
pub fn isolation_css(kind: RasterizationType, selector: &str) -> String {
    let mut css = format!(
        "* {{ visibility: hidden !important; }}\n\
         html, body {{ background: transparent !important; }}\n\
         {selector} {{ visibility: visible !important; }}\n"
    );
    match kind {
        RasterizationType::Svg => {
            css.push_str(&format!("{selector} * {{ visibility: visible !important; }}\n"));
        }
        RasterizationType::Gradient => {
            css.push_str(&format!("{selector} {{ box-shadow: none !important; }}\n"));
        }
        RasterizationType::Canvas => {}
    }
    css
}

/// Captures every rasterized element of `data` into `tmp_dir`, setting its
/// `src`. Any element that cannot be found or captured aborts the pass.
pub async fn rasterize_all<P: PageDriver + ?Sized>(
    page: &mut P,
    data: &mut SlideData,
    tmp_dir: &Path,
    timeouts: &Timeouts,
) -> Result<usize> {
    let mut captured = 0;
    for element in data.rasterized_mut() {
        let path = rasterize_one(page, element, tmp_dir, timeouts).await?;
        debug!(
            "rasterized {} element {} to {}",
            element.rasterization_type.as_str(),
            element.rasterize_id,
            path.display()
        );
        element.src = Some(path.to_string_lossy().into_owned());
        captured += 1;
    }
    Ok(captured)
}

async fn rasterize_one<P: PageDriver + ?Sized>(
    page: &mut P,
    element: &RasterizedImage,
    tmp_dir: &Path,
    timeouts: &Timeouts,
) -> Result<PathBuf> {
    let kind = element.rasterization_type;
    let id = element.rasterize_id.as_str();
    let selector = node_selector(id);
    let missing = || ConversionError::RasterTargetMissing {
        kind: kind.as_str().to_string(),
        id: id.to_string(),
    };

    if rpc::count(page, timeouts, &selector).await? == 0 {
        return Err(missing());
    }

    rpc::push_style(page, timeouts, &isolation_css(kind, &selector)).await?;
    let capture = capture(page, &selector, timeouts).await;
    let restored = rpc::pop_style(page, timeouts).await;

    let bytes = match capture {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Err(missing()),
        Err(err) => {
            return Err(ConversionError::RasterCapture {
                kind: kind.as_str().to_string(),
                id: id.to_string(),
                message: err.to_string(),
            })
        }
    };
    restored?;

    let path = tmp_dir.join(rasterized_file_name(kind, id));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

async fn capture<P: PageDriver + ?Sized>(
    page: &mut P,
    selector: &str,
    timeouts: &Timeouts,
) -> Result<Option<Vec<u8>>> {
    let Some(clip) = rpc::element_box(page, timeouts, selector).await? else {
        return Ok(None);
    };
    let bytes = with_timeout(
        "capturing screenshot",
        timeouts.screenshot,
        page.screenshot(ScreenshotRequest::element(clip)),
    )
    .await?;
    Ok(Some(bytes))
}
