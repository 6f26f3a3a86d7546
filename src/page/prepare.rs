//! Brings a fresh page into an extraction-ready state.

use std::path::Path;

use log::debug;
use url::Url;

use crate::config::Timeouts;
use crate::errors::{ConversionError, Result};
use crate::models::presentation::PresLayout;
use crate::page::driver::PageDriver;
use crate::page::rpc::{self, HELPER_SCRIPT, PREPARE_CSS};
use crate::page::with_timeout;
use crate::units::in_to_px;

/// Oversampling for crisp rasterized captures.
pub const DEVICE_SCALE_FACTOR: f64 = 3.0;

/// Canvas size of a layout in whole CSS pixels.
pub fn canvas_px(layout: &PresLayout) -> (u32, u32) {
    (
        in_to_px(layout.width_in()).round() as u32,
        in_to_px(layout.height_in()).round() as u32,
    )
}

/// `file://` URL for an HTML document, with reserved characters escaped.
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = path.canonicalize()?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| ConversionError::Navigation {
            url: absolute.display().to_string(),
            message: "path cannot be expressed as a file URL".to_string(),
        })
}

fn injection(what: &'static str) -> impl FnOnce(ConversionError) -> ConversionError {
    move |err| ConversionError::Injection {
        what,
        message: err.to_string(),
    }
}

/// Loads `path`, fixes the viewport to the canvas, installs the stylesheet
/// and helper, and runs the helper's `init` hook.
pub async fn prepare_page<P: PageDriver + ?Sized>(
    page: &mut P,
    path: &Path,
    layout: &PresLayout,
    timeouts: &Timeouts,
) -> Result<()> {
    let url = file_url(path)?;
    let (width, height) = canvas_px(layout);
    with_timeout(
        "setting viewport",
        timeouts.evaluation,
        page.set_viewport(width, height, DEVICE_SCALE_FACTOR),
    )
    .await?;

    debug!("loading {url}");
    with_timeout(&format!("loading {url}"), timeouts.navigation, page.navigate(&url))
        .await
        .map_err(|err| match err {
            timeout @ ConversionError::Timeout { .. } => timeout,
            other => ConversionError::Navigation {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;

    with_timeout("injecting stylesheet", timeouts.evaluation, page.add_style_tag(PREPARE_CSS))
        .await
        .map_err(injection("stylesheet"))?;
    with_timeout("injecting helper script", timeouts.evaluation, page.add_script_tag(HELPER_SCRIPT))
        .await
        .map_err(injection("helper script"))?;
    let stamped = rpc::init(page, timeouts).await.map_err(injection("init hook"))?;
    debug!("page ready, {stamped} nodes stamped");
    Ok(())
}
