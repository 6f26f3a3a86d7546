//! The page-automation seam. A conversion talks to the browser only through
//! these traits, so the pipeline runs against any engine (or a test double).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::extract::snapshot::PxRect;

/// Parameters of one screenshot call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenshotRequest {
    /// Region in CSS pixels; `None` captures the viewport.
    pub clip: Option<PxRect>,
    /// Render with a transparent page background.
    pub omit_background: bool,
    pub full_page: bool,
}

impl ScreenshotRequest {
    pub fn full_page() -> Self {
        Self {
            full_page: true,
            ..Self::default()
        }
    }

    pub fn element(clip: PxRect) -> Self {
        Self {
            clip: Some(clip),
            omit_background: true,
            full_page: false,
        }
    }
}

/// One live browser page.
#[async_trait]
pub trait PageDriver: Send {
    /// Loads `url` and waits for the load event.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    async fn set_viewport(&mut self, width: u32, height: u32, device_scale_factor: f64) -> Result<()>;

    /// Evaluates a JavaScript expression and returns its JSON value. Promises
    /// are awaited.
    async fn evaluate(&mut self, expression: &str) -> Result<Value>;

    /// Captures a PNG.
    async fn screenshot(&mut self, request: ScreenshotRequest) -> Result<Vec<u8>>;

    /// Holds the page open for manual inspection. Engines without a visible
    /// window return immediately.
    async fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    /// Releases the page and the browser behind it.
    async fn close(&mut self) -> Result<()>;

    async fn add_style_tag(&mut self, css: &str) -> Result<()> {
        let literal = serde_json::to_string(css)?;
        self.evaluate(&format!(
            "(() => {{ const s = document.createElement('style'); s.textContent = {literal}; document.head.appendChild(s); return true; }})()"
        ))
        .await
        .map(|_| ())
    }

    async fn add_script_tag(&mut self, source: &str) -> Result<()> {
        let literal = serde_json::to_string(source)?;
        self.evaluate(&format!(
            "(() => {{ const s = document.createElement('script'); s.textContent = {literal}; document.head.appendChild(s); return true; }})()"
        ))
        .await
        .map(|_| ())
    }
}

/// Opens fresh pages.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Page: PageDriver;

    async fn launch(&self) -> Result<Self::Page>;
}
