//! [`PageDriver`] backed by a local Chrome/Chromium over the DevTools protocol.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, Viewport};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use log::{debug, warn};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::config::{ConvertOptions, DebugMode};
use crate::errors::{ConversionError, Result};
use crate::page::driver::{BrowserLauncher, PageDriver, ScreenshotRequest};

/// Starts one browser process per launched page.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    /// Show the browser window. Needed for debug pauses to be useful.
    pub headed: bool,
    /// Explicit browser binary; otherwise the usual install locations are searched.
    pub executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headed whenever debug pauses are enabled.
    pub fn from_options(options: &ConvertOptions) -> Self {
        Self {
            headed: options.debug != DebugMode::Off,
            executable: None,
        }
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Page = ChromiumPage;

    async fn launch(&self) -> Result<ChromiumPage> {
        let mut builder = BrowserConfig::builder();
        if self.headed {
            builder = builder.with_head();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ConversionError::BrowserUnavailable)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ConversionError::BrowserUnavailable(err.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("browser handler stopped: {err}");
                    break;
                }
            }
        });
        let page = browser.new_page("about:blank").await?;
        Ok(ChromiumPage {
            browser,
            page,
            handler,
        })
    }
}

pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn set_viewport(&mut self, width: u32, height: u32, device_scale_factor: f64) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(width as i64, height as i64, device_scale_factor, false);
        self.page.execute(params).await?;
        Ok(())
    }

    async fn evaluate(&mut self, expression: &str) -> Result<Value> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(|message| ConversionError::Rpc {
                method: "Runtime.evaluate".to_string(),
                message,
            })?;
        let result = self.page.evaluate_expression(params).await?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn screenshot(&mut self, request: ScreenshotRequest) -> Result<Vec<u8>> {
        let mut params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .omit_background(request.omit_background)
            .full_page(request.full_page);
        if let Some(clip) = request.clip {
            params = params.clip(Viewport {
                x: clip.x,
                y: clip.y,
                width: clip.w,
                height: clip.h,
                scale: 1.0,
            });
        }
        Ok(self.page.screenshot(params.build()).await?)
    }

    /// Waits for Enter on stdin while the headed browser stays open.
    async fn pause(&mut self) -> Result<()> {
        warn!("page paused for inspection, press Enter to continue");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self.browser.close().await;
        if let Err(err) = self.browser.wait().await {
            warn!("browser process did not exit cleanly: {err}");
        }
        self.handler.abort();
        closed?;
        Ok(())
    }
}
