//! In-memory page used by tests. It answers helper calls from a canned
//! snapshot and records every interaction.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::{ConversionError, Result};
use crate::extract::snapshot::{DomChild, DomNode, DomSnapshot, PxRect};
use crate::page::driver::{BrowserLauncher, PageDriver, ScreenshotRequest};

const PREFIX: &str = "window.__h2p.";

#[derive(Debug, Clone)]
pub struct FakePage {
    pub snapshot: DomSnapshot,
    /// `(width, height, scrollWidth, scrollHeight)` reported by `bodyMetrics`.
    pub metrics: (f64, f64, f64, f64),
    /// Node ids that `count` and `box` pretend are gone.
    pub missing_nodes: Vec<String>,
    pub fail_method: Option<String>,
    pub fail_screenshot: bool,

    pub viewports: Vec<(u32, u32, f64)>,
    pub navigated: Vec<String>,
    pub evaluated: Vec<String>,
    pub screenshots: Vec<ScreenshotRequest>,
    pub pushed_styles: Vec<String>,
    pub pops: usize,
    pub pauses: usize,
    pub closed: Arc<AtomicBool>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            snapshot: DomSnapshot {
                body: DomNode {
                    node_id: "0".into(),
                    tag: "body".into(),
                    rect: PxRect { x: 0.0, y: 0.0, w: 960.0, h: 540.0 },
                    offset_width: 960.0,
                    offset_height: 540.0,
                    ..DomNode::default()
                },
                html: "<html><body></body></html>".into(),
            },
            metrics: (960.0, 540.0, 960.0, 540.0),
            missing_nodes: Vec::new(),
            fail_method: None,
            fail_screenshot: false,
            viewports: Vec::new(),
            navigated: Vec::new(),
            evaluated: Vec::new(),
            screenshots: Vec::new(),
            pushed_styles: Vec::new(),
            pops: 0,
            pauses: 0,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl FakePage {
    pub fn with_body(children: Vec<DomNode>) -> Self {
        let mut page = Self::default();
        page.snapshot.body.children = children.into_iter().map(DomChild::Element).collect();
        page
    }

    pub fn calls_to(&self, method: &str) -> usize {
        let needle = format!("{PREFIX}{method}(");
        self.evaluated.iter().filter(|expr| expr.contains(&needle)).count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn find(&self, id: &str) -> Option<&DomNode> {
        if self.missing_nodes.iter().any(|missing| missing == id) {
            return None;
        }
        let body = &self.snapshot.body;
        if body.node_id == id {
            return Some(body);
        }
        body.find_descendant(&|node| node.node_id == id)
    }

    fn answer(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        if self.fail_method.as_deref() == Some(method) {
            return Err(ConversionError::Rpc {
                method: method.to_string(),
                message: "ReferenceError: boom".into(),
            });
        }
        let selector_id = args
            .first()
            .and_then(Value::as_str)
            .and_then(|selector| selector.split('"').nth(1))
            .unwrap_or_default()
            .to_string();
        Ok(match method {
            "init" => json!(5),
            "bodyMetrics" => {
                let (width, height, scroll_width, scroll_height) = self.metrics;
                json!({
                    "width": width,
                    "height": height,
                    "scrollWidth": scroll_width,
                    "scrollHeight": scroll_height,
                })
            }
            "snapshot" => serde_json::to_value(&self.snapshot)?,
            "count" => json!(usize::from(self.find(&selector_id).is_some())),
            "box" => match self.find(&selector_id) {
                Some(node) => serde_json::to_value(node.rect)?,
                None => json!({ "missing": true }),
            },
            "pushStyle" => {
                let css = args.first().and_then(Value::as_str).unwrap_or_default();
                self.pushed_styles.push(css.to_string());
                json!(true)
            }
            "popStyle" => {
                self.pops += 1;
                json!(true)
            }
            other => {
                return Err(ConversionError::Rpc {
                    method: other.to_string(),
                    message: "unknown helper method".into(),
                })
            }
        })
    }
}

fn blank_png(width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbaImage::new(width.max(1), height.max(1));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, image::ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigated.push(url.to_string());
        Ok(())
    }

    async fn set_viewport(&mut self, width: u32, height: u32, device_scale_factor: f64) -> Result<()> {
        self.viewports.push((width, height, device_scale_factor));
        Ok(())
    }

    async fn evaluate(&mut self, expression: &str) -> Result<Value> {
        self.evaluated.push(expression.to_string());
        let Some(call) = expression.strip_prefix(PREFIX) else {
            return Ok(json!(true));
        };
        let (method, rest) = call.split_once("(...").unwrap_or((call, "[])"));
        let args: Vec<Value> = serde_json::from_str(rest.strip_suffix(')').unwrap_or("[]"))?;
        self.answer(method, &args)
    }

    async fn screenshot(&mut self, request: ScreenshotRequest) -> Result<Vec<u8>> {
        self.screenshots.push(request);
        if self.fail_screenshot {
            return Err(ConversionError::Rpc {
                method: "Page.captureScreenshot".into(),
                message: "target closed".into(),
            });
        }
        let (width, height) = request
            .clip
            .map_or((960, 540), |clip| (clip.w as u32, clip.h as u32));
        blank_png(width, height)
    }

    async fn pause(&mut self) -> Result<()> {
        self.pauses += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out clones of a template page. Clones share the `closed` flag.
pub struct FakeLauncher {
    pub template: FakePage,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Page = FakePage;

    async fn launch(&self) -> Result<FakePage> {
        Ok(self.template.clone())
    }
}
