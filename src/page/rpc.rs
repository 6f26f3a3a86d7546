//! The message-passing boundary with the in-page helper. Each call
//! serializes its arguments to JSON, evaluates `window.__h2p.<method>(...)`
//! in the page and deserializes the reply. No closures or references cross
//! the boundary.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Timeouts;
use crate::errors::{ConversionError, Result};
use crate::extract::snapshot::{DomSnapshot, PxRect};
use crate::page::driver::PageDriver;
use crate::page::with_timeout;

/// Source of the helper, installed by page preparation.
pub const HELPER_SCRIPT: &str = include_str!("assets/helpers.js");
/// Stylesheet normalizing page margins before measurement.
pub const PREPARE_CSS: &str = include_str!("assets/prepare.css");

const NAMESPACE: &str = "window.__h2p";

/// Body size as reported by the helper's `bodyMetrics`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub width: f64,
    pub height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoxReply {
    Found(PxRect),
    #[allow(dead_code)]
    Missing { missing: bool },
}

/// Builds the expression for one helper call.
pub fn expression(method: &str, args: &[Value]) -> Result<String> {
    let encoded = serde_json::to_string(args)?;
    Ok(format!("{NAMESPACE}.{method}(...{encoded})"))
}

pub async fn call<T, P>(page: &mut P, timeouts: &Timeouts, method: &str, args: &[Value]) -> Result<T>
where
    T: DeserializeOwned,
    P: PageDriver + ?Sized,
{
    let expression = expression(method, args)?;
    let reply = with_timeout(
        &format!("evaluating {method}"),
        timeouts.evaluation,
        page.evaluate(&expression),
    )
    .await?;
    serde_json::from_value(reply).map_err(|err| ConversionError::Rpc {
        method: method.to_string(),
        message: err.to_string(),
    })
}

/// Runs the helper's `init` hook; returns the number of stamped nodes.
pub async fn init<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts) -> Result<u64> {
    call(page, timeouts, "init", &[]).await
}

pub async fn body_metrics<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts) -> Result<BodyMetrics> {
    call(page, timeouts, "bodyMetrics", &[]).await
}

pub async fn snapshot<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts) -> Result<DomSnapshot> {
    call(page, timeouts, "snapshot", &[]).await
}

pub async fn count<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts, selector: &str) -> Result<u64> {
    call(page, timeouts, "count", &[Value::from(selector)]).await
}

/// Page-space box of the first element matching `selector`.
pub async fn element_box<P: PageDriver + ?Sized>(
    page: &mut P,
    timeouts: &Timeouts,
    selector: &str,
) -> Result<Option<PxRect>> {
    let reply: BoxReply = call(page, timeouts, "box", &[Value::from(selector)]).await?;
    Ok(match reply {
        BoxReply::Found(rect) => Some(rect),
        BoxReply::Missing { .. } => None,
    })
}

/// Installs (or replaces) the page-global isolation stylesheet.
pub async fn push_style<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts, css: &str) -> Result<()> {
    let _: bool = call(page, timeouts, "pushStyle", &[Value::from(css)]).await?;
    Ok(())
}

pub async fn pop_style<P: PageDriver + ?Sized>(page: &mut P, timeouts: &Timeouts) -> Result<()> {
    let _: bool = call(page, timeouts, "popStyle", &[]).await?;
    Ok(())
}
