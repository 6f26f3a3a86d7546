//! Browser page access: the driver seam, the helper RPC boundary, page
//! preparation and the optional Chromium backend.

use std::future::Future;
use std::time::Duration;

use crate::errors::{ConversionError, Result};

#[cfg(feature = "chromium")]
pub mod chromium;
pub mod driver;
pub mod prepare;
pub mod rpc;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::{BrowserLauncher, PageDriver, ScreenshotRequest};

/// Bounds a browser round trip. Expiry becomes [`ConversionError::Timeout`].
pub async fn with_timeout<T, F>(operation: &str, limit: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(ConversionError::Timeout {
            operation: operation.to_string(),
            seconds: limit.as_secs(),
        }),
    }
}
