//! HTTP clip download
//!
//! Runs on the resource's worker thread. A small single-threaded tokio runtime
//! drives reqwest, and the stop flag is checked between body chunks so a
//! released resource stops downloading promptly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{AudioError, Result};

/// Download a clip
///
/// Returns `Ok(None)` if `stop` was raised before the body was complete.
///
/// # Errors
/// Returns an error on connection failure, timeout, or a non-success status.
pub fn fetch_clip(url: &Url, timeout: Duration, stop: &AtomicBool) -> Result<Option<Vec<u8>>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AudioError::Network(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(fetch_async(url, timeout, stop))
}

async fn fetch_async(url: &Url, timeout: Duration, stop: &AtomicBool) -> Result<Option<Vec<u8>>> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let mut response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::HttpStatus(status.as_u16()));
    }

    let mut body = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    while let Some(chunk) = response.chunk().await? {
        if stop.load(Ordering::Relaxed) {
            debug!(url = %url, "Download abandoned");
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }

    debug!(url = %url, bytes = body.len(), "Clip downloaded");
    Ok(Some(body))
}
