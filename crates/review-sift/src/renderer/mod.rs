//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Launcher`, `Renderer` and `RenderContext` traits that
//! abstract over the browser engine (currently Chromium via chromiumoxide).

pub mod chromium;

use crate::error::SiftResult;
use async_trait::async_trait;

/// Starts a browser engine on demand.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self) -> SiftResult<Box<dyn Renderer>>;
}

/// A running browser engine that can create rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new browser context (tab).
    async fn new_context(&mut self) -> SiftResult<Box<dyn RenderContext>>;
    /// Shut down the browser engine and reap its process.
    async fn shutdown(self: Box<Self>) -> SiftResult<()>;
}

/// A single browser context (tab) for rendering pages.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> SiftResult<()>;
    /// Wait until an element matching `selector` exists.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> SiftResult<()>;
    /// Get the full page HTML.
    async fn get_html(&self) -> SiftResult<String>;
    /// Close this context.
    async fn close(self: Box<Self>) -> SiftResult<()>;
}
