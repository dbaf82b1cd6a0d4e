//! Review extraction through a headless browser.
//!
//! A fresh browser is launched for every call and shut down before the call
//! returns, on success and failure alike.

use super::reviews::{parse_review_page, reviews_url, REVIEW_CONTAINER};
use super::Extractor;
use crate::error::SiftResult;
use crate::renderer::{Launcher, RenderContext, Renderer};
use crate::types::ReviewRecord;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BrowserReviewExtractor {
    launcher: Arc<dyn Launcher>,
    timeout_ms: u64,
}

impl BrowserReviewExtractor {
    pub fn new(launcher: Arc<dyn Launcher>, timeout_ms: u64) -> Self {
        Self {
            launcher,
            timeout_ms,
        }
    }

    async fn render(&self, renderer: &mut dyn Renderer, url: &str) -> SiftResult<String> {
        let mut ctx = renderer.new_context().await?;
        let html = self.load(ctx.as_mut(), url).await;
        if let Err(e) = ctx.close().await {
            tracing::debug!("page close failed: {e}");
        }
        html
    }

    async fn load(&self, ctx: &mut dyn RenderContext, url: &str) -> SiftResult<String> {
        ctx.navigate(url, self.timeout_ms).await?;
        ctx.wait_for_selector(REVIEW_CONTAINER, self.timeout_ms)
            .await?;
        ctx.get_html().await
    }
}

#[async_trait]
impl Extractor for BrowserReviewExtractor {
    fn name(&self) -> &'static str {
        "browser-reviews"
    }

    async fn extract(&self, url: &str) -> SiftResult<Vec<ReviewRecord>> {
        let target = reviews_url(url);
        let mut renderer = self.launcher.launch().await?;
        tracing::info!(url = %target, "rendering reviews page");

        let html = self.render(renderer.as_mut(), &target).await;
        if let Err(e) = renderer.shutdown().await {
            tracing::warn!("browser shutdown failed: {e}");
        }

        Ok(parse_review_page(&html?))
    }
}
