//! Chromium-based renderer using chromiumoxide.

use super::{Launcher, RenderContext, Renderer};
use crate::error::{SiftError, SiftResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

const POLL_INTERVAL_MS: u64 = 250;

/// Find the Chromium binary path.
pub fn find_chromium(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    // 1. Configured path
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.clone());
        }
    }

    // 2. ~/.review-sift/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".review-sift/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".review-sift/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".review-sift/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".review-sift/chromium/chrome-linux64/chrome"),
                home.join(".review-sift/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Launches a fresh headless Chromium per call.
pub struct ChromiumLauncher {
    pub chrome_path: Option<PathBuf>,
    pub user_agent: String,
}

#[async_trait]
impl Launcher for ChromiumLauncher {
    async fn launch(&self) -> SiftResult<Box<dyn Renderer>> {
        let chrome_path = find_chromium(self.chrome_path.as_ref()).ok_or_else(|| {
            SiftError::Browser(
                "Chromium not found. Set REVIEW_SIFT_CHROMIUM_PATH or install Chrome.".into(),
            )
        })?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg(format!("--user-agent={}", self.user_agent))
            .build()
            .map_err(|e| SiftError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SiftError::Browser(format!("failed to launch Chromium: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        tracing::debug!("Chromium launched");
        Ok(Box::new(ChromiumRenderer {
            browser,
            handler_task,
        }))
    }
}

/// A running Chromium process.
pub struct ChromiumRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&mut self) -> SiftResult<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SiftError::Browser(format!("failed to create new page: {e}")))?;

        Ok(Box::new(ChromiumContext { page }))
    }

    async fn shutdown(self: Box<Self>) -> SiftResult<()> {
        let mut this = *self;
        let closed = this.browser.close().await;
        let _ = this.browser.wait().await;
        this.handler_task.abort();
        tracing::debug!("Chromium closed");
        closed
            .map(|_| ())
            .map_err(|e| SiftError::Browser(format!("failed to close Chromium: {e}")))
    }
}

/// A single Chromium page context.
pub struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> SiftResult<()> {
        let result =
            tokio::time::timeout(Duration::from_millis(timeout_ms), self.page.goto(url)).await;

        match result {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(SiftError::Browser(format!("navigation failed: {e}"))),
            Err(_) => Err(SiftError::Timeout(timeout_ms)),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> SiftResult<()> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
        };
        tokio::time::timeout(Duration::from_millis(timeout_ms), poll)
            .await
            .map_err(|_| SiftError::Timeout(timeout_ms))
    }

    async fn get_html(&self) -> SiftResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| SiftError::Browser(format!("failed to get HTML: {e}")))
    }

    async fn close(self: Box<Self>) -> SiftResult<()> {
        self.page
            .close()
            .await
            .map_err(|e| SiftError::Browser(format!("failed to close page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_chromium_ignores_missing_explicit_path() {
        let bogus = PathBuf::from("/definitely/not/a/chrome");
        if let Some(found) = find_chromium(Some(&bogus)) {
            assert_ne!(found, bogus);
        }
    }

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn test_chromium_navigate_and_wait() {
        let launcher = ChromiumLauncher {
            chrome_path: None,
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
        };
        let mut renderer = launcher.launch().await.expect("failed to launch");
        let mut ctx = renderer
            .new_context()
            .await
            .expect("failed to create context");

        ctx.navigate(
            "data:text/html,<div class='review-container'><div class='text'>Hi</div></div>",
            10000,
        )
        .await
        .expect("navigation failed");
        ctx.wait_for_selector("div.review-container", 5000)
            .await
            .expect("selector never appeared");

        let html = ctx.get_html().await.expect("get_html failed");
        assert!(html.contains("review-container"));

        ctx.close().await.expect("close failed");
        renderer.shutdown().await.expect("shutdown failed");
    }
}
