use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use socialprobe_core::Platform;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PageRenderer;
use crate::error::ScraperError;

const RENDER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const BODY_WAIT: Duration = Duration::from_secs(15);
const FOLLOWER_SELECTOR: &str = "a[href*='followers'], [aria-label*='followers']";

/// Headless Chromium driven over CDP.
///
/// The browser is launched once and reused; each render opens and closes its
/// own page.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
    settle: Duration,
}

impl ChromiumRenderer {
    /// Launches headless Chromium.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Render`] if the config is rejected or the
    /// browser process cannot be started.
    pub async fn launch(settle_secs: u64) -> Result<Self, ScraperError> {
        let launch_err = |reason: String| ScraperError::Render {
            url: "about:blank".to_owned(),
            reason,
        };

        let config = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--window-size=1920,1080")
            .arg(format!("--user-agent={RENDER_USER_AGENT}"))
            .build()
            .map_err(launch_err)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| launch_err(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("headless renderer launched");
        Ok(Self {
            browser,
            handler,
            settle: Duration::from_secs(settle_secs),
        })
    }

    async fn render_page(&self, page: &Page, platform: Platform) -> Result<String, String> {
        tokio::time::sleep(self.settle).await;

        if matches!(platform, Platform::Instagram | Platform::Twitter) {
            match tokio::time::timeout(BODY_WAIT, page.find_element("body")).await {
                Ok(Ok(_)) => debug!(%platform, "body element present"),
                Ok(Err(e)) => warn!(%platform, error = %e, "body element not found"),
                Err(_) => warn!(%platform, "timed out waiting for body element"),
            }
            match page.find_elements(FOLLOWER_SELECTOR).await {
                Ok(found) => debug!(%platform, count = found.len(), "follower elements on page"),
                Err(e) => debug!(%platform, error = %e, "follower element probe failed"),
            }
        }

        page.content().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &str, platform: Platform) -> Result<String, ScraperError> {
        info!(url, %platform, "rendering with headless browser");
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| ScraperError::Render {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        let result = self.render_page(&page, platform).await;
        if let Err(e) = page.close().await {
            debug!(url, error = %e, "failed to close render page");
        }

        let html = result.map_err(|reason| ScraperError::Render {
            url: url.to_owned(),
            reason,
        })?;
        info!(url, chars = html.chars().count(), "rendered page");
        Ok(html)
    }
}

impl Drop for ChromiumRenderer {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
