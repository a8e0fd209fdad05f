//! Headless-render fallback seam.
//!
//! A renderer is a capability handed to [`crate::ProfileScraper`] at
//! construction. Without one the scraper runs static-fetch only.

#[cfg(feature = "browser")]
mod chromium;

use async_trait::async_trait;
use socialprobe_core::Platform;

use crate::error::ScraperError;

#[cfg(feature = "browser")]
pub use chromium::ChromiumRenderer;

/// Produces post-script-execution HTML for a URL.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str, platform: Platform) -> Result<String, ScraperError>;
}
