//! Profile scrape orchestration: route, fetch, render fallback, extract.

use std::path::PathBuf;
use std::sync::Arc;

use socialprobe_core::{AppConfig, Platform, ProfileResult};

use crate::debug_dump::save_debug_html;
use crate::error::ScraperError;
use crate::extract::{extract_bio, extract_followers, extract_posts};
use crate::fetch::{FetchSettings, HttpFetcher, PageFetcher};
use crate::flags::detect_flags;
use crate::plan::{fetch_plan, FetchPlan};
use crate::render::PageRenderer;
use crate::router::route_url;

/// Result-level error for hosts that match no platform.
pub const UNSUPPORTED_PLATFORM: &str = "Unsupported platform";

#[must_use]
pub fn fetch_failure_message(platform: Platform) -> String {
    format!(
        "Failed to fetch profile. {} has strict anti-scraping measures.",
        platform.display_name()
    )
}

#[must_use]
pub fn extraction_failure_message(platform: Platform) -> String {
    format!(
        "Profile data extraction failed. {}'s modern structure makes automated data collection difficult.",
        platform.display_name()
    )
}

/// Scrapes public profile pages into [`ProfileResult`]s.
///
/// Never fails at the call level for a routable input: fetch and extraction
/// problems come back as a result with `error` set.
pub struct ProfileScraper {
    fetcher: Arc<dyn PageFetcher>,
    renderer: Option<Arc<dyn PageRenderer>>,
    debug_dir: Option<PathBuf>,
}

impl ProfileScraper {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            renderer: None,
            debug_dir: None,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Dump every successfully fetched page into `dir`.
    #[must_use]
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    #[must_use]
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Builds an [`HttpFetcher`]-backed scraper from configuration.
    ///
    /// When rendering is enabled and the `browser` feature is compiled in,
    /// headless Chromium is launched once here. A launch failure is logged
    /// and the scraper runs static-fetch only.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub async fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = HttpFetcher::new(FetchSettings::from_config(config))?;
        let mut scraper = Self::new(Arc::new(fetcher));

        if config.render_enabled {
            if let Some(renderer) = launch_renderer(config.render_settle_secs).await {
                scraper = scraper.with_renderer(renderer);
            }
        }
        if let Some(dir) = &config.debug_html_dir {
            scraper = scraper.with_debug_dir(dir.clone());
        }
        Ok(scraper)
    }

    /// Routes `url` by host and scrapes the handle found in its path.
    ///
    /// Unroutable input produces an `UNKNOWN` result whose `profile_url` is
    /// the input string.
    pub async fn scrape_url(&self, url: &str) -> ProfileResult {
        match route_url(url) {
            Ok(route) => self.scrape_routed(route.platform, &route.username).await,
            Err(e) => {
                tracing::warn!(url, error = %e, "no platform matches URL");
                ProfileResult::failed(Platform::Unknown, "", url, UNSUPPORTED_PLATFORM)
            }
        }
    }

    /// Scrapes `handle` on the platform named by `key` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnsupportedPlatform`] if `key` is not one of
    /// the four supported platform keys.
    pub async fn scrape_profile(
        &self,
        key: &str,
        handle: &str,
    ) -> Result<ProfileResult, ScraperError> {
        let platform: Platform = key.parse()?;
        Ok(self.scrape_routed(platform, handle).await)
    }

    async fn scrape_routed(&self, platform: Platform, handle: &str) -> ProfileResult {
        let Some(plan) = fetch_plan(platform, handle) else {
            return ProfileResult::failed(Platform::Unknown, handle, "", UNSUPPORTED_PLATFORM);
        };
        let profile_url = platform.profile_url(handle);

        tracing::info!(%platform, username = handle, "scraping profile");
        let Some(html) = self.fetch_html(platform, &plan).await else {
            tracing::warn!(%platform, username = handle, "no usable page content");
            return ProfileResult::failed(
                platform,
                handle,
                profile_url,
                fetch_failure_message(platform),
            );
        };

        if let Some(dir) = &self.debug_dir {
            save_debug_html(dir, platform, handle, &html).await;
        }

        extract_profile(platform, handle, profile_url, &html)
    }

    /// Candidates in order, then at most one render of the plan's render URL.
    async fn fetch_html(&self, platform: Platform, plan: &FetchPlan) -> Option<String> {
        for url in &plan.candidates {
            match self.fetcher.fetch(url).await {
                Ok(body) if plan.threshold.accepts(&body) => {
                    tracing::info!(url, chars = body.chars().count(), "got page content");
                    return Some(body);
                }
                Ok(body) => {
                    tracing::debug!(url, chars = body.chars().count(), "page content too short");
                }
                Err(e) => tracing::warn!(url, error = %e, "fetch attempt failed"),
            }
        }

        let renderer = self.renderer.as_ref()?;
        tracing::info!(url = %plan.render_url, %platform, "falling back to headless render");
        match renderer.render(&plan.render_url, platform).await {
            Ok(html) if plan.threshold.accepts_rendered(&html) => {
                tracing::info!(chars = html.chars().count(), "got rendered content");
                Some(html)
            }
            Ok(html) => {
                tracing::warn!(chars = html.chars().count(), "rendered content too short");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "headless render failed");
                None
            }
        }
    }
}

/// Runs the extraction pipeline over fetched page text.
///
/// LinkedIn pages never report a post count. When followers, posts and bio
/// all come back empty the result is downgraded to an extraction failure,
/// keeping the detected flags.
#[must_use]
pub fn extract_profile(
    platform: Platform,
    username: &str,
    profile_url: String,
    html: &str,
) -> ProfileResult {
    let flags = detect_flags(html, platform);
    let followers = extract_followers(html);
    let posts = match platform {
        Platform::Linkedin => None,
        _ => extract_posts(html),
    };
    let bio = extract_bio(html);

    tracing::debug!(%platform, ?followers, ?posts, bio_chars = bio.chars().count(), "extracted fields");

    let mut result = ProfileResult::empty(platform, username, profile_url);
    result.is_private = flags.is_private;
    result.is_verified = flags.is_verified;

    if followers.is_none() && posts.is_none() && bio.is_empty() {
        result.error = Some(extraction_failure_message(platform));
        return result;
    }

    result.followers = followers;
    result.posts = posts;
    result.bio = bio;
    result
}

#[cfg(feature = "browser")]
async fn launch_renderer(settle_secs: u64) -> Option<Arc<dyn PageRenderer>> {
    match crate::render::ChromiumRenderer::launch(settle_secs).await {
        Ok(renderer) => {
            tracing::info!("headless renderer ready");
            Some(Arc::new(renderer))
        }
        Err(e) => {
            tracing::warn!(error = %e, "headless renderer unavailable; static fetch only");
            None
        }
    }
}

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)]
async fn launch_renderer(_settle_secs: u64) -> Option<Arc<dyn PageRenderer>> {
    tracing::info!("built without the browser feature; static fetch only");
    None
}

#[cfg(test)]
#[path = "scraper_test.rs"]
mod tests;
