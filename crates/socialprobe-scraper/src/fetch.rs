//! Static HTTP fetch layer.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::{header, Client};
use socialprobe_core::app_config::DEFAULT_USER_AGENTS;
use socialprobe_core::AppConfig;

use crate::error::ScraperError;

/// Source of raw page text for a URL.
///
/// The orchestrator treats every error as "no content from this candidate";
/// implementations should not retry on their own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

/// Randomized sleep taken before every fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolitenessDelay {
    min_ms: u64,
    max_ms: u64,
}

impl PolitenessDelay {
    /// Bounds are inclusive; reversed bounds are swapped.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No sleep at all. Used by tests and one-off tooling.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    fn sample(self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn wait(self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Settings for [`HttpFetcher`], usually derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agents: Vec<String>,
    pub delay: PolitenessDelay,
    pub min_body_chars: usize,
}

impl FetchSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: config.request_timeout_secs,
            connect_timeout_secs: config.connect_timeout_secs,
            user_agents: config.user_agents.clone(),
            delay: PolitenessDelay::new(config.delay_min_ms, config.delay_max_ms),
            min_body_chars: config.min_body_chars,
        }
    }
}

/// `reqwest`-backed [`PageFetcher`] that looks like a desktop browser.
///
/// Each call sleeps the politeness delay, rotates the `User-Agent`, and
/// rejects non-2xx statuses and bodies shorter than `min_body_chars`.
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
    delay: PolitenessDelay,
    min_body_chars: usize,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: FetchSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;

        let user_agents = if settings.user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_owned()).collect()
        } else {
            settings.user_agents
        };

        Ok(Self {
            client,
            user_agents,
            delay: settings.delay,
            min_body_chars: settings.min_body_chars,
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map_or(DEFAULT_USER_AGENTS[0], String::as_str)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.delay.wait().await;

        let user_agent = self.pick_user_agent().to_owned();
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, user_agent)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(header::DNT, "1")
            .header(header::UPGRADE_INSECURE_REQUESTS, "1")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header(header::CACHE_CONTROL, "max-age=0")
            .header(header::REFERER, "https://www.google.com/")
            .header(
                "sec-ch-ua",
                r#""Chromium";v="124", "Google Chrome";v="124", "Not-A.Brand";v="99""#,
            )
            .header("sec-ch-ua-mobile", "?0")
            .header("sec-ch-ua-platform", r#""macOS""#)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let chars = body.chars().count();
        if chars < self.min_body_chars {
            return Err(ScraperError::ShortBody {
                url: url.to_owned(),
                chars,
            });
        }

        tracing::debug!(url, chars, "fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_swaps_reversed_bounds() {
        assert_eq!(PolitenessDelay::new(3000, 1000), PolitenessDelay::new(1000, 3000));
    }

    #[test]
    fn delay_samples_within_bounds() {
        let delay = PolitenessDelay::new(10, 20);
        for _ in 0..50 {
            let d = delay.sample();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn zero_delay_never_sleeps() {
        assert_eq!(PolitenessDelay::none().sample(), Duration::ZERO);
    }

    #[test]
    fn empty_user_agent_pool_falls_back_to_defaults() {
        let fetcher = HttpFetcher::new(FetchSettings {
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
            user_agents: Vec::new(),
            delay: PolitenessDelay::none(),
            min_body_chars: 0,
        })
        .expect("client");
        assert!(DEFAULT_USER_AGENTS.contains(&fetcher.pick_user_agent()));
    }
}
