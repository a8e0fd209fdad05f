use socialprobe_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("short response from {url} ({chars} chars)")]
    ShortBody { url: String, chars: usize },

    #[error("headless render failed for {url}: {reason}")]
    Render { url: String, reason: String },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl From<CoreError> for ScraperError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedPlatform(key) => ScraperError::UnsupportedPlatform(key),
        }
    }
}
