pub mod debug_dump;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod flags;
pub mod plan;
pub mod render;
pub mod router;
pub mod scraper;

pub use error::ScraperError;
pub use fetch::{FetchSettings, HttpFetcher, PageFetcher, PolitenessDelay};
pub use render::PageRenderer;
pub use router::{route_url, Route};
pub use scraper::{extract_profile, ProfileScraper};

#[cfg(feature = "browser")]
pub use render::ChromiumRenderer;
