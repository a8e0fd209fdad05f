//! Maps a profile URL to a platform and handle.

use reqwest::Url;
use socialprobe_core::Platform;

use crate::error::ScraperError;

/// Where a profile URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub platform: Platform,
    pub username: String,
}

/// Resolves `raw` to a [`Route`].
///
/// The host is matched by substring, so any host containing `x.com` routes
/// to Twitter. Handles are not validated; a malformed one simply fails at
/// fetch time.
///
/// # Errors
///
/// Returns [`ScraperError::UnsupportedPlatform`] if the host matches no
/// platform. Input without a scheme or host (`instagram.com/nasa`) has no
/// host to match and is rejected the same way.
pub fn route_url(raw: &str) -> Result<Route, ScraperError> {
    let unsupported = || ScraperError::UnsupportedPlatform(raw.to_owned());
    let url = Url::parse(raw.trim()).map_err(|_| unsupported())?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(unsupported)?
        .to_ascii_lowercase();
    let path = url.path().trim_matches('/');

    let platform = platform_for_host(&host)
        .ok_or_else(|| ScraperError::UnsupportedPlatform(host.clone()))?;

    let username = match platform {
        Platform::Instagram | Platform::Twitter => first_segment(path),
        _ => second_segment_or_path(path),
    };

    Ok(Route {
        platform,
        username: username.to_owned(),
    })
}

fn platform_for_host(host: &str) -> Option<Platform> {
    if host.contains("instagram.com") {
        Some(Platform::Instagram)
    } else if host.contains("twitter.com") || host.contains("x.com") {
        Some(Platform::Twitter)
    } else if host.contains("youtube.com") {
        Some(Platform::Youtube)
    } else if host.contains("linkedin.com") {
        Some(Platform::Linkedin)
    } else {
        None
    }
}

fn first_segment(path: &str) -> &str {
    path.split('/').next().unwrap_or_default()
}

/// `/in/{handle}` and `/c/{handle}` style paths; a single segment is taken whole.
fn second_segment_or_path(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or(path)
}
