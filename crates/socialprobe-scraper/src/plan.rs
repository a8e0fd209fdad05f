//! Per-platform candidate URL lists.

use socialprobe_core::Platform;

/// Minimum character count for Instagram and Twitter pages; shorter bodies
/// are login walls or bot interstitials.
const STRICT_MIN_CHARS: usize = 1000;

/// How much content a fetched body needs before the search stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentThreshold {
    /// Body must have strictly more than this many characters.
    MoreThan(usize),
    /// Any body the fetcher returned.
    AnyBody,
}

impl ContentThreshold {
    #[must_use]
    pub fn accepts(self, body: &str) -> bool {
        match self {
            ContentThreshold::MoreThan(min) => body.chars().count() > min,
            ContentThreshold::AnyBody => true,
        }
    }

    /// Rendered pages pass at exactly the minimum; only shorter ones fail.
    #[must_use]
    pub fn accepts_rendered(self, html: &str) -> bool {
        match self {
            ContentThreshold::MoreThan(min) => html.chars().count() >= min,
            ContentThreshold::AnyBody => true,
        }
    }
}

/// Ordered fetch strategy for one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub candidates: Vec<String>,
    pub threshold: ContentThreshold,
    /// Single URL handed to the headless renderer when every candidate misses.
    pub render_url: String,
}

/// Builds the plan for `handle`, or `None` for [`Platform::Unknown`].
#[must_use]
pub fn fetch_plan(platform: Platform, handle: &str) -> Option<FetchPlan> {
    let plan = match platform {
        Platform::Instagram => FetchPlan {
            candidates: vec![
                format!("https://www.instagram.com/{handle}/?__a=1&__d=dis"),
                format!("https://www.instagram.com/{handle}/"),
                format!("https://m.instagram.com/{handle}/"),
                format!("https://www.instagram.com/{handle}/?hl=en"),
            ],
            threshold: ContentThreshold::MoreThan(STRICT_MIN_CHARS),
            render_url: format!("https://www.instagram.com/{handle}/"),
        },
        Platform::Twitter => FetchPlan {
            candidates: vec![
                format!("https://mobile.twitter.com/{handle}"),
                format!("https://x.com/{handle}"),
                format!("https://twitter.com/{handle}"),
                format!("https://mobile.twitter.com/{handle}?lang=en"),
            ],
            threshold: ContentThreshold::MoreThan(STRICT_MIN_CHARS),
            render_url: format!("https://twitter.com/{handle}"),
        },
        Platform::Youtube => {
            let channel = handle.trim_start_matches('@');
            FetchPlan {
                candidates: vec![
                    format!("https://m.youtube.com/@{channel}"),
                    format!("https://www.youtube.com/@{channel}"),
                ],
                threshold: ContentThreshold::AnyBody,
                render_url: format!("https://www.youtube.com/@{channel}"),
            }
        }
        Platform::Linkedin => FetchPlan {
            candidates: vec![format!("https://www.linkedin.com/in/{handle}/")],
            threshold: ContentThreshold::AnyBody,
            render_url: format!("https://www.linkedin.com/in/{handle}/"),
        },
        Platform::Unknown => return None,
    };
    Some(plan)
}
