use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Social platforms the scraper knows how to route.
///
/// `Unknown` only ever appears on results produced for URLs whose host matched
/// none of the supported domains; it is never accepted as an input key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Instagram,
    Twitter,
    Youtube,
    Linkedin,
    Unknown,
}

/// Descriptor returned by the platform listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub name: &'static str,
    pub key: Platform,
    pub url_format: &'static str,
    pub supported: bool,
}

const SUPPORTED: [PlatformInfo; 4] = [
    PlatformInfo {
        name: "Instagram",
        key: Platform::Instagram,
        url_format: "https://instagram.com/username",
        supported: true,
    },
    PlatformInfo {
        name: "Twitter/X",
        key: Platform::Twitter,
        url_format: "https://twitter.com/username",
        supported: true,
    },
    PlatformInfo {
        name: "YouTube",
        key: Platform::Youtube,
        url_format: "https://youtube.com/@username",
        supported: true,
    },
    PlatformInfo {
        name: "LinkedIn",
        key: Platform::Linkedin,
        url_format: "https://linkedin.com/in/username",
        supported: true,
    },
];

/// The four scrapeable platforms, in display order.
#[must_use]
pub fn supported_platforms() -> &'static [PlatformInfo] {
    &SUPPORTED
}

impl Platform {
    /// Upper-case wire key, e.g. `"INSTAGRAM"`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Platform::Instagram => "INSTAGRAM",
            Platform::Twitter => "TWITTER",
            Platform::Youtube => "YOUTUBE",
            Platform::Linkedin => "LINKEDIN",
            Platform::Unknown => "UNKNOWN",
        }
    }

    /// Human-facing name used in error messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter/X",
            Platform::Youtube => "YouTube",
            Platform::Linkedin => "LinkedIn",
            Platform::Unknown => "Unknown",
        }
    }

    /// Canonical public profile URL for `handle`.
    ///
    /// YouTube handles may arrive with or without their leading `@`; the
    /// result never doubles it. `Unknown` has no canonical form and yields an
    /// empty string.
    #[must_use]
    pub fn profile_url(self, handle: &str) -> String {
        match self {
            Platform::Instagram => format!("https://instagram.com/{handle}"),
            Platform::Twitter => format!("https://twitter.com/{handle}"),
            Platform::Youtube => {
                format!("https://youtube.com/@{}", handle.trim_start_matches('@'))
            }
            Platform::Linkedin => format!("https://www.linkedin.com/in/{handle}/"),
            Platform::Unknown => String::new(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    /// Parses a platform key case-insensitively. `UNKNOWN` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INSTAGRAM" => Ok(Platform::Instagram),
            "TWITTER" => Ok(Platform::Twitter),
            "YOUTUBE" => Ok(Platform::Youtube),
            "LINKEDIN" => Ok(Platform::Linkedin),
            _ => Err(CoreError::UnsupportedPlatform(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("instagram".parse::<Platform>(), Ok(Platform::Instagram));
        assert_eq!("Twitter".parse::<Platform>(), Ok(Platform::Twitter));
        assert_eq!("YOUTUBE".parse::<Platform>(), Ok(Platform::Youtube));
        assert_eq!(" linkedin ".parse::<Platform>(), Ok(Platform::Linkedin));
    }

    #[test]
    fn rejects_unknown_and_unsupported_keys() {
        assert!(matches!(
            "unknown".parse::<Platform>(),
            Err(CoreError::UnsupportedPlatform(_))
        ));
        assert!(matches!(
            "tiktok".parse::<Platform>(),
            Err(CoreError::UnsupportedPlatform(ref k)) if k == "tiktok"
        ));
    }

    #[test]
    fn serializes_as_upper_case_key() {
        let json = serde_json::to_string(&Platform::Youtube).expect("serialize");
        assert_eq!(json, "\"YOUTUBE\"");
        assert_eq!(Platform::Linkedin.to_string(), "LINKEDIN");
    }

    #[test]
    fn youtube_profile_url_does_not_double_at_sign() {
        assert_eq!(
            Platform::Youtube.profile_url("@MrBeast"),
            "https://youtube.com/@MrBeast"
        );
        assert_eq!(
            Platform::Youtube.profile_url("MrBeast"),
            "https://youtube.com/@MrBeast"
        );
    }

    #[test]
    fn canonical_profile_urls() {
        assert_eq!(
            Platform::Instagram.profile_url("nasa"),
            "https://instagram.com/nasa"
        );
        assert_eq!(
            Platform::Twitter.profile_url("nasa"),
            "https://twitter.com/nasa"
        );
        assert_eq!(
            Platform::Linkedin.profile_url("williamhgates"),
            "https://www.linkedin.com/in/williamhgates/"
        );
        assert!(Platform::Unknown.profile_url("x").is_empty());
    }

    #[test]
    fn supported_platforms_lists_four_in_order() {
        let keys: Vec<Platform> = supported_platforms().iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![
                Platform::Instagram,
                Platform::Twitter,
                Platform::Youtube,
                Platform::Linkedin
            ]
        );
        assert!(supported_platforms().iter().all(|p| p.supported));
    }
}
