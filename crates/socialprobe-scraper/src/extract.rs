//! Ordered pattern tables for pulling profile fields out of raw page text.
//!
//! Each table is evaluated strictly top to bottom. The first pattern that
//! matches anywhere in the text, and whose capture survives post-processing,
//! decides the value; later patterns are never consulted. Reordering a table
//! therefore changes behaviour, even when a later pattern would be "more
//! precise" for a given page.

use std::sync::LazyLock;

use regex::Regex;

/// Bios at or below this many characters are treated as noise.
const MIN_BIO_CHARS: usize = 5;
/// Bios are cut to this many characters.
pub const MAX_BIO_CHARS: usize = 200;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid extraction regex"))
        .collect()
}

// Instagram JSON first, then generic JSON keys, then human-readable text.
static FOLLOWER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#""edge_followed_by"\s*:\s*\{\s*"count"\s*:\s*([0-9]+)"#,
        r#""edge_followed_by"\s*:\s*\{\s*"count"\s*:\s*"?([0-9][0-9,.]*)"?"#,
        r#""followers"\s*:\s*"?([0-9][0-9,.]*)"?"#,
        r#""follower_count"\s*:\s*([0-9]+)"#,
        r#""followers_count"\s*:\s*([0-9]+)"#,
        r#""subscriberCount"\s*:\s*"?([0-9][0-9,.]*)"?"#,
        r#"aria-label="([0-9][0-9,.]*\s*[kmbt]?) followers""#,
        r#"data-followers="([0-9,.kmbt]+)""#,
        r"([0-9][0-9,.]*\s*[kmbt]?)(?:\s+followers|\s+subscribers)",
        r"([0-9,.]+)\s*[kmbt]?\s*followers",
        r"([0-9,.]+)\s*[kmbt]?\s*subscribers",
        r#""followers_count"\s*:\s*"?([0-9][0-9,.]*)"?"#,
        r"([0-9,.]+)\s*[kmbt]?\s*followers?",
        r"([0-9,.]+)\s*[kmbt]?\s*subscribers?",
        r"([0-9,.]+)\s*[kmbt]?\s*members?",
    ])
});

static POST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#""edge_owner_to_timeline_media"\s*:\s*\{\s*"count"\s*:\s*([0-9]+)"#,
        r#""media_count"\s*:\s*([0-9]+)"#,
        r#""posts_count"\s*:\s*([0-9]+)"#,
        r#""statuses_count"\s*:\s*([0-9]+)"#,
        r#""tweets_count"\s*:\s*([0-9]+)"#,
        r"([0-9,.]+)\s*posts?",
        r"([0-9,.]+)\s*videos?",
        r"([0-9,.]+)\s*media",
    ])
});

static BIO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#""biography"\s*:\s*"([^"]+)""#,
        r#""biography"\s*:\s*"?([^"]+)"?"#,
        r#""description"\s*:\s*"([^"]+)""#,
        r#""description"\s*:\s*"?([^"]+)"?"#,
        r#"<meta\s+name="description"\s+content="([^"]+)""#,
        r"<title>([^<]+)</title>",
        r#""bio"\s*:\s*"([^"]+)""#,
        r#""about"\s*:\s*"([^"]+)""#,
    ])
});

/// Runs `patterns` in order, feeding the first capture of each pattern's
/// first match through `accept`. Returns the first accepted value.
fn first_accepted<T>(
    patterns: &[Regex],
    text: &str,
    mut accept: impl FnMut(&str) -> Option<T>,
) -> Option<T> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| accept(m.as_str()))
    })
}

/// Follower / subscriber count, or `None` when no pattern yields a number.
#[must_use]
pub fn extract_followers(text: &str) -> Option<u64> {
    first_accepted(&FOLLOWER_PATTERNS, text, parse_count)
}

/// Post / media count. Plain integers only; no magnitude suffixes.
#[must_use]
pub fn extract_posts(text: &str) -> Option<u64> {
    first_accepted(&POST_PATTERNS, text, |raw| {
        raw.replace(',', "").parse::<u64>().ok()
    })
}

/// Profile bio, trimmed and truncated, or the empty string when none is found.
#[must_use]
pub fn extract_bio(text: &str) -> String {
    first_accepted(&BIO_PATTERNS, text, |raw| {
        let bio = raw.trim();
        (bio.chars().count() > MIN_BIO_CHARS).then(|| bio.chars().take(MAX_BIO_CHARS).collect())
    })
    .unwrap_or_default()
}

/// Parses a displayed count such as `"45,231"`, `"1.2M"` or `"45.2 k"`.
///
/// With a trailing K/M/B/T suffix the number is read as a decimal, so
/// `"1.5K"` is 1 500. Without one, both `,` and `.` are treated as thousands
/// separators, so `"1.234"` is 1 234.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let multiplier = match cleaned.chars().last()?.to_ascii_uppercase() {
        'K' => Some(1e3),
        'M' => Some(1e6),
        'B' => Some(1e9),
        'T' => Some(1e12),
        _ => None,
    };

    match multiplier {
        Some(multiplier) => {
            let number = &cleaned[..cleaned.len() - 1];
            let value = number.parse::<f64>().ok()? * multiplier;
            to_count(value)
        }
        None => cleaned.replace('.', "").parse::<u64>().ok(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn to_count(value: f64) -> Option<u64> {
    let rounded = value.round();
    (rounded.is_finite() && rounded >= 0.0 && rounded <= u64::MAX as f64).then(|| rounded as u64)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
