//! Human-readable rendering for terminal output.

use std::fmt::Write as _;

use socialprobe_core::{PlatformInfo, ProfileResult};

/// Bio preview length in the summary block.
const BIO_PREVIEW_CHARS: usize = 100;

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn count_or_na(n: Option<u64>) -> String {
    n.map_or_else(|| "N/A".to_owned(), group_thousands)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn format_profile(result: &ProfileResult) -> String {
    let mut out = String::new();
    if let Some(error) = &result.error {
        let _ = writeln!(out, "❌ Error: {error}");
        return out;
    }

    let bio = if result.bio.is_empty() {
        "N/A".to_owned()
    } else {
        let preview: String = result.bio.chars().take(BIO_PREVIEW_CHARS).collect();
        format!("{preview}...")
    };

    let _ = writeln!(out, "✅ Platform: {}", result.platform);
    let _ = writeln!(out, "   Username: {}", result.username);
    let _ = writeln!(out, "   Followers: {}", count_or_na(result.followers));
    let _ = writeln!(out, "   Posts: {}", count_or_na(result.posts));
    let _ = writeln!(out, "   Bio: {bio}");
    let _ = writeln!(out, "   Verified: {}", yes_no(result.is_verified));
    let _ = writeln!(out, "   Private: {}", yes_no(result.is_private));
    let _ = writeln!(out, "   URL: {}", result.profile_url);
    out
}

pub fn format_platforms(platforms: &[PlatformInfo]) -> String {
    let mut out = String::new();
    for p in platforms {
        let _ = writeln!(out, "{:<10} {:<10} {}", p.key.key(), p.name, p.url_format);
    }
    out
}
