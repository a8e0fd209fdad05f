//! Privacy / verification flags from raw marker-phrase presence.
//!
//! This is a case-insensitive substring test over the whole document, not a
//! structural parse. Page chrome that happens to say "verified" or "private"
//! (footers, help links) sets the flag too.

use socialprobe_core::Platform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFlags {
    pub is_private: bool,
    pub is_verified: bool,
}

const INSTAGRAM_PRIVATE: &[&str] = &["private", "this account is private", "content is private"];
const TWITTER_PRIVATE: &[&str] = &["protected", "this account is protected", "tweets are protected"];
const BADGE_VERIFIED: &[&str] = &["verified", "✓", "checkmark", "blue badge"];
const TWITTER_VERIFIED: &[&str] = &["verified", "✓", "checkmark", "blue badge", "blue checkmark"];
const YOUTUBE_VERIFIED: &[&str] = &["verified"];
const NO_MARKERS: &[&str] = &[];

fn markers(platform: Platform) -> (&'static [&'static str], &'static [&'static str]) {
    match platform {
        Platform::Instagram => (INSTAGRAM_PRIVATE, BADGE_VERIFIED),
        Platform::Twitter => (TWITTER_PRIVATE, TWITTER_VERIFIED),
        Platform::Youtube => (NO_MARKERS, YOUTUBE_VERIFIED),
        Platform::Linkedin | Platform::Unknown => (NO_MARKERS, NO_MARKERS),
    }
}

#[must_use]
pub fn detect_flags(text: &str, platform: Platform) -> ProfileFlags {
    let (private, verified) = markers(platform);
    let lowered = text.to_lowercase();
    let any = |set: &[&str]| set.iter().any(|m| lowered.contains(m));

    ProfileFlags {
        is_private: any(private),
        is_verified: any(verified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_substring_anywhere_sets_flag() {
        let html = "<footer>Learn how verified badges work</footer>";
        assert!(detect_flags(html, Platform::Instagram).is_verified);
        assert!(detect_flags(html, Platform::Twitter).is_verified);
        assert!(detect_flags(html, Platform::Youtube).is_verified);
    }

    #[test]
    fn markers_are_case_insensitive() {
        let flags = detect_flags("This Account Is PRIVATE", Platform::Instagram);
        assert!(flags.is_private);
        assert!(!flags.is_verified);
    }

    #[test]
    fn check_glyph_marks_verified() {
        assert!(detect_flags("nasa ✓", Platform::Instagram).is_verified);
    }

    #[test]
    fn twitter_uses_protected_not_private() {
        assert!(!detect_flags("private browsing", Platform::Twitter).is_private);
        assert!(detect_flags("These Tweets are protected", Platform::Twitter).is_private);
    }

    #[test]
    fn youtube_is_never_private() {
        assert!(!detect_flags("private protected", Platform::Youtube).is_private);
    }

    #[test]
    fn linkedin_never_sets_flags() {
        let flags = detect_flags("private verified ✓", Platform::Linkedin);
        assert_eq!(flags, ProfileFlags::default());
    }
}
