use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Scraped view of one public profile.
///
/// Every field is always present in the serialized shape. Numeric fields use
/// `None` for "not found"; `bio` uses the empty string instead. When `error`
/// is set, callers must treat the remaining fields as unreliable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub platform: Platform,
    pub username: String,
    pub followers: Option<u64>,
    /// No platform source yields this; kept for shape compatibility.
    pub following: Option<u64>,
    pub posts: Option<u64>,
    pub bio: String,
    pub profile_url: String,
    pub is_private: bool,
    pub is_verified: bool,
    /// Reserved; nothing populates it yet.
    pub profile_picture: String,
    pub error: Option<String>,
}

impl ProfileResult {
    /// An empty result for `platform`/`username` with no error attached.
    #[must_use]
    pub fn empty(platform: Platform, username: &str, profile_url: impl Into<String>) -> Self {
        Self {
            platform,
            username: username.to_owned(),
            followers: None,
            following: None,
            posts: None,
            bio: String::new(),
            profile_url: profile_url.into(),
            is_private: false,
            is_verified: false,
            profile_picture: String::new(),
            error: None,
        }
    }

    /// A failure result: every extractable field absent, `error` set.
    #[must_use]
    pub fn failed(
        platform: Platform,
        username: &str,
        profile_url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(platform, username, profile_url)
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
