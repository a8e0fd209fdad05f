//! Raw-HTML dumps for offline inspection of what a fetch actually returned.

use std::path::{Path, PathBuf};

use socialprobe_core::Platform;

/// `debug_{platform}_{username}_{unix_seconds}.html`, platform in lower case.
///
/// Every character of `username` outside `[A-Za-z0-9_@-]` becomes `_`, so the
/// name never contains a path separator or `..`.
#[must_use]
pub fn debug_file_name(platform: Platform, username: &str, unix_secs: i64) -> String {
    let safe: String = username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "debug_{}_{safe}_{unix_secs}.html",
        platform.key().to_ascii_lowercase()
    )
}

/// Writes `html` under `dir`. Failures are logged and swallowed.
///
/// Returns the written path on success. Nothing reads these files back.
pub async fn save_debug_html(
    dir: &Path,
    platform: Platform,
    username: &str,
    html: &str,
) -> Option<PathBuf> {
    let path = dir.join(debug_file_name(
        platform,
        username,
        chrono::Utc::now().timestamp(),
    ));

    match tokio::fs::write(&path, html).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), "saved debug HTML");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to save debug HTML");
            None
        }
    }
}
