use std::net::SocketAddr;
use std::path::PathBuf;

/// Browser user agents rotated across fetch attempts when no override is set.
pub const DEFAULT_USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Lower bound of the randomized sleep before every fetch attempt.
    pub delay_min_ms: u64,
    /// Upper bound (inclusive); always `>= delay_min_ms`.
    pub delay_max_ms: u64,
    /// Bodies with fewer characters than this are treated as failed fetches.
    pub min_body_chars: usize,
    pub user_agents: Vec<String>,
    pub render_enabled: bool,
    pub render_settle_secs: u64,
    /// When set, raw HTML from successful fetches is written here.
    pub debug_html_dir: Option<PathBuf>,
}
