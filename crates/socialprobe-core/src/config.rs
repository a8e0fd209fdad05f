use crate::app_config::{AppConfig, Environment, DEFAULT_USER_AGENTS};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SOCIALPROBE_ENV", "development"))?;

    let bind_addr = or_default("SOCIALPROBE_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SOCIALPROBE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SOCIALPROBE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SOCIALPROBE_REQUEST_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_u64("SOCIALPROBE_CONNECT_TIMEOUT_SECS", "10")?;

    let delay_min_ms = parse_u64("SOCIALPROBE_DELAY_MIN_MS", "1000")?;
    let delay_max_ms = parse_u64("SOCIALPROBE_DELAY_MAX_MS", "3000")?;
    if delay_max_ms < delay_min_ms {
        return Err(invalid(
            "SOCIALPROBE_DELAY_MAX_MS",
            format!("must be >= SOCIALPROBE_DELAY_MIN_MS ({delay_min_ms})"),
        ));
    }

    let min_body_chars = parse_usize("SOCIALPROBE_MIN_BODY_CHARS", "500")?;

    let user_agents = match lookup("SOCIALPROBE_USER_AGENTS") {
        Ok(raw) => {
            let agents: Vec<String> = raw
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if agents.is_empty() {
                return Err(invalid(
                    "SOCIALPROBE_USER_AGENTS",
                    "expected at least one '|'-separated user agent".to_string(),
                ));
            }
            agents
        }
        Err(_) => DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_owned()).collect(),
    };

    let render_enabled = parse_bool(
        "SOCIALPROBE_RENDER_ENABLED",
        &or_default("SOCIALPROBE_RENDER_ENABLED", "true"),
    )?;
    let render_settle_secs = parse_u64("SOCIALPROBE_RENDER_SETTLE_SECS", "5")?;

    let debug_html_dir = lookup("SOCIALPROBE_DEBUG_HTML_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        delay_min_ms,
        delay_max_ms,
        min_body_chars,
        user_agents,
        render_enabled,
        render_settle_secs,
        debug_html_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALPROBE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
