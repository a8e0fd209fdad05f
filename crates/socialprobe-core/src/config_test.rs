use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn expect_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SOCIALPROBE_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.connect_timeout_secs, 10);
    assert_eq!(cfg.delay_min_ms, 1000);
    assert_eq!(cfg.delay_max_ms, 3000);
    assert_eq!(cfg.min_body_chars, 500);
    assert_eq!(cfg.user_agents.len(), DEFAULT_USER_AGENTS.len());
    assert!(cfg.render_enabled);
    assert_eq!(cfg.render_settle_secs, 5);
    assert!(cfg.debug_html_dir.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_BIND_ADDR", "not-a-socket-addr");
    expect_invalid(&map, "SOCIALPROBE_BIND_ADDR");
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_REQUEST_TIMEOUT_SECS", "not-a-number");
    expect_invalid(&map, "SOCIALPROBE_REQUEST_TIMEOUT_SECS");
}

#[test]
fn delay_bounds_override() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_DELAY_MIN_MS", "0");
    map.insert("SOCIALPROBE_DELAY_MAX_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.delay_min_ms, 0);
    assert_eq!(cfg.delay_max_ms, 0);
}

#[test]
fn delay_max_below_min_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_DELAY_MIN_MS", "2000");
    map.insert("SOCIALPROBE_DELAY_MAX_MS", "500");
    expect_invalid(&map, "SOCIALPROBE_DELAY_MAX_MS");
}

#[test]
fn min_body_chars_invalid() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_MIN_BODY_CHARS", "-1");
    expect_invalid(&map, "SOCIALPROBE_MIN_BODY_CHARS");
}

#[test]
fn user_agents_override_splits_on_pipe() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_USER_AGENTS", "agent-a/1.0 (x, y) | agent-b/2.0 |");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agents, vec!["agent-a/1.0 (x, y)", "agent-b/2.0"]);
}

#[test]
fn user_agents_override_blank_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_USER_AGENTS", " | ");
    expect_invalid(&map, "SOCIALPROBE_USER_AGENTS");
}

#[test]
fn render_enabled_accepts_common_spellings() {
    for (raw, expected) in [("false", false), ("0", false), ("OFF", false), ("yes", true)] {
        let mut map = HashMap::new();
        map.insert("SOCIALPROBE_RENDER_ENABLED", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.render_enabled, expected, "raw value {raw}");
    }
}

#[test]
fn render_enabled_invalid() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_RENDER_ENABLED", "maybe");
    expect_invalid(&map, "SOCIALPROBE_RENDER_ENABLED");
}

#[test]
fn debug_html_dir_set_and_blank() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROBE_DEBUG_HTML_DIR", "/tmp/socialprobe-debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.debug_html_dir.as_deref(),
        Some(std::path::Path::new("/tmp/socialprobe-debug"))
    );

    map.insert("SOCIALPROBE_DEBUG_HTML_DIR", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.debug_html_dir.is_none());
}
