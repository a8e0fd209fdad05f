//! Shared types and configuration for the socialprobe workspace.

pub mod app_config;
pub mod config;
pub mod platform;
pub mod profile;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::{supported_platforms, Platform, PlatformInfo};
pub use profile::ProfileResult;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
