//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. The completion API key is never read from
//! here: it is supplied by the user through the form.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_PLAN_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub completion_url: String,
    pub plan_model: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            plan_model: DEFAULT_PLAN_MODEL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(value) => value.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(value) => value.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", value),
                )
            })?,
            None => defaults.log_level,
        };

        let completion_url = lookup("COMPLETION_URL").unwrap_or(defaults.completion_url);
        if !(completion_url.starts_with("http://") || completion_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "COMPLETION_URL".to_string(),
                format!("'{}' is not an http(s) URL", completion_url),
            ));
        }

        let plan_model = lookup("PLAN_MODEL").unwrap_or(defaults.plan_model);
        if plan_model.trim().is_empty() {
            return Err(ConfigError::MissingVar("PLAN_MODEL".to_string()));
        }

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            bind_address,
            log_level,
            completion_url,
            plan_model,
            max_upload_bytes,
        })
    }
}
