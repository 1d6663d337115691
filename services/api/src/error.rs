//! services/api/src/error.rs
//!
//! Defines the primary error type for the web service's startup path.
//! Request-level failures never reach this type: they are turned into the
//! page's error banner by the state store.

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure to build the outbound HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
