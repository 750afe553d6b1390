//! Error types for storefront interactions.

use thiserror::Error;
use turbo_data::FetchError;

/// Errors raised while wiring or running page behaviour.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteractionError {
    /// A DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An HTTP request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors that can occur while loading [`StorefrontConfig`](crate::StorefrontConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON source was malformed.
    #[error("Invalid JSON config: {0}")]
    Json(String),

    /// TOML source was malformed.
    #[error("Invalid TOML config: {0}")]
    Toml(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e.to_string())
    }
}
