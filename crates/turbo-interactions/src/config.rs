//! Storefront page configuration.
//!
//! Sources, lowest to highest precedence: compiled defaults, a TOML file
//! embedded by the workload at build time, and an optional JSON document
//! the server renders into the page.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_observability::{LogFormat, LogLevel, StructuredLogger};

use crate::ConfigError;

/// Complete page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Server endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Markup contract.
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Add-to-cart form field names.
    #[serde(default)]
    pub form: FormConfig,

    /// Notification timing.
    #[serde(default)]
    pub flash: FlashConfig,

    /// User-facing notification texts.
    #[serde(default)]
    pub messages: MessageConfig,

    /// Diagnostic output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Layer a partial JSON document over this configuration.
    ///
    /// Objects merge key by key; any other value replaces the base value.
    pub fn with_json_overrides(&self, source: &str) -> Result<Self, ConfigError> {
        let overlay: serde_json::Value = serde_json::from_str(source)?;
        let mut base = serde_json::to_value(self)?;
        merge_values(&mut base, overlay);
        Ok(serde_json::from_value(base)?)
    }
}

fn merge_values(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Server endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for relative paths. Unset means same origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// `GET` endpoint returning `{"count": n}`.
    #[serde(default = "default_cart_count_path")]
    pub cart_count_path: String,

    /// `POST` endpoint accepting the add-to-cart form.
    #[serde(default = "default_cart_add_path")]
    pub cart_add_path: String,
}

fn default_cart_count_path() -> String {
    "/cart/count".to_string()
}

fn default_cart_add_path() -> String {
    "/cart/add".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            cart_count_path: default_cart_count_path(),
            cart_add_path: default_cart_add_path(),
        }
    }
}

/// Class selectors and element ids the templates provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub carousel: String,
    pub carousel_item: String,
    pub cart_counter_id: String,
    pub flash_container_id: String,
    pub add_to_cart_form_id: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            carousel: ".carousel".to_string(),
            carousel_item: ".carousel-item".to_string(),
            cart_counter_id: "cart-counter".to_string(),
            flash_container_id: "flash-messages".to_string(),
            add_to_cart_form_id: "add-to-cart-form".to_string(),
        }
    }
}

/// Field names read from the add-to-cart form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub color_field: String,
    pub size_field: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            color_field: "color".to_string(),
            size_field: "size".to_string(),
        }
    }
}

/// Notification lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Time fully visible before fading, in milliseconds.
    pub visible_ms: u64,
    /// Fade-out duration, in milliseconds.
    pub fade_ms: u64,
    /// Cap on simultaneously displayed notifications. Unset means no cap.
    pub max_visible: Option<usize>,
}

impl FlashConfig {
    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            fade_ms: 500,
            max_visible: None,
        }
    }
}

/// Notification texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Shown when color or size is not selected.
    pub missing_selection: String,
    /// Success text when the server sends none.
    pub added: String,
    /// Failure text when the server sends none.
    pub add_failed: String,
    /// Shown when the add-to-cart request never got a usable reply.
    pub connection_error: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            missing_selection: "Please select a color and a size.".to_string(),
            added: "Product added to cart!".to_string(),
            add_failed: "Could not add the product to the cart.".to_string(),
            connection_error: "Connection error. Please try again.".to_string(),
        }
    }
}

/// Diagnostic output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Apply these settings to `logger`.
    pub fn apply(&self, logger: StructuredLogger) -> StructuredLogger {
        logger.with_min_level(self.level).with_format(self.format)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }
}
