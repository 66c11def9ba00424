//! Configuration for the storefront
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files, picked by extension.
//!
//! Configuration is organized into sections:
//! - API settings (server base URL, request timeout)
//! - Shop display labels (currency, priceless products, empty basket)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SettingsError, SettingsResult};

/// Environment variable overriding [`ApiSettings::base_url`]
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Environment variable overriding [`ApiSettings::timeout_ms`]
pub const API_TIMEOUT_ENV: &str = "STOREFRONT_API_TIMEOUT_MS";

/// Shop API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL the `/product` and `/order` paths are appended to
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://larek-api.nomoreparties.co/api/weblarek".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ApiSettings {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Labels used when presenting products and the basket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// Unit appended to prices
    pub currency_label: String,
    /// Shown instead of a price for products that are not for sale
    pub priceless_label: String,
    /// Shown in place of basket lines when the basket is empty
    pub empty_basket_label: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            currency_label: "synapses".to_string(),
            priceless_label: "Priceless".to_string(),
            empty_basket_label: "Basket is empty".to_string(),
        }
    }
}

impl ShopSettings {
    /// Display text for a price
    ///
    /// Zero and missing prices both read as priceless.
    pub fn format_price(&self, price: Option<u64>) -> String {
        match price {
            Some(amount) if amount > 0 => format!("{} {}", amount, self.currency_label),
            _ => self.priceless_label.clone(),
        }
    }

    /// Display text for an amount that is always shown as a number
    pub fn format_amount(&self, amount: u64) -> String {
        format!("{} {}", amount, self.currency_label)
    }
}

/// Complete storefront configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API connection
    pub api: ApiSettings,
    /// Display labels
    pub shop: ShopSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `STOREFRONT_API_URL` and `STOREFRONT_API_TIMEOUT_MS` if set
    pub fn apply_env_overrides(&mut self) -> SettingsResult<()> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var(API_TIMEOUT_ENV) {
            self.api.timeout_ms = timeout
                .parse()
                .map_err(|_| SettingsError::invalid(API_TIMEOUT_ENV, "must be a whole number"))?;
        }
        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(SettingsError::invalid("api.base_url", "must not be empty"));
        }

        url::Url::parse(&self.api.base_url)
            .map_err(|e| SettingsError::invalid("api.base_url", e.to_string()))?;

        if self.api.timeout_ms == 0 {
            return Err(SettingsError::invalid("api.timeout_ms", "must be > 0"));
        }

        if self.shop.currency_label.trim().is_empty() {
            return Err(SettingsError::invalid("shop.currency_label", "must not be empty"));
        }

        Ok(())
    }
}

/// Default location of the config file in the platform config directory
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("storefront").join("config.toml"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".to_string()))
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
