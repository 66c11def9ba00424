//! Storefront Settings Crate
//!
//! Handles application configuration: the shop API location and the labels
//! used when presenting prices and the basket.

pub mod config;
pub mod error;

pub use config::{default_config_path, ApiSettings, Config, ShopSettings, API_TIMEOUT_ENV, API_URL_ENV};
pub use error::{SettingsError, SettingsResult};
