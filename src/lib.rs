//! # Storefront
//!
//! A product catalog, a shopping basket and a checkout flow (delivery
//! details, contact details, confirmation) built around an event bus that
//! decouples the application state from its views.
//!
//! ## Architecture
//!
//! The storefront is organized as a workspace with multiple crates:
//!
//! 1. **storefront-core** - Event bus, observable state, application state, checkout stages
//! 2. **storefront-settings** - Configuration loading and validation
//! 3. **storefront-api** - Catalog fetch and order submission
//! 4. **storefront-presenter** - Event wiring between state, views and the API
//! 5. **storefront** - Main binary that integrates all crates

pub mod cli;
pub mod console;

pub use cli::Cli;
pub use console::ConsoleView;

pub use storefront_core::{
    names, AppState, CheckoutStage, Error, EventBus, EventPayload, OrderDraft, OrderField,
    ProductItem, Result, SubscriptionKey,
};

pub use storefront_api::{ApiError, HttpShopApi, MemoryShopApi, ShopApi};

pub use storefront_presenter::{
    BasketView, CardView, FormState, ModalContent, Storefront, StorefrontView,
};

pub use storefront_settings::{default_config_path, ApiSettings, Config, ShopSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
