use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use storefront::{
    init_logging, Cli, Config, ConsoleView, EventBus, HttpShopApi, Storefront, BUILD_DATE,
    VERSION,
};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    info!("Storefront {} (built {})", VERSION, BUILD_DATE);

    let path = match cli.config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let mut config = match &path {
        Some(path) => Config::load_or_default(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env_overrides()?;
    cli.apply(&mut config)?;
    info!("Using shop API at {}", config.api.base_url);

    let api = HttpShopApi::new(&config.api)?;
    let view = Rc::new(ConsoleView::new());
    let storefront = Storefront::new(EventBus::new(), Rc::new(api), view, config.shop.clone())?;

    storefront.request_catalog();
    storefront.process_requests().await;

    info!(
        "{} products in the catalog, {} in the basket",
        storefront.state().catalog().len(),
        storefront.state().basket_amount()
    );

    Ok(())
}
