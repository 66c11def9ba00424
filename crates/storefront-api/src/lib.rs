//! # Storefront API
//!
//! The network side of the storefront: fetching the catalog and placing
//! orders. The presenter only sees the [`ShopApi`] trait; [`HttpShopApi`]
//! talks to the real server and [`MemoryShopApi`] serves a fixed catalog.

pub mod client;
pub mod error;
pub mod memory;

use async_trait::async_trait;
use storefront_core::{OrderConfirmation, OrderDraft, ProductItem};

pub use client::{HttpShopApi, ProductList};
pub use error::{ApiError, ApiResult};
pub use memory::MemoryShopApi;

/// Remote operations the storefront depends on
///
/// Calls are made once each; there is no retry or cancellation.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// Fetch the full catalog
    async fn product_list(&self) -> ApiResult<Vec<ProductItem>>;

    /// Submit an order
    async fn place_order(&self, order: &OrderDraft) -> ApiResult<OrderConfirmation>;
}
