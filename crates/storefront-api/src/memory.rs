//! In-memory shop API for offline use and tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use storefront_core::{OrderConfirmation, OrderDraft, ProductItem};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::ShopApi;

/// Shop API backed by a fixed product list
///
/// Orders are checked the way the server checks them: every id must be a
/// priced product and the total must equal their sum.
#[derive(Debug, Default)]
pub struct MemoryShopApi {
    products: Mutex<Vec<ProductItem>>,
    orders: Mutex<Vec<OrderDraft>>,
    catalog_failure: Mutex<Option<String>>,
    order_failure: Mutex<Option<String>>,
}

impl MemoryShopApi {
    /// Create an API serving `products`
    pub fn new(products: Vec<ProductItem>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    /// Make catalog requests fail with `message` until cleared with `None`
    pub fn set_catalog_failure(&self, message: Option<&str>) {
        *self.catalog_failure.lock() = message.map(str::to_string);
    }

    /// Make order requests fail with `message` until cleared with `None`
    pub fn set_order_failure(&self, message: Option<&str>) {
        *self.order_failure.lock() = message.map(str::to_string);
    }

    /// Orders accepted so far
    pub fn placed_orders(&self) -> Vec<OrderDraft> {
        self.orders.lock().clone()
    }

    fn check_order(&self, order: &OrderDraft) -> ApiResult<u64> {
        if order.items.is_empty() {
            return Err(ApiError::status(400, "No items in order"));
        }

        let products = self.products.lock();
        let mut sum: u64 = 0;
        for id in &order.items {
            let price = products
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| ApiError::status(400, format!("Product {} not found", id)))?
                .price
                .ok_or_else(|| ApiError::status(400, format!("Product {} is not for sale", id)))?;
            sum = sum
                .checked_add(price)
                .ok_or_else(|| ApiError::status(400, "Order total out of range"))?;
        }

        if order.total != Some(sum) {
            return Err(ApiError::status(400, "Order total mismatch"));
        }
        Ok(sum)
    }
}

#[async_trait]
impl ShopApi for MemoryShopApi {
    async fn product_list(&self) -> ApiResult<Vec<ProductItem>> {
        if let Some(message) = self.catalog_failure.lock().clone() {
            return Err(ApiError::status(503, message));
        }
        Ok(self.products.lock().clone())
    }

    async fn place_order(&self, order: &OrderDraft) -> ApiResult<OrderConfirmation> {
        if let Some(message) = self.order_failure.lock().clone() {
            return Err(ApiError::status(500, message));
        }
        let total = self.check_order(order)?;
        self.orders.lock().push(order.clone());
        Ok(OrderConfirmation {
            id: Some(Uuid::new_v4().to_string()),
            total,
        })
    }
}
