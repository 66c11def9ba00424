//! HTTP implementation of the shop API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::{OrderConfirmation, OrderDraft, ProductItem};
use storefront_settings::ApiSettings;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::ShopApi;

/// Paged list envelope used by the catalog endpoint
#[derive(Debug, Deserialize)]
pub struct ProductList {
    /// Total number of products
    #[serde(default)]
    pub total: usize,
    /// The products
    pub items: Vec<ProductItem>,
}

/// Error body sent with non-success responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Shop API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    client: Client,
    base_url: Url,
}

impl HttpShopApi {
    /// Create a client for the configured server
    pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
        let base_url = Url::parse(&settings.base_url)?;

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { client, base_url })
    }

    /// Full URL for an endpoint path such as `/product`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let reason = status.canonical_reason().unwrap_or("Unknown status").to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(reason);
        warn!("Request failed with {}: {}", status.as_u16(), message);
        Err(ApiError::status(status.as_u16(), message))
    }
}

#[async_trait]
impl ShopApi for HttpShopApi {
    async fn product_list(&self) -> ApiResult<Vec<ProductItem>> {
        let list: ProductList = self.get("/product").await?;
        debug!("Fetched {} of {} products", list.items.len(), list.total);
        Ok(list.items)
    }

    async fn place_order(&self, order: &OrderDraft) -> ApiResult<OrderConfirmation> {
        self.post("/order", order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> ApiSettings {
        ApiSettings {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let api = HttpShopApi::new(&settings("http://localhost:3000/api/weblarek")).unwrap();
        assert_eq!(api.endpoint("/product"), "http://localhost:3000/api/weblarek/product");

        let api = HttpShopApi::new(&settings("http://localhost:3000/api/weblarek/")).unwrap();
        assert_eq!(api.endpoint("order"), "http://localhost:3000/api/weblarek/order");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpShopApi::new(&settings("localhost without scheme")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_product_list_envelope() {
        let list: ProductList = serde_json::from_str(
            r#"{"total": 2, "items": [
                {"id": "a", "title": "A", "price": 100},
                {"id": "b", "title": "B", "price": null}
            ]}"#,
        )
        .expect("Should deserialize");
        assert_eq!(list.total, 2);
        assert_eq!(list.items[1].price, None);
    }
}
