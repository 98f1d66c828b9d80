//! HTTP implementation of the catalog and stock ports using reqwest.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use shopfront_core::{CartError, CartResult, ProductId, ProductRecord, StockRecord};

use crate::ports::{ProductCatalog, StockService};

/// HTTP transport for the storefront backend.
///
/// Serves both lookups from one base URL: `GET {base}/products/{id}` and
/// `GET {base}/stock/{id}`. A 404 is a missing record, not a failure.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T>(&self, path: &str) -> CartResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CartError::transport(format!("GET {url} failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|e| CartError::transport(format!("GET {url} failed: {e}")))?;

        let value = response
            .json::<T>()
            .await
            .map_err(|e| CartError::transport(format!("invalid payload from {url}: {e}")))?;

        Ok(Some(value))
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalogClient {
    async fn product(&self, product_id: ProductId) -> CartResult<Option<ProductRecord>> {
        self.get_json(&format!("products/{product_id}")).await
    }
}

#[async_trait]
impl StockService for HttpCatalogClient {
    async fn stock(&self, product_id: ProductId) -> CartResult<Option<StockRecord>> {
        self.get_json(&format!("stock/{product_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn product_lookup_decodes_record() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":1,"name":"Trail Runner","unit_price":17990,"image_url":"https://cdn.example/p/1.jpg"}"#,
            )
            .create_async()
            .await;

        let client = HttpCatalogClient::new(server.url());
        let product = client.product(ProductId::new(1)).await.unwrap().unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Trail Runner");
        assert_eq!(product.unit_price, 17990);
    }

    #[tokio::test]
    async fn stock_lookup_decodes_record() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/stock/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"amount":5}"#)
            .create_async()
            .await;

        let client = HttpCatalogClient::new(server.url());
        let stock = client.stock(ProductId::new(1)).await.unwrap().unwrap();

        assert_eq!(stock.amount, 5);
    }

    #[tokio::test]
    async fn missing_record_maps_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products/9")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpCatalogClient::new(server.url());
        let product = client.product(ProductId::new(9)).await.unwrap();

        assert!(product.is_none());
    }

    #[tokio::test]
    async fn server_error_maps_to_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/stock/1")
            .with_status(503)
            .create_async()
            .await;

        let client = HttpCatalogClient::new(server.url());
        let err = client.stock(ProductId::new(1)).await.unwrap_err();

        assert!(matches!(err, CartError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn malformed_payload_maps_to_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/stock/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"amount":"plenty"}"#)
            .create_async()
            .await;

        let client = HttpCatalogClient::new(server.url());
        let err = client.stock(ProductId::new(1)).await.unwrap_err();

        assert!(matches!(err, CartError::Transport(_)), "got {err:?}");
    }
}
