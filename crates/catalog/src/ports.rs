//! Port definitions for the remote catalog and stock services.

use async_trait::async_trait;

use shopfront_core::{CartResult, ProductId, ProductRecord, StockRecord};

/// Product detail lookup by id.
///
/// `Ok(None)` means the catalog has no such product; transport and decode
/// failures surface as `CartError::Transport`.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, product_id: ProductId) -> CartResult<Option<ProductRecord>>;
}

/// Available-quantity lookup by product id.
///
/// Fetched fresh before every mutating cart operation; implementations must
/// not cache.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> CartResult<Option<StockRecord>>;
}
