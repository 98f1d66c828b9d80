//! In-memory catalog/stock fake for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use shopfront_core::{CartError, CartResult, ProductId, ProductRecord, StockRecord};

use crate::ports::{ProductCatalog, StockService};

/// In-memory implementation of both lookup ports.
///
/// Products and stock levels are registered up front; `set_failing` makes
/// every lookup return a transport error, to exercise outage handling.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<ProductId, ProductRecord>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    failing: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product together with its available stock.
    pub fn insert(&self, product: ProductRecord, available: u32) {
        self.stock.lock().unwrap().insert(product.id, available);
        self.products.lock().unwrap().insert(product.id, product);
    }

    /// Overwrite the available stock for a product.
    pub fn set_stock(&self, product_id: ProductId, available: u32) {
        self.stock.lock().unwrap().insert(product_id, available);
    }

    /// Toggle simulated outage: when failing, every lookup errors.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> CartResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CartError::transport("catalog unreachable (simulated)"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> CartResult<Option<ProductRecord>> {
        self.check_available()?;
        Ok(self.products.lock().unwrap().get(&product_id).cloned())
    }
}

#[async_trait]
impl StockService for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> CartResult<Option<StockRecord>> {
        self.check_available()?;
        Ok(self
            .stock
            .lock()
            .unwrap()
            .get(&product_id)
            .map(|&amount| StockRecord { amount }))
    }
}
