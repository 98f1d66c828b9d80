//! Cart error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the cart domain.
pub type CartResult<T> = Result<T, CartError>;

/// Failure causes for cart operations.
///
/// Deterministic business failures carry enough data for callers to react
/// programmatically; infrastructure failures (`Transport`, `Snapshot`) carry a
/// contextualized message from the adapter that produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The stock service returned no record for the product.
    #[error("no stock record for product {0}")]
    StockUnavailable(ProductId),

    /// The product catalog returned no record for the product.
    #[error("no catalog record for product {0}")]
    ProductUnavailable(ProductId),

    /// The requested amount exceeds the available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The requested amount is below the minimum of one unit.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The product is not present in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// A remote lookup failed (network or payload decode).
    #[error("transport failure: {0}")]
    Transport(String),

    /// Reading or writing the persisted cart snapshot failed.
    #[error("snapshot storage failure: {0}")]
    Snapshot(String),
}

impl CartError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    pub fn insufficient_stock(requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }
}
