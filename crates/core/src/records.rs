//! Wire records returned by the remote catalog and stock services.
//!
//! Shared across the workspace so the domain, the HTTP client, and the API
//! surface agree on one shape. These types must not depend on backend-only
//! dependencies.

use serde::{Deserialize, Serialize};

use crate::id::ProductId;

/// Product details as served by the catalog (`GET products/{id}`).
///
/// Display fields are copied into the cart at add time; the cart never
/// re-reads them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    pub image_url: String,
}

/// Available quantity as served by the stock service (`GET stock/{id}`).
///
/// Fetched fresh on every mutating operation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub amount: u32,
}
