use serde::Deserialize;

use shopfront_cart::CartItem;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    pub amount: u32,
}

// -------------------------
// JSON mapping
// -------------------------

pub fn cart_to_json(version: u64, items: &[CartItem]) -> serde_json::Value {
    serde_json::json!({
        "version": version,
        "items": items,
    })
}
