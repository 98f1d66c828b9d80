use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_core::CartError;

pub fn cart_error_to_response(err: CartError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        CartError::InvalidQuantity(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_quantity", message)
        }
        CartError::ItemNotFound(_) => json_error(StatusCode::NOT_FOUND, "item_not_found", message),
        CartError::StockUnavailable(_) => {
            json_error(StatusCode::NOT_FOUND, "stock_unavailable", message)
        }
        CartError::ProductUnavailable(_) => {
            json_error(StatusCode::NOT_FOUND, "product_unavailable", message)
        }
        CartError::InsufficientStock { .. } => {
            json_error(StatusCode::CONFLICT, "insufficient_stock", message)
        }
        CartError::Transport(_) => json_error(StatusCode::BAD_GATEWAY, "transport_error", message),
        CartError::Snapshot(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "snapshot_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
