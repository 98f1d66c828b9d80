use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use shopfront_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(get_cart)).route(
        "/items/:id",
        post(add_item).put(update_amount).delete(remove_item),
    )
}

/// GET /cart — the current cart contents and version.
pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let cart = services.store().cart().await;

    (
        StatusCode::OK,
        Json(dto::cart_to_json(cart.version(), cart.items())),
    )
        .into_response()
}

/// POST /cart/items/:id — add one unit of a product.
pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.store().add_product(product_id).await {
        Ok(items) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "items": items })),
        )
            .into_response(),
        Err(e) => errors::cart_error_to_response(e),
    }
}

/// PUT /cart/items/:id — set a product's amount to an exact value.
pub async fn update_amount(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateAmountRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services
        .store()
        .update_product_amount(product_id, body.amount)
        .await
    {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::cart_error_to_response(e),
    }
}

/// DELETE /cart/items/:id — remove a product's entry entirely.
pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.store().remove_product(product_id).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::cart_error_to_response(e),
    }
}
