use axum::Router;

pub mod cart;
pub mod stream;
pub mod system;

/// Router for all cart-facing endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/cart", cart::router())
        .nest("/stream", stream::router())
}
