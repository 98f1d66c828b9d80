use std::sync::Arc;

use shopfront_api::app::{self, services::AppServices};
use shopfront_catalog::HttpCatalogClient;
use shopfront_store::SqliteSnapshotStore;

#[tokio::main]
async fn main() {
    shopfront_observability::init();

    let catalog_url = std::env::var("SHOPFRONT_CATALOG_URL").unwrap_or_else(|_| {
        tracing::warn!("SHOPFRONT_CATALOG_URL not set; using http://localhost:9000");
        "http://localhost:9000".to_string()
    });

    let db_path = std::env::var("SHOPFRONT_DB_PATH").unwrap_or_else(|_| {
        tracing::warn!("SHOPFRONT_DB_PATH not set; using ./shopfront.db");
        "shopfront.db".to_string()
    });

    let bind_addr =
        std::env::var("SHOPFRONT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let catalog = Arc::new(HttpCatalogClient::new(catalog_url));
    let snapshots = Arc::new(
        SqliteSnapshotStore::connect(&db_path)
            .await
            .expect("failed to open snapshot database"),
    );

    let services = Arc::new(AppServices::open(catalog.clone(), catalog, snapshots).await);
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
