//! `shopfront-catalog` — remote product and stock lookups.
//!
//! Ports for the two read-only collaborators the cart consults before every
//! mutation, an HTTP implementation for both, and an in-memory fake for
//! tests.

pub mod http;
pub mod memory;
pub mod ports;

pub use http::HttpCatalogClient;
pub use memory::InMemoryCatalog;
pub use ports::{ProductCatalog, StockService};
