//! `shopfront-core` — shared domain primitives.
//!
//! Identifiers, the cart error taxonomy, and the wire records returned by the
//! remote catalog and stock services. Kept dependency-light so every other
//! crate in the workspace can use these types.

pub mod error;
pub mod id;
pub mod records;

pub use error::{CartError, CartResult};
pub use id::ProductId;
pub use records::{ProductRecord, StockRecord};
