//! Cart domain module.
//!
//! This crate contains the business rules for the cart itself, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Stock
//! availability is passed in by the caller; the cart only decides whether a
//! mutation is allowed and applies it.

pub mod cart;

pub use cart::{Cart, CartItem};
