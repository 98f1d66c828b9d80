//! `shopfront-store` — the cart state container and its side-effect seams.
//!
//! [`CartStore`] owns the in-memory cart, hydrates it from a persisted
//! snapshot, and runs the three mutating operations: each one consults the
//! remote stock and catalog services, applies the domain rules, writes the
//! new snapshot, and reports the outcome through the [`Notifier`].

pub mod cart_store;
pub mod notify;
pub mod snapshot;
pub mod sqlite;

pub use cart_store::CartStore;
pub use notify::{BroadcastNotifier, Notice, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use snapshot::{CART_SNAPSHOT_KEY, CartSnapshot, InMemorySnapshotStore, SnapshotStore};
pub use sqlite::SqliteSnapshotStore;
