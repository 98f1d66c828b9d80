//! Persisted cart snapshots.
//!
//! The whole cart is serialized and written under one fixed key on every
//! successful mutation (full overwrite, not incremental), and read back once
//! at store construction.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_cart::CartItem;

/// Storage key for the serialized cart.
pub const CART_SNAPSHOT_KEY: &str = "cart";

/// The serialized form of a cart.
///
/// `version` continues the cart's mutation counter across sessions;
/// `saved_at` records when the snapshot was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub version: u64,
    pub saved_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
}

/// Durable key-value store for serialized snapshots.
///
/// Infrastructure errors stay `anyhow` at this boundary; the store converts
/// them into the cart error taxonomy.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, payload: &str) -> anyhow::Result<()>;
}

/// In-memory snapshot store for tests.
///
/// `set_fail_puts` makes writes fail, to exercise the commit-after-persist
/// path.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
    fail_puts: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Raw stored payload, for assertions.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, payload: &str) -> anyhow::Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            anyhow::bail!("snapshot store unavailable (simulated)");
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
