//! The cart state container.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use shopfront_cart::{Cart, CartItem};
use shopfront_catalog::{ProductCatalog, StockService};
use shopfront_core::{CartError, CartResult, ProductId};

use crate::notify::{Notice, Notifier};
use crate::snapshot::{CART_SNAPSHOT_KEY, CartSnapshot, SnapshotStore};

/// Which operation produced an outcome; selects the generic failure message.
#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Remove,
    Update,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Remove => "remove",
            Op::Update => "update",
        }
    }
}

/// Owns the current cart and mirrors it into the snapshot store on every
/// successful mutation.
///
/// Mutations serialize through a single-writer lock held across the whole
/// fetch/validate/persist sequence, so two rapid invocations cannot observe
/// the same pre-mutation state and lose an update. Each operation works on a
/// clone of the cart and only replaces shared state once the new snapshot is
/// persisted; a failed operation leaves both memory and storage untouched.
pub struct CartStore {
    products: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockService>,
    snapshots: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<Cart>,
}

impl CartStore {
    /// Build a store, hydrating the cart from the persisted snapshot.
    ///
    /// A missing snapshot yields an empty cart; an unreadable one is
    /// discarded with a warning rather than failing construction.
    pub async fn open(
        products: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockService>,
        snapshots: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = Self::hydrate(snapshots.as_ref()).await;

        Self {
            products,
            stock,
            snapshots,
            notifier,
            state: Mutex::new(state),
        }
    }

    async fn hydrate(snapshots: &dyn SnapshotStore) -> Cart {
        match snapshots.get(CART_SNAPSHOT_KEY).await {
            Ok(Some(payload)) => match serde_json::from_str::<CartSnapshot>(&payload) {
                Ok(snapshot) => {
                    tracing::debug!(
                        version = snapshot.version,
                        items = snapshot.items.len(),
                        "hydrated cart from snapshot"
                    );
                    Cart::hydrated(snapshot.items, snapshot.version)
                }
                Err(err) => {
                    tracing::warn!("discarding unreadable cart snapshot: {err}");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!("snapshot store unavailable during hydration: {err:#}");
                Cart::new()
            }
        }
    }

    /// Current cart contents, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.state.lock().await.items().to_vec()
    }

    /// Mutation counter of the current cart.
    pub async fn version(&self) -> u64 {
        self.state.lock().await.version()
    }

    /// A point-in-time copy of the whole cart.
    pub async fn cart(&self) -> Cart {
        self.state.lock().await.clone()
    }

    /// Add one unit of a product, checking fresh stock first.
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<Vec<CartItem>> {
        let mut state = self.state.lock().await;
        match self.checked_add(&state, product_id).await {
            Ok(next) => Ok(self.commit(&mut state, next, "Product added to cart")),
            Err(err) => Err(self.reject(Op::Add, product_id, err)),
        }
    }

    /// Remove a product's entry entirely.
    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<Vec<CartItem>> {
        let mut state = self.state.lock().await;
        match self.checked_remove(&state, product_id).await {
            Ok(next) => Ok(self.commit(&mut state, next, "Product removed from cart")),
            Err(err) => Err(self.reject(Op::Remove, product_id, err)),
        }
    }

    /// Set a product's amount to an exact value, checking fresh stock first.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> CartResult<Vec<CartItem>> {
        let mut state = self.state.lock().await;
        match self.checked_update(&state, product_id, amount).await {
            Ok(next) => Ok(self.commit(&mut state, next, "Product quantity updated")),
            Err(err) => Err(self.reject(Op::Update, product_id, err)),
        }
    }

    async fn checked_add(&self, current: &Cart, product_id: ProductId) -> CartResult<Cart> {
        let stock = self
            .stock
            .stock(product_id)
            .await?
            .ok_or(CartError::StockUnavailable(product_id))?;
        let product = self
            .products
            .product(product_id)
            .await?
            .ok_or(CartError::ProductUnavailable(product_id))?;

        let mut next = current.clone();
        next.add_one(product, stock.amount)?;
        self.persist(&next).await?;
        Ok(next)
    }

    async fn checked_remove(&self, current: &Cart, product_id: ProductId) -> CartResult<Cart> {
        let mut next = current.clone();
        next.remove(product_id)?;
        self.persist(&next).await?;
        Ok(next)
    }

    async fn checked_update(
        &self,
        current: &Cart,
        product_id: ProductId,
        amount: u32,
    ) -> CartResult<Cart> {
        if amount < 1 {
            return Err(CartError::InvalidQuantity(amount));
        }

        let stock = self
            .stock
            .stock(product_id)
            .await?
            .ok_or(CartError::StockUnavailable(product_id))?;
        // The record itself is not needed; the lookup confirms the product
        // still exists in the catalog.
        self.products
            .product(product_id)
            .await?
            .ok_or(CartError::ProductUnavailable(product_id))?;

        let mut next = current.clone();
        next.set_amount(product_id, amount, stock.amount)?;
        self.persist(&next).await?;
        Ok(next)
    }

    async fn persist(&self, cart: &Cart) -> CartResult<()> {
        let snapshot = CartSnapshot {
            version: cart.version(),
            saved_at: Utc::now(),
            items: cart.items().to_vec(),
        };

        let payload = serde_json::to_string(&snapshot)
            .map_err(|e| CartError::snapshot(format!("failed to serialize cart snapshot: {e}")))?;

        self.snapshots
            .put(CART_SNAPSHOT_KEY, &payload)
            .await
            .map_err(|e| CartError::snapshot(format!("{e:#}")))
    }

    fn commit(&self, state: &mut Cart, next: Cart, message: &str) -> Vec<CartItem> {
        *state = next;
        tracing::debug!(version = state.version(), "cart mutation committed");
        self.notifier.notify(Notice::info(message));
        state.items().to_vec()
    }

    fn reject(&self, op: Op, product_id: ProductId, err: CartError) -> CartError {
        tracing::debug!(
            operation = op.as_str(),
            product_id = %product_id,
            "cart mutation rejected: {err}"
        );
        self.notifier.notify(Notice::error(failure_message(op, &err)));
        err
    }
}

/// User-facing message for a failed operation, keyed by cause where the UI
/// distinguishes causes and by operation otherwise.
fn failure_message(op: Op, err: &CartError) -> &'static str {
    match err {
        CartError::InsufficientStock { .. } => "Requested quantity is out of stock",
        CartError::InvalidQuantity(_) => "Invalid product quantity",
        CartError::ItemNotFound(_) => "Item not found in cart",
        _ => match op {
            Op::Add => "Could not add the product",
            Op::Remove => "Could not remove the product",
            Op::Update => "Could not update the product quantity",
        },
    }
}
