use serde::{Deserialize, Serialize};

use shopfront_core::{CartError, CartResult, ProductId, ProductRecord};

/// A single cart entry: one product plus the amount the user selected.
///
/// Display fields are copied from the catalog record at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    pub image_url: String,
    pub amount: u32,
}

impl CartItem {
    fn from_product(product: ProductRecord, amount: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            image_url: product.image_url,
            amount,
        }
    }
}

/// The user's current cart: an insertion-ordered sequence of items, at most
/// one per product.
///
/// `version` increments by one per applied mutation and rides along in the
/// persisted snapshot, so a hydrated cart continues the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    version: u64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted snapshot.
    pub fn hydrated(items: Vec<CartItem>, version: u64) -> Self {
        Self { items, version }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the entry for a product, if present.
    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry or appends a new one-unit entry,
    /// provided the resulting amount is covered by `available`.
    pub fn add_one(&mut self, product: ProductRecord, available: u32) -> CartResult<()> {
        match self.find_mut(product.id) {
            Some(item) => {
                let requested = item.amount + 1;
                if requested > available {
                    return Err(CartError::insufficient_stock(requested, available));
                }
                item.amount = requested;
            }
            None => {
                if available < 1 {
                    return Err(CartError::insufficient_stock(1, available));
                }
                self.items.push(CartItem::from_product(product, 1));
            }
        }

        self.version += 1;
        Ok(())
    }

    /// Remove a product's entry entirely, returning it.
    pub fn remove(&mut self, product_id: ProductId) -> CartResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        let removed = self.items.remove(index);
        self.version += 1;
        Ok(removed)
    }

    /// Set a product's amount to an exact value.
    ///
    /// The amount must be at least one unit and covered by `available`.
    pub fn set_amount(
        &mut self,
        product_id: ProductId,
        amount: u32,
        available: u32,
    ) -> CartResult<()> {
        if amount < 1 {
            return Err(CartError::InvalidQuantity(amount));
        }

        let item = self
            .find_mut(product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        if amount > available {
            return Err(CartError::insufficient_stock(amount, available));
        }

        item.amount = amount;
        self.version += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_product(raw_id: u64) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(raw_id),
            name: format!("product {raw_id}"),
            unit_price: 17990,
            image_url: format!("https://cdn.example/p/{raw_id}.jpg"),
        }
    }

    #[test]
    fn adding_new_product_appends_single_unit() {
        let mut cart = Cart::new();

        cart.add_one(test_product(1), 5).unwrap();

        assert_eq!(cart.len(), 1);
        let item = cart.find(ProductId::new(1)).unwrap();
        assert_eq!(item.amount, 1);
        assert_eq!(item.name, "product 1");
    }

    #[test]
    fn adding_existing_product_increments_amount() {
        let mut cart = Cart::new();
        cart.add_one(test_product(1), 5).unwrap();

        cart.add_one(test_product(1), 5).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 2);
    }

    #[test]
    fn adding_beyond_stock_is_rejected_and_leaves_amount() {
        let mut cart = Cart::new();
        cart.add_one(test_product(1), 5).unwrap();

        let err = cart.add_one(test_product(1), 1).unwrap_err();

        assert_eq!(
            err,
            CartError::InsufficientStock {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn adding_new_product_with_zero_stock_is_rejected() {
        let mut cart = Cart::new();

        let err = cart.add_one(test_product(1), 0).unwrap_err();

        assert_eq!(
            err,
            CartError::InsufficientStock {
                requested: 1,
                available: 0
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn removing_absent_product_errors() {
        let mut cart = Cart::new();

        let err = cart.remove(ProductId::new(9)).unwrap_err();

        assert_eq!(err, CartError::ItemNotFound(ProductId::new(9)));
        assert!(cart.is_empty());
    }

    #[test]
    fn second_remove_is_a_rejected_no_op() {
        let mut cart = Cart::new();
        cart.add_one(test_product(1), 5).unwrap();

        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.product_id, ProductId::new(1));

        let after_first = cart.clone();
        let err = cart.remove(ProductId::new(1)).unwrap_err();

        assert_eq!(err, CartError::ItemNotFound(ProductId::new(1)));
        assert_eq!(cart, after_first);
    }

    #[test]
    fn set_amount_zero_is_invalid() {
        let mut cart = Cart::new();
        cart.add_one(test_product(2), 5).unwrap();
        cart.set_amount(ProductId::new(2), 3, 5).unwrap();

        let err = cart.set_amount(ProductId::new(2), 0, 5).unwrap_err();

        assert_eq!(err, CartError::InvalidQuantity(0));
        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 3);
    }

    #[test]
    fn set_amount_beyond_stock_leaves_amount_unchanged() {
        let mut cart = Cart::new();
        cart.add_one(test_product(2), 10).unwrap();

        let err = cart.set_amount(ProductId::new(2), 7, 4).unwrap_err();

        assert_eq!(
            err,
            CartError::InsufficientStock {
                requested: 7,
                available: 4
            }
        );
        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 1);
    }

    #[test]
    fn set_amount_within_stock_updates() {
        let mut cart = Cart::new();
        cart.add_one(test_product(2), 5).unwrap();
        cart.set_amount(ProductId::new(2), 3, 5).unwrap();

        cart.set_amount(ProductId::new(2), 2, 5).unwrap();

        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 2);
    }

    #[test]
    fn set_amount_on_absent_product_errors() {
        let mut cart = Cart::new();

        let err = cart.set_amount(ProductId::new(3), 2, 5).unwrap_err();

        assert_eq!(err, CartError::ItemNotFound(ProductId::new(3)));
    }

    #[test]
    fn version_increments_once_per_applied_mutation() {
        let mut cart = Cart::new();
        assert_eq!(cart.version(), 0);

        cart.add_one(test_product(1), 5).unwrap();
        assert_eq!(cart.version(), 1);

        cart.set_amount(ProductId::new(1), 4, 5).unwrap();
        assert_eq!(cart.version(), 2);

        // Rejected mutations do not advance the version.
        cart.set_amount(ProductId::new(1), 9, 5).unwrap_err();
        assert_eq!(cart.version(), 2);

        cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn hydrated_preserves_items_and_version() {
        let mut cart = Cart::new();
        cart.add_one(test_product(1), 5).unwrap();
        cart.add_one(test_product(2), 5).unwrap();

        let rebuilt = Cart::hydrated(cart.items().to_vec(), cart.version());

        assert_eq!(rebuilt, cart);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add_one(test_product(3), 5).unwrap();
        cart.add_one(test_product(1), 5).unwrap();
        cart.add_one(test_product(2), 5).unwrap();

        let ids: Vec<u64> = cart.items().iter().map(|i| i.product_id.as_u64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    proptest! {
        #[test]
        fn at_most_one_item_per_product(
            ops in proptest::collection::vec((0u8..3, 0u64..6, 0u32..6), 0..64)
        ) {
            let mut cart = Cart::new();

            for (op, raw_id, amount) in ops {
                let id = ProductId::new(raw_id);
                let _ = match op {
                    0 => cart.add_one(test_product(raw_id), 4).map(|_| ()),
                    1 => cart.remove(id).map(|_| ()),
                    _ => cart.set_amount(id, amount, 4),
                };

                let ids: Vec<ProductId> =
                    cart.items().iter().map(|item| item.product_id).collect();
                let unique: std::collections::HashSet<ProductId> =
                    ids.iter().copied().collect();
                prop_assert_eq!(ids.len(), unique.len());
            }
        }
    }
}
