//! In-process cart store with change notification.
//!
//! Every mutation publishes the new contents on a `watch` channel. Readers
//! that fall behind only ever see the latest contents, which is all the
//! discount flow needs.

use tokio::sync::watch;

use crate::cart::item::{validate_quantity, LineItem, LineKey, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;

/// Receiver handed to subscribers of cart contents.
pub type CartContents = watch::Receiver<Vec<LineItem>>;

/// The cart's ordered line items.
#[derive(Debug)]
pub struct CartStore {
    items: watch::Sender<Vec<LineItem>>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a cart holding `items`, as restored from client storage.
    pub fn with_items(items: Vec<LineItem>) -> Self {
        let (items, _) = watch::channel(items);
        Self { items }
    }

    /// Restore a cart from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let items: Vec<LineItem> = serde_json::from_str(json)?;
        for item in &items {
            validate_quantity(item.quantity)?;
        }
        Ok(Self::with_items(items))
    }

    /// Subscribe to contents changes.
    pub fn subscribe(&self) -> CartContents {
        self.items.subscribe()
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.borrow().clone()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.borrow().iter().map(|i| i.quantity).sum()
    }

    /// Get an item by key.
    pub fn get(&self, key: &LineKey) -> Option<LineItem> {
        self.items.borrow().iter().find(|i| i.matches(key)).cloned()
    }

    /// Add an item to the cart.
    ///
    /// An entry with the same key absorbs the quantity instead of being
    /// duplicated.
    pub fn add_item(&self, item: LineItem) -> Result<(), CommerceError> {
        validate_quantity(item.quantity)?;

        let mut result = Ok(());
        self.items.send_if_modified(|items| {
            let key = item.key();
            match items.iter_mut().find(|i| i.matches(&key)) {
                Some(existing) => {
                    let new_quantity = existing.quantity.saturating_add(item.quantity);
                    if new_quantity > MAX_QUANTITY_PER_ITEM {
                        result = Err(CommerceError::QuantityExceedsLimit(
                            new_quantity,
                            MAX_QUANTITY_PER_ITEM,
                        ));
                        return false;
                    }
                    existing.quantity = new_quantity;
                }
                None => items.push(item),
            }
            true
        });
        result
    }

    /// Set an entry's quantity.
    ///
    /// Quantities below 1 are raised to 1; removal is explicit.
    pub fn update_quantity(&self, key: &LineKey, quantity: i64) -> Result<(), CommerceError> {
        let quantity = quantity.max(1);
        validate_quantity(quantity)?;

        let mut found = false;
        self.items.send_if_modified(|items| {
            match items.iter_mut().find(|i| i.matches(key)) {
                Some(existing) => {
                    found = true;
                    if existing.quantity == quantity {
                        return false;
                    }
                    existing.quantity = quantity;
                    true
                }
                None => false,
            }
        });

        if found {
            Ok(())
        } else {
            Err(CommerceError::ItemNotInCart(key.id.to_string()))
        }
    }

    /// Add one to an entry's quantity.
    pub fn increment(&self, key: &LineKey) -> Result<(), CommerceError> {
        let current = self
            .get(key)
            .ok_or_else(|| CommerceError::ItemNotInCart(key.id.to_string()))?;
        self.update_quantity(key, current.quantity + 1)
    }

    /// Subtract one from an entry's quantity, stopping at 1.
    pub fn decrement(&self, key: &LineKey) -> Result<(), CommerceError> {
        let current = self
            .get(key)
            .ok_or_else(|| CommerceError::ItemNotInCart(key.id.to_string()))?;
        self.update_quantity(key, current.quantity - 1)
    }

    /// Remove an entry. Returns whether anything was removed.
    pub fn remove_item(&self, key: &LineKey) -> bool {
        self.items.send_if_modified(|items| {
            let len_before = items.len();
            items.retain(|i| !i.matches(key));
            items.len() < len_before
        })
    }

    /// Clear all items from the cart.
    pub fn clear(&self) {
        self.items.send_if_modified(|items| {
            if items.is_empty() {
                return false;
            }
            items.clear();
            true
        });
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
