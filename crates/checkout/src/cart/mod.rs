//! Shopping cart state.
//!
//! The [`CartStore`] is the single source of truth for the cart. Mutations
//! are synchronous and every one of them rewrites the persisted snapshot, so
//! the cart survives reloads until it is explicitly cleared by a successful
//! order. Aggregates (`subtotal`, `item_count`) are recomputed from the item
//! list on every read rather than cached, so they can never drift.

pub mod saved;
pub mod storage;

use attar_core::CartItem;
use rust_decimal::Decimal;

use storage::KeyedStore;

/// Storage key for the persisted cart snapshot.
pub const CART_KEY: &str = "attar.cart";

/// The shopping cart and its persistence handle.
///
/// Store operations never return errors to the caller: a cart mutation must
/// not fail the browsing flow. Persistence failures are logged and the
/// in-memory state stays authoritative; input validation happens at the
/// checkout boundary, not here.
#[derive(Debug)]
pub struct CartStore<S: KeyedStore> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: KeyedStore> CartStore<S> {
    /// Load the cart from the durable store.
    ///
    /// The snapshot is parsed defensively: a missing, corrupt, or
    /// schema-mismatched snapshot yields an empty cart, never a failure.
    pub fn load(store: S) -> Self {
        let items = match store.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => items
                    .into_iter()
                    // A zero-quantity row violates the cart invariant and can
                    // only come from a hand-edited snapshot; drop it.
                    .filter(|item| item.quantity >= 1)
                    .collect(),
                Err(e) => {
                    tracing::warn!("discarding unreadable cart snapshot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read cart snapshot: {e}");
                Vec::new()
            }
        };

        Self { store, items }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same `id` already exists its quantity is
    /// incremented by the incoming quantity (repeated adds of the same
    /// variant accumulate); otherwise the item is appended.
    pub fn add_item(&mut self, item: CartItem) {
        let quantity = item.quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem { quantity, ..item });
        }
        self.persist();
    }

    /// Remove the line with the given id. No-op if absent.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Adjust the quantity of a line by `delta`, clamped to a minimum of 1.
    ///
    /// Decrementing never removes the line; removal is only via
    /// [`Self::remove_item`]. No-op if the line is absent.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            let updated = i64::from(item.quantity).saturating_add(delta).max(1);
            item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            self.persist();
        }
    }

    /// Empty the cart. Called after a successful order.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Serialize the full item list to the durable store.
    ///
    /// One atomic write per mutation; a reader never sees a partial cart.
    fn persist(&self) {
        let snapshot = match serde_json::to_string(&self.items) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("failed to serialize cart snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.store.put(CART_KEY, &snapshot) {
            tracing::error!("failed to persist cart snapshot: {e}");
        }
    }
}
