//! Cart service.
//!
//! Maintains the insertion-ordered line items for one browsing context and
//! keeps the full snapshot persisted after every mutation. The cart is not
//! bound to any identity: it survives login and logout untouched.

use std::sync::{Arc, Mutex};

use tracing::info;

use artvista_core::ArtworkId;

use crate::models::{CartItemSource, CartLine, CartTotals};
use crate::notify::{Notice, NotificationSink};
use crate::storage::{self, KeyValueStore, keys};

/// Cart service.
///
/// All operations are synchronous; persistence is the local store, not a
/// network.
pub struct CartService {
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    lines: Mutex<Vec<CartLine>>,
}

impl CartService {
    /// Create an empty cart over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            sink,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Restore the persisted snapshot, if any.
    ///
    /// Called once at startup. A malformed record resets to an empty cart
    /// and is purged; no error reaches the caller.
    pub fn restore_cart(&self) -> Vec<CartLine> {
        let restored: Vec<CartLine> = storage::load_or_reset(self.store.as_ref(), keys::CART);
        *self.lines.lock().expect("cart lock poisoned") = restored.clone();
        if !restored.is_empty() {
            info!(lines = restored.len(), "cart restored");
        }
        restored
    }

    /// Add one unit of an artwork.
    ///
    /// A line already holding this artwork has its quantity incremented;
    /// otherwise a new line is appended with quantity 1. Always succeeds.
    pub fn add_item(&self, item: CartItemSource) {
        let mut lines = self.lines.lock().expect("cart lock poisoned");

        let notice = if let Some(line) = lines.iter_mut().find(|l| l.artwork_id == item.artwork_id)
        {
            line.quantity += 1;
            Notice::CartQuantityUpdated {
                title: line.title.clone(),
            }
        } else {
            let title = item.title.clone();
            lines.push(item.into_line(1));
            Notice::CartItemAdded { title }
        };

        storage::persist(self.store.as_ref(), keys::CART, &*lines);
        drop(lines);
        self.sink.notify(notice);
    }

    /// Remove a line entirely. Absent ids are a no-op, not an error.
    pub fn remove_item(&self, artwork_id: &ArtworkId) {
        let mut lines = self.lines.lock().expect("cart lock poisoned");

        let Some(pos) = lines.iter().position(|l| &l.artwork_id == artwork_id) else {
            return;
        };
        let removed = lines.remove(pos);

        storage::persist(self.store.as_ref(), keys::CART, &*lines);
        drop(lines);
        self.sink.notify(Notice::CartItemRemoved {
            title: removed.title,
        });
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity below 1 removes the line; an absent id is a silent
    /// no-op.
    pub fn set_quantity(&self, artwork_id: &ArtworkId, quantity: i64) {
        if quantity < 1 {
            // Zero and negative requests both mean "drop the line".
            self.remove_item(artwork_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut lines = self.lines.lock().expect("cart lock poisoned");
        let Some(line) = lines.iter_mut().find(|l| &l.artwork_id == artwork_id) else {
            return;
        };
        line.quantity = quantity;
        let title = line.title.clone();

        storage::persist(self.store.as_ref(), keys::CART, &*lines);
        drop(lines);
        self.sink.notify(Notice::CartQuantityUpdated { title });
    }

    /// Remove every line.
    pub fn clear(&self) {
        let mut lines = self.lines.lock().expect("cart lock poisoned");
        lines.clear();

        storage::persist(self.store.as_ref(), keys::CART, &*lines);
        drop(lines);
        self.sink.notify(Notice::CartCleared);
    }

    /// Current totals. Pure read, no side effect.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines.lock().expect("cart lock poisoned"))
    }

    /// Snapshot of the current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.lock().expect("cart lock poisoned").clone()
    }
}
