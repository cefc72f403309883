use rust_decimal::Decimal;

use crate::item::CartItem;
use crate::storage::CartStorage;

/// What [`CartStore::update_quantity`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds exactly the requested quantity.
    Updated,
    /// The requested quantity was below 1, so the line was removed.
    Removed,
    /// No line has that id; nothing changed.
    Missing,
}

/// The cart: at most one [`CartItem`] per product id, persisted through `S`
/// after every mutation.
///
/// No operation can fail. Storage errors are logged and the in-memory cart
/// stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<CartItem>,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Opens the cart persisted in `storage`.
    ///
    /// An unreadable store starts an empty cart. Duplicate ids left behind by
    /// an older writer are merged. Zero-quantity and negative-price lines are
    /// dropped.
    pub fn open(storage: S) -> Self {
        let persisted = storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load persisted cart; starting empty");
            Vec::new()
        });
        let loaded = persisted.len();

        let mut items: Vec<CartItem> = Vec::with_capacity(loaded);
        for item in persisted.into_iter().filter(is_valid_line) {
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => items.push(item),
            }
        }
        if items.len() != loaded {
            tracing::warn!(
                loaded,
                kept = items.len(),
                "normalized persisted cart (merged duplicates or dropped invalid lines)"
            );
        }
        tracing::debug!(lines = items.len(), "cart opened");

        Self { items, storage }
    }

    /// Adds `item`, merging its quantity into an existing line with the same
    /// id. A zero-quantity or negative-price item adds nothing.
    pub fn add_to_cart(&mut self, item: CartItem) {
        if !is_valid_line(&item) {
            tracing::debug!(id = %item.id, "ignoring empty or negatively priced cart line");
            return;
        }
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
        self.persist();
    }

    /// Removes the line with `id`. Absent ids are ignored.
    pub fn remove_from_cart(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Sets the line's quantity to exactly `quantity`; anything below 1
    /// removes the line instead.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> QuantityUpdate {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return QuantityUpdate::Missing;
        };
        if quantity < 1 {
            self.items.remove(pos);
            self.persist();
            return QuantityUpdate::Removed;
        }
        if let Some(item) = self.items.get_mut(pos) {
            item.quantity = quantity;
        }
        self.persist();
        QuantityUpdate::Updated
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Σ(price × quantity), recomputed on every call.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ(quantity), for the cart badge.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.items) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}

fn is_valid_line(item: &CartItem) -> bool {
    item.quantity > 0 && item.price >= Decimal::ZERO
}
