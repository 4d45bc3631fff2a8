//! Cart store - authoritative record of the user's selected items
//!
//! `CartStore` owns the in-memory lines; `CartStorage` is the durable redb
//! mirror. Every mutation persists the full array before in-memory state
//! changes, so a caller that reads after a mutation never observes the two
//! out of sync. There is no hidden singleton: construct one and pass it
//! where it is needed.
//!
//! Identity: `(food_id, selected_size)` is unique within the cart. Adding
//! an existing key merges quantities (snapshot from the new line wins);
//! `update_qty` and `remove` on an absent key are silent no-ops.

mod storage;

pub use storage::{CartStorage, StorageError, StorageResult};

use shared::models::CartLine;
use std::path::Path;

/// Persisted shopping cart
pub struct CartStore {
    storage: CartStorage,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create a store over an existing storage handle (starts unloaded)
    pub fn new(storage: CartStorage) -> Self {
        Self {
            storage,
            lines: Vec::new(),
        }
    }

    /// Open the cart database at `path` and load whatever was persisted
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let mut store = Self::new(CartStorage::open(path)?);
        store.load()?;
        Ok(store)
    }

    /// In-memory store (tests, guest sessions without durability)
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::new(CartStorage::open_in_memory()?))
    }

    /// Replace in-memory state wholesale with the persisted cart
    ///
    /// Absent slot leaves the cart empty; this is not an error.
    pub fn load(&mut self) -> StorageResult<()> {
        self.lines = self.storage.load()?.unwrap_or_default();
        tracing::debug!(line_count = self.lines.len(), "Cart loaded");
        Ok(())
    }

    /// Add a line, merging by identity key
    ///
    /// An existing `(food_id, selected_size)` line gets
    /// `quantity = old + new`; all other fields, snapshot included, are
    /// taken from the new line. Non-positive quantities are rejected.
    pub fn add(&mut self, line: CartLine) -> StorageResult<()> {
        if line.quantity <= 0 {
            return Err(StorageError::InvalidQuantity(line.quantity));
        }

        let mut next = self.lines.clone();
        match next.iter_mut().find(|l| l.key() == line.key()) {
            Some(existing) => {
                let merged = existing.quantity + line.quantity;
                *existing = line;
                existing.quantity = merged;
            }
            None => next.push(line),
        }

        self.storage.save(&next)?;
        self.lines = next;
        Ok(())
    }

    /// Set the quantity of the matching line
    ///
    /// No match is a silent no-op. A zero or negative quantity removes the
    /// line instead of storing a meaningless count.
    pub fn update_qty(
        &mut self,
        food_id: &str,
        selected_size: Option<&str>,
        quantity: i64,
    ) -> StorageResult<()> {
        if quantity <= 0 {
            return self.remove(food_id, selected_size);
        }

        let mut next = self.lines.clone();
        let Some(line) = next.iter_mut().find(|l| l.matches(food_id, selected_size)) else {
            return Ok(());
        };
        line.quantity = quantity;

        self.storage.save(&next)?;
        self.lines = next;
        Ok(())
    }

    /// Delete the matching line; silent no-op if absent
    pub fn remove(&mut self, food_id: &str, selected_size: Option<&str>) -> StorageResult<()> {
        if !self.lines.iter().any(|l| l.matches(food_id, selected_size)) {
            return Ok(());
        }

        let next: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|l| !l.matches(food_id, selected_size))
            .cloned()
            .collect();

        self.storage.save(&next)?;
        self.lines = next;
        Ok(())
    }

    /// Empty the cart and erase the persisted slot entirely
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.clear()?;
        self.lines.clear();
        tracing::debug!("Cart cleared");
        Ok(())
    }

    /// Current lines, in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line totals, in currency units
    pub fn subtotal(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus the externally supplied delivery fee
    ///
    /// The fee varies by order, so it is a parameter rather than a constant
    /// baked into the store.
    pub fn grand_total(&self, delivery_fee: i64) -> i64 {
        self.subtotal() + delivery_fee
    }

    /// Underlying storage handle
    pub fn storage(&self) -> &CartStorage {
        &self.storage
    }
}
