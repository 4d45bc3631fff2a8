//! redb-based storage layer for the persisted cart
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `cart` | `"cart"` | `Vec<CartLine>` (JSON) | Single durable cart slot |
//!
//! The slot is a durable mirror of the in-memory cart, not a second owner:
//! every mutation rewrites the whole serialized array in one transaction
//! before in-memory state changes. Concurrent writers from other processes
//! are last-writer-wins; redb transactions only guarantee that no partial
//! cart is ever observed.

use redb::{Database, ReadableDatabase, TableDefinition};
use shared::models::CartLine;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table holding the cart: single slot key, value = JSON-serialized lines
const CART_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart");

const CART_SLOT_KEY: &str = "cart";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Cart storage backed by redb
#[derive(Clone)]
pub struct CartStorage {
    db: Arc<Database>,
}

impl CartStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default: the slot is
    /// persistent as soon as `commit()` returns, and the file stays in a
    /// consistent state across crashes.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, ephemeral guest sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read the persisted cart
    ///
    /// Absent slot loads as `None`. A slot that fails JSON decoding also
    /// loads as `None` (empty cart) with a warning; a corrupt mirror must
    /// never take the storefront down.
    pub fn load(&self) -> StorageResult<Option<Vec<CartLine>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;

        match table.get(CART_SLOT_KEY)? {
            Some(value) => match serde_json::from_slice::<Vec<CartLine>>(value.value()) {
                Ok(lines) => Ok(Some(lines)),
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted cart is unreadable, loading as empty");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Persist the full cart, replacing whatever was in the slot
    pub fn save(&self, lines: &[CartLine]) -> StorageResult<()> {
        let value = serde_json::to_vec(lines)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.insert(CART_SLOT_KEY, value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Erase the slot itself (distinct from saving an empty array)
    pub fn clear(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.remove(CART_SLOT_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Whether the slot currently exists
    pub fn has_cart(&self) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;
        Ok(table.get(CART_SLOT_KEY)?.is_some())
    }

    /// Write raw bytes into the slot (test hook for corruption scenarios)
    #[cfg(test)]
    pub(crate) fn save_raw(&self, bytes: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.insert(CART_SLOT_KEY, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
