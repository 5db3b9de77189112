//! redb-based collection store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection key | JSON array | one whole entity collection per key |
//!
//! Each collection (`cwt_employees`, `cwt_cuts`, `cwt_assignments`,
//! `cwt_categories`) is read and written as a whole: `load` returns the full
//! array, `save` replaces it in a single write transaction. There are no
//! partial writes, so the last writer wins.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns, the new array is on disk and the file is never left half-written.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for entity collections: key = collection key, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Storage keys, one per entity collection
pub mod keys {
    pub const EMPLOYEES: &str = "cwt_employees";
    pub const CUTS: &str = "cwt_cuts";
    pub const ASSIGNMENTS: &str = "cwt_assignments";
    pub const CATEGORIES: &str = "cwt_categories";
}

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

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Whole-collection JSON store backed by redb
#[derive(Clone)]
pub struct CollectionStore {
    db: Arc<Database>,
}

impl CollectionStore {
    /// Open or create the database at the given path.
    ///
    /// The parent directory is created when missing.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for tests and throwaway sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Load a whole collection.
    ///
    /// A key that was never saved loads as an empty collection.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        match table.get(key)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(items)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;

        tracing::debug!(collection = key, count = items.len(), "Collection saved");
        Ok(())
    }
}
