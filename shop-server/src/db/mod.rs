//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `staff` | id | `StaffRecord` |
//! | `categories` / `brands` / `suppliers` / `products` | id | catalog entity |
//! | `orders` | id | `Order` |
//! | `appointments` | id | `Appointment` |
//! | `coupons` | id | `Coupon` |
//! | `articles` / `events` | id | content entity |
//! | `settings` | name | `StoreSettings` |
//!
//! Values are JSON (`serde_json`). Keys are snowflake ids.
//! Work spanning several tables (checkout, restock on cancel) shares a
//! single `WriteTransaction` through the `*_txn` helpers.

pub mod models;
pub mod repository;

use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Entity table: key = snowflake id, value = JSON document
pub type EntityTable = TableDefinition<'static, i64, &'static [u8]>;

pub const STAFF_TABLE: EntityTable = TableDefinition::new("staff");
pub const CATEGORIES_TABLE: EntityTable = TableDefinition::new("categories");
pub const BRANDS_TABLE: EntityTable = TableDefinition::new("brands");
pub const SUPPLIERS_TABLE: EntityTable = TableDefinition::new("suppliers");
pub const PRODUCTS_TABLE: EntityTable = TableDefinition::new("products");
pub const ORDERS_TABLE: EntityTable = TableDefinition::new("orders");
pub const APPOINTMENTS_TABLE: EntityTable = TableDefinition::new("appointments");
pub const COUPONS_TABLE: EntityTable = TableDefinition::new("coupons");
pub const ARTICLES_TABLE: EntityTable = TableDefinition::new("articles");
pub const EVENTS_TABLE: EntityTable = TableDefinition::new("events");

/// Singleton documents: key = document name
pub const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

const ENTITY_TABLES: &[EntityTable] = &[
    STAFF_TABLE,
    CATEGORIES_TABLE,
    BRANDS_TABLE,
    SUPPLIERS_TABLE,
    PRODUCTS_TABLE,
    ORDERS_TABLE,
    APPOINTMENTS_TABLE,
    COUPONS_TABLE,
    ARTICLES_TABLE,
    EVENTS_TABLE,
];

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
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Shop storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            for table in ENTITY_TABLES {
                let _ = write_txn.open_table(*table)?;
            }
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Commit a transaction started with [`Storage::begin_write`]
    pub fn commit(txn: WriteTransaction) -> StorageResult<()> {
        Ok(txn.commit()?)
    }

    // ========== Read operations ==========

    pub fn get<T: DeserializeOwned>(&self, table: EntityTable, id: i64) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All rows of a table, in key (creation) order
    pub fn list<T: DeserializeOwned>(&self, table: EntityTable) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        let mut items = Vec::with_capacity(table.len()? as usize);
        for entry in table.iter()? {
            let (_, value) = entry?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    pub fn count(&self, table: EntityTable) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        Ok(table.len()?)
    }

    pub fn get_document<T: DeserializeOwned>(&self, name: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;
        match table.get(name)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    // ========== Single-write shortcuts ==========

    pub fn put<T: Serialize>(&self, table: EntityTable, id: i64, value: &T) -> StorageResult<()> {
        let txn = self.begin_write()?;
        Self::put_txn(&txn, table, id, value)?;
        txn.commit()?;
        Ok(())
    }

    pub fn remove(&self, table: EntityTable, id: i64) -> StorageResult<bool> {
        let txn = self.begin_write()?;
        let removed = Self::remove_txn(&txn, table, id)?;
        txn.commit()?;
        Ok(removed)
    }

    pub fn put_document<T: Serialize>(&self, name: &str, value: &T) -> StorageResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS_TABLE)?;
            let bytes = serde_json::to_vec(value)?;
            table.insert(name, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Transaction helpers ==========

    pub fn get_txn<T: DeserializeOwned>(
        txn: &WriteTransaction,
        table: EntityTable,
        id: i64,
    ) -> StorageResult<Option<T>> {
        let table = txn.open_table(table)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_txn<T: DeserializeOwned>(
        txn: &WriteTransaction,
        table: EntityTable,
    ) -> StorageResult<Vec<T>> {
        let table = txn.open_table(table)?;
        let mut items = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    pub fn put_txn<T: Serialize>(
        txn: &WriteTransaction,
        table: EntityTable,
        id: i64,
        value: &T,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(table)?;
        let bytes = serde_json::to_vec(value)?;
        table.insert(id, bytes.as_slice())?;
        Ok(())
    }

    pub fn remove_txn(txn: &WriteTransaction, table: EntityTable, id: i64) -> StorageResult<bool> {
        let mut table = txn.open_table(table)?;
        Ok(table.remove(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
    }

    fn row(name: &str) -> Row {
        Row {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_put_get_remove() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put(BRANDS_TABLE, 7, &row("Shimano")).unwrap();

        let loaded: Option<Row> = storage.get(BRANDS_TABLE, 7).unwrap();
        assert_eq!(loaded, Some(row("Shimano")));
        assert!(storage.get::<Row>(BRANDS_TABLE, 8).unwrap().is_none());

        assert!(storage.remove(BRANDS_TABLE, 7).unwrap());
        assert!(!storage.remove(BRANDS_TABLE, 7).unwrap());
    }

    #[test]
    fn test_list_in_key_order() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put(BRANDS_TABLE, 3, &row("c")).unwrap();
        storage.put(BRANDS_TABLE, 1, &row("a")).unwrap();
        storage.put(BRANDS_TABLE, 2, &row("b")).unwrap();

        let rows: Vec<Row> = storage.list(BRANDS_TABLE).unwrap();
        assert_eq!(rows, vec![row("a"), row("b"), row("c")]);
        assert_eq!(storage.count(BRANDS_TABLE).unwrap(), 3);
    }

    #[test]
    fn test_dropped_transaction_is_rolled_back() {
        let storage = Storage::open_in_memory().unwrap();
        {
            let txn = storage.begin_write().unwrap();
            Storage::put_txn(&txn, PRODUCTS_TABLE, 1, &row("x")).unwrap();
            Storage::put_txn(&txn, ORDERS_TABLE, 1, &row("y")).unwrap();
            // no commit
        }
        assert!(storage.get::<Row>(PRODUCTS_TABLE, 1).unwrap().is_none());
        assert!(storage.get::<Row>(ORDERS_TABLE, 1).unwrap().is_none());
    }

    #[test]
    fn test_documents() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.get_document::<Row>("store").unwrap().is_none());
        storage.put_document("store", &row("Spoke")).unwrap();
        assert_eq!(
            storage.get_document::<Row>("store").unwrap(),
            Some(row("Spoke"))
        );
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.redb");
        {
            let storage = Storage::open(&path).unwrap();
            storage.put(STAFF_TABLE, 1, &row("ana")).unwrap();
        }
        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.get::<Row>(STAFF_TABLE, 1).unwrap(), Some(row("ana")));
    }
}
