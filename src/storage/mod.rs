//! Persistence backends for items.
//!
//! The [`ItemStore`](crate::item::ItemStore) only talks to a [`Storage`]; the
//! SQLite backend is used by the server and the in-memory one by tests and
//! `--in-memory` runs.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{default_db_path, SqliteStorage, DB_FILENAME, ITEMS_TABLE};

use crate::item::{Item, ItemId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid item record {id}: {reason}")]
    InvalidRecord { id: ItemId, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// CRUD contract between the item store and its backing collaborator.
///
/// Implementations persist every field of [`Item`] except `status`, which is
/// derived and must not be treated as authoritative.
pub trait Storage: Send {
    /// Prepare the backend (create tables and the like). Safe to call twice.
    fn init(&mut self) -> Result<(), StorageError>;

    fn fetch_all(&self) -> Result<Vec<Item>, StorageError>;

    fn fetch_one(&self, id: ItemId) -> Result<Option<Item>, StorageError>;

    /// Insert a new item under its own id.
    fn add(&mut self, item: &Item) -> Result<(), StorageError>;

    /// Overwrite the stored record with the same id. Missing ids are ignored.
    fn update(&mut self, item: &Item) -> Result<(), StorageError>;

    /// Remove the record. Missing ids are ignored.
    fn delete(&mut self, id: ItemId) -> Result<(), StorageError>;

    fn close(self: Box<Self>) -> Result<(), StorageError>;
}
