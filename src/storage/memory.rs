use std::sync::{Arc, Mutex, MutexGuard};

use super::{Storage, StorageError};
use crate::item::{Item, ItemId, Status};

/// Vec-backed storage. Clones share the same underlying items, so a test can
/// keep a handle after moving one into an `ItemStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<Vec<Item>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage with existing records.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Copy of the stored records in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Item>, StorageError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Item>>, StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

/// Status is derived, never stored.
fn stored(item: &Item) -> Item {
    Item {
        status: Status::default(),
        ..item.clone()
    }
}

impl Storage for MemoryStorage {
    fn init(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Item>, StorageError> {
        self.snapshot()
    }

    fn fetch_one(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        Ok(self.lock()?.iter().find(|item| item.id == id).cloned())
    }

    fn add(&mut self, item: &Item) -> Result<(), StorageError> {
        self.lock()?.push(stored(item));
        Ok(())
    }

    fn update(&mut self, item: &Item) -> Result<(), StorageError> {
        let mut items = self.lock()?;
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            *existing = stored(item);
        }
        Ok(())
    }

    fn delete(&mut self, id: ItemId) -> Result<(), StorageError> {
        self.lock()?.retain(|item| item.id != id);
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), StorageError> {
        Ok(())
    }
}
