//! The item store: derived, sorted views over a [`Storage`] backend.
//!
//! Persistence failures are logged and swallowed here. Reads degrade to an
//! empty list or `None`, writes become no-ops, so the pages keep rendering.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use super::status::{derive_status, update_and_sort};
use super::types::{DisplayStatus, Item, ItemId};
use crate::metrics::OperationTimer;
use crate::storage::Storage;

/// Source of "now" for status derivation.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

/// New values for every user-editable field of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: String,
    pub description: String,
    pub due: Option<NaiveDate>,
    pub reminder_interval: u32,
    pub display_status: DisplayStatus,
}

pub struct ItemStore {
    storage: Box<dyn Storage>,
    /// Next id to hand out. Only ever grows, so deleted ids are not reused.
    free_id: ItemId,
    clock: Clock,
}

impl ItemStore {
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_clock(storage, Box::new(Utc::now))
    }

    /// Build a store with an explicit clock.
    #[must_use]
    pub fn with_clock(mut storage: Box<dyn Storage>, clock: Clock) -> Self {
        if let Err(e) = storage.init() {
            error!("Failed to initialise storage: {e}");
        }

        let free_id = match storage.fetch_all() {
            Ok(items) => next_free_id(&items, 1),
            Err(e) => {
                error!("Failed to load items, ids start at 1: {e}");
                1
            }
        };
        info!(free_id, "Item store ready");

        Self {
            storage,
            free_id,
            clock,
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// All items with freshly derived statuses, in display order.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        let mut timer = OperationTimer::new("list_items");
        let mut items = match self.storage.fetch_all() {
            Ok(items) => items,
            Err(e) => {
                error!("Failed to fetch items: {e}");
                return Vec::new();
            }
        };
        update_and_sort(&mut items, self.now());
        timer.record_count(items.len());
        items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<Item> {
        if id <= 0 {
            return None;
        }
        let _timer = OperationTimer::for_item("get_item", id);
        match self.storage.fetch_one(id) {
            Ok(Some(mut item)) => {
                item.status = derive_status(&item, self.now());
                Some(item)
            }
            Ok(None) => None,
            Err(e) => {
                error!(id, "Failed to fetch item: {e}");
                None
            }
        }
    }

    /// Add a new not-started item.
    ///
    /// Returns the id it was given, or `None` if it could not be stored. The
    /// id is consumed only once the item is persisted.
    pub fn create(&mut self, name: &str) -> Option<ItemId> {
        let mut timer = OperationTimer::new("create_item");
        let id = match self.storage.fetch_all() {
            Ok(items) => next_free_id(&items, self.free_id),
            Err(e) => {
                warn!("Failed to read existing ids, using counter: {e}");
                self.free_id
            }
        };

        timer.record_item(id);
        let item = Item::new(id, name);
        if let Err(e) = self.storage.add(&item) {
            error!(id, "Failed to add item: {e}");
            return None;
        }
        self.free_id = id.saturating_add(1);
        info!(id, name, "Created item");
        Some(id)
    }

    /// Overwrite the editable fields of an item and stamp `last_update`.
    ///
    /// Returns the updated item, or `None` if it does not exist or could not
    /// be written.
    pub fn update(&mut self, id: ItemId, changes: ItemUpdate) -> Option<Item> {
        let _timer = OperationTimer::for_item("update_item", id);
        let Some(mut item) = self.get(id) else {
            warn!(id, "Update for unknown item ignored");
            return None;
        };

        let now = self.now();
        item.name = changes.name;
        item.description = changes.description;
        item.due = changes.due;
        item.reminder_interval = changes.reminder_interval;
        item.display_status = changes.display_status;
        item.last_update = Some(now);

        if let Err(e) = self.storage.update(&item) {
            error!(id, "Failed to update item: {e}");
            return None;
        }
        item.status = derive_status(&item, now);
        info!(id, status = %item.status, "Updated item");
        Some(item)
    }

    /// Remove an item. Unknown ids are not an error.
    pub fn delete(&mut self, id: ItemId) {
        let _timer = OperationTimer::for_item("delete_item", id);
        match self.storage.delete(id) {
            Ok(()) => info!(id, "Deleted item"),
            Err(e) => error!(id, "Failed to delete item: {e}"),
        }
    }

    /// Close the backing storage.
    pub fn close(self) {
        match self.storage.close() {
            Ok(()) => info!("Storage closed"),
            Err(e) => error!("Failed to close storage: {e}"),
        }
    }
}

/// One past the highest id in `items`, but never below `floor`.
fn next_free_id(items: &[Item], floor: ItemId) -> ItemId {
    items
        .iter()
        .map(|item| item.id.saturating_add(1))
        .fold(floor.max(1), ItemId::max)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
