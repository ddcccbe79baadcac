use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Storage, StorageError};
use crate::item::{due_instant, DisplayStatus, Item, ItemId, Status};

pub const DB_FILENAME: &str = "main.db";
pub const ITEMS_TABLE: &str = "items";

const SELECT_COLUMNS: &str =
    "id, display_status, name, description, due, reminder_interval, last_update";

/// Default database location, `~/.one-list/main.db`.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".one-list")
        .join(DB_FILENAME)
}

/// SQLite-backed item storage.
///
/// Dates are stored as Unix seconds with 0 meaning "not set".
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (creating if needed) the database file and its `items` table.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if db_path.exists() {
            info!("Database already exists: {}", db_path.display());
        } else {
            info!("Database created: {}", db_path.display());
        }

        let conn = Connection::open(db_path)?;
        let mut storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let mut storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }
}

impl Storage for SqliteStorage {
    fn init(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {ITEMS_TABLE} (
                id INTEGER PRIMARY KEY NOT NULL,
                display_status INTEGER NOT NULL DEFAULT 1,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due INTEGER NOT NULL DEFAULT 0,
                reminder_interval INTEGER NOT NULL DEFAULT 0,
                last_update INTEGER NOT NULL DEFAULT 0
            );
            "
        ))?;
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Item>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SELECT_COLUMNS} FROM {ITEMS_TABLE} ORDER BY id"))?;
        let rows = stmt.query_map([], ItemRow::from_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.into_item()?);
        }
        Ok(items)
    }

    fn fetch_one(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM {ITEMS_TABLE} WHERE id = ?1"),
                params![id],
                ItemRow::from_row,
            )
            .optional()?;
        row.map(ItemRow::into_item).transpose()
    }

    fn add(&mut self, item: &Item) -> Result<(), StorageError> {
        let row = ItemRow::from_item(item);
        self.conn.execute(
            &format!(
                "INSERT INTO {ITEMS_TABLE} ({SELECT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            params![
                row.id,
                row.display_status,
                row.name,
                row.description,
                row.due,
                row.reminder_interval,
                row.last_update,
            ],
        )?;
        debug!(id = item.id, "Inserted item");
        Ok(())
    }

    fn update(&mut self, item: &Item) -> Result<(), StorageError> {
        let row = ItemRow::from_item(item);
        let changed = self.conn.execute(
            &format!(
                "UPDATE {ITEMS_TABLE} SET display_status = ?1, name = ?2, description = ?3, \
                 due = ?4, reminder_interval = ?5, last_update = ?6 WHERE id = ?7"
            ),
            params![
                row.display_status,
                row.name,
                row.description,
                row.due,
                row.reminder_interval,
                row.last_update,
                row.id,
            ],
        )?;
        debug!(id = item.id, changed, "Updated item");
        Ok(())
    }

    fn delete(&mut self, id: ItemId) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {ITEMS_TABLE} WHERE id = ?1"), params![id])?;
        debug!(id, changed, "Deleted item");
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }
}

/// Column-level representation of an item.
struct ItemRow {
    id: ItemId,
    display_status: i64,
    name: String,
    description: String,
    due: i64,
    reminder_interval: i64,
    last_update: i64,
}

impl ItemRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            display_status: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            due: row.get(4)?,
            reminder_interval: row.get(5)?,
            last_update: row.get(6)?,
        })
    }

    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            display_status: item.display_status.code(),
            name: item.name.clone(),
            description: item.description.clone(),
            due: item.due.map_or(0, |due| due_instant(due).timestamp()),
            reminder_interval: i64::from(item.reminder_interval),
            last_update: item.last_update.map_or(0, |t| t.timestamp()),
        }
    }

    fn into_item(self) -> Result<Item, StorageError> {
        let id = self.id;
        let invalid = |reason: String| StorageError::InvalidRecord { id, reason };
        let due = unix_to_datetime(self.due)
            .map_err(|secs| invalid(format!("due timestamp {secs} out of range")))?
            .map(|dt| dt.date_naive());
        let last_update = unix_to_datetime(self.last_update)
            .map_err(|secs| invalid(format!("last_update timestamp {secs} out of range")))?;
        // Negative intervals never fire, same as 0.
        let reminder_interval = u32::try_from(self.reminder_interval).unwrap_or(0);

        Ok(Item {
            id,
            name: self.name,
            description: self.description,
            due,
            reminder_interval,
            last_update,
            display_status: DisplayStatus::from_code(self.display_status),
            status: Status::default(),
        })
    }
}

fn unix_to_datetime(secs: i64) -> Result<Option<DateTime<Utc>>, i64> {
    if secs == 0 {
        return Ok(None);
    }
    DateTime::from_timestamp(secs, 0).map(Some).ok_or(secs)
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
