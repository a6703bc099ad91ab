//! Key-value storage contracts and adapters.
//!
//! # Responsibility
//! - Model the host's local storage facility as a string-to-string map.
//! - Provide an in-process adapter and a SQLite-backed durable adapter.
//!
//! # Invariants
//! - `set_item` fully replaces any previous value under the same key.
//! - `get_item` on an absent key returns `Ok(None)`, never an error.

use crate::db::{open_db, open_db_in_memory};
use crate::store::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Host key-value persistence facility.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// In-process key-value store.
///
/// Clones share the same map, so a test or host can keep a handle and
/// inspect what the controller wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// SQLite-backed durable key-value store.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) a store file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

    #[test]
    fn memory_store_clones_share_items() {
        let store = MemoryKeyValueStore::new();
        let handle = store.clone();

        store.set_item("tasks", "[]").unwrap();
        assert_eq!(handle.get_item("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(handle.len(), 1);

        handle.remove_item("tasks").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn sqlite_store_overwrites_existing_value() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();

        assert_eq!(store.get_item("tasks").unwrap(), None);
        store.set_item("tasks", "[\"A\"]").unwrap();
        store.set_item("tasks", "[\"B\"]").unwrap();
        assert_eq!(
            store.get_item("tasks").unwrap().as_deref(),
            Some("[\"B\"]")
        );

        store.remove_item("tasks").unwrap();
        assert_eq!(store.get_item("tasks").unwrap(), None);
    }

    #[test]
    fn removing_absent_key_is_not_an_error() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        store.remove_item("missing").unwrap();
    }
}
