//! SQLite bootstrap backing `SqliteKeyValueStore`.
//!
//! Connections come back with the `kv_entries` schema migrated to
//! `migrations::latest_version()`; failures surface as `StoreError`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
