//! Core logic for the task list.
//! The controller here owns every list/storage invariant; hosts only render
//! and forward triggers.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError, ConfigOverrides, StorageBackend, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::task::{EntryId, TaskEntry, TaskText, TaskValidationError};
pub use service::task_list::{
    TaskListController, TaskListError, TaskListResult, Trigger, TriggerOutcome, EMPTY_TASK_WARNING,
    ENTER_KEY, LOAD_FAILED_WARNING, SAVE_FAILED_WARNING,
};
pub use store::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::task_store::{KeyValueTaskStore, TaskSnapshot, TaskStore};
pub use store::{StoreError, StoreResult};
pub use view::{MemoryView, TaskListView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
