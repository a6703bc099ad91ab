//! Task sequence persistence over a key-value store.
//!
//! # Responsibility
//! - Read and write the whole ordered task sequence under one storage key.
//! - Encode the sequence as a JSON array of strings.
//!
//! # Invariants
//! - An absent key reads as an empty sequence.
//! - A value that is not a JSON array of strings reads as an empty sequence
//!   and is reported through `TaskSnapshot::recovered`.
//! - Order is preserved exactly across `save` then `load`.

use crate::model::task::TaskText;
use crate::store::kv::KeyValueStore;
use crate::store::StoreResult;
use log::{debug, warn};

/// Result of reading the persisted sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Persisted task texts in stored order.
    pub tasks: Vec<TaskText>,
    /// Set when the stored value was unreadable and replaced by empty.
    pub recovered: bool,
}

/// Read-all / write-all access to the persisted task sequence.
pub trait TaskStore {
    fn load(&self) -> StoreResult<TaskSnapshot>;
    fn save(&self, tasks: &[TaskText]) -> StoreResult<()>;
}

/// `TaskStore` that keeps the sequence as JSON under a fixed key.
pub struct KeyValueTaskStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueTaskStore<S> {
    pub fn new(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}

impl<S: KeyValueStore> TaskStore for KeyValueTaskStore<S> {
    fn load(&self) -> StoreResult<TaskSnapshot> {
        let Some(raw) = self.kv.get_item(&self.key)? else {
            debug!("event=tasks_load module=store status=absent");
            return Ok(TaskSnapshot::default());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(values) => Ok(TaskSnapshot {
                tasks: values.into_iter().map(TaskText::from_stored).collect(),
                recovered: false,
            }),
            Err(err) => {
                warn!(
                    "event=tasks_load module=store status=recovered reason=parse_failed bytes={} error={}",
                    raw.len(),
                    err
                );
                Ok(TaskSnapshot {
                    tasks: Vec::new(),
                    recovered: true,
                })
            }
        }
    }

    fn save(&self, tasks: &[TaskText]) -> StoreResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.kv.set_item(&self.key, &encoded)?;
        debug!(
            "event=tasks_save module=store status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}
