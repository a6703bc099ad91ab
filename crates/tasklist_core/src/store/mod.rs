//! Persistence ports and adapters.
//!
//! # Responsibility
//! - `kv`: the host key-value facility (get/set/remove string values by key).
//! - `task_store`: read-all / write-all of the task sequence on top of `kv`.
//!
//! # Invariants
//! - The controller only talks to `TaskStore`; it never sees keys or JSON.
//! - Adapters return semantic errors; callers decide whether to degrade.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by persistence adapters.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite rejected an open, read or write.
    Sqlite(rusqlite::Error),
    /// The storage file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Task sequence could not be encoded.
    Serialize(serde_json::Error),
    /// Backend rejected the write for a backend-specific reason.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite storage error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "task storage uses schema {found}; this build reads up to {supported}"
            ),
            Self::Serialize(err) => write!(f, "failed to encode task list: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
