//! UI surface contract for the task list.
//!
//! # Responsibility
//! - Describe what the controller needs from a host: one input field, one
//!   list container, and a blocking warning.
//! - Provide a headless surface for tests and text hosts.
//!
//! # Invariants
//! - `remove_entry` returns `false` when the entry is no longer rendered.

mod memory;

pub use memory::MemoryView;

use crate::model::task::{EntryId, TaskEntry};

/// Host UI surface driven by `TaskListController`.
pub trait TaskListView {
    /// Current raw value of the text input.
    fn input_value(&self) -> String;
    fn clear_input(&mut self);
    /// Appends an entry, with its removal control, to the end of the list.
    fn append_entry(&mut self, entry: &TaskEntry);
    /// Detaches one entry. Returns whether it was still attached.
    fn remove_entry(&mut self, id: EntryId) -> bool;
    /// Shows a blocking user-facing warning.
    fn alert(&mut self, message: &str);
}
