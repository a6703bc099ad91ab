//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the validated task text and the rendered entry shape.
//!
//! # Invariants
//! - A task is identified in storage by its text only.
//! - `EntryId` identifies a rendered entry and is never persisted.

pub mod task;
