//! Use-case services.
//!
//! # Responsibility
//! - Turn host triggers into list and storage mutations.
//! - Keep hosts decoupled from storage details.

pub mod task_list;
