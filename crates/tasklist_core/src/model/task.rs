//! Task text and rendered entry types.
//!
//! # Responsibility
//! - Normalize user input into a storable task text.
//! - Pair each rendered entry with a per-render identity.
//!
//! # Invariants
//! - `TaskText` produced by `parse` is trimmed and non-empty.
//! - `EntryId` values are generated per render and never reused.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identity of one rendered entry in the visual list.
///
/// Two entries with the same text still have distinct ids, so a removal
/// trigger always targets exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh entry id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation error for user-submitted task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Input was empty or whitespace-only.
    Empty,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Task description as shown and stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskText(String);

impl TaskText {
    /// Trims raw input and rejects blank values.
    pub fn parse(raw: &str) -> Result<Self, TaskValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps text read back from storage as-is.
    ///
    /// Stored values are replayed verbatim so the rendered list keeps matching
    /// the persisted sequence, even for entries written by older hosts.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Character count, used for metadata-only logging.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Display for TaskText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// One rendered task in the visual list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub id: EntryId,
    pub text: TaskText,
}

impl TaskEntry {
    /// Creates an entry with a freshly generated id.
    pub fn new(text: TaskText) -> Self {
        Self {
            id: EntryId::new(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryId, TaskEntry, TaskText, TaskValidationError};

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let text = TaskText::parse("  Buy milk \n").expect("non-blank input should parse");
        assert_eq!(text.as_str(), "Buy milk");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(TaskText::parse(""), Err(TaskValidationError::Empty));
        assert_eq!(TaskText::parse(" \t\r\n"), Err(TaskValidationError::Empty));
    }

    #[test]
    fn from_stored_keeps_value_verbatim() {
        let text = TaskText::from_stored("  padded ".to_string());
        assert_eq!(text.as_str(), "  padded ");
    }

    #[test]
    fn entries_with_same_text_get_distinct_ids() {
        let text = TaskText::parse("A").unwrap();
        let first = TaskEntry::new(text.clone());
        let second = TaskEntry::new(text);
        assert_ne!(first.id, second.id);
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn task_text_serializes_as_plain_string() {
        let text = TaskText::parse("A").unwrap();
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"A\"");
    }
}
