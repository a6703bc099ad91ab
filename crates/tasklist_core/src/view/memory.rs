//! Headless view that keeps rendered state in memory.

use crate::model::task::{EntryId, TaskEntry};
use crate::view::TaskListView;

/// Headless `TaskListView` that records everything it is asked to show.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    input: String,
    entries: Vec<TaskEntry>,
    alerts: Vec<String>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into the input field.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.text.as_str()).collect()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drains alerts so a host can show each one once.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl TaskListView for MemoryView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_entry(&mut self, entry: &TaskEntry) {
        self.entries.push(entry.clone());
    }

    fn remove_entry(&mut self, id: EntryId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryView;
    use crate::model::task::{TaskEntry, TaskText};
    use crate::view::TaskListView;

    #[test]
    fn remove_entry_reports_detached_entries() {
        let mut view = MemoryView::new();
        let entry = TaskEntry::new(TaskText::parse("A").unwrap());
        view.append_entry(&entry);

        assert!(view.remove_entry(entry.id));
        assert!(!view.remove_entry(entry.id));
        assert!(view.entries().is_empty());
    }

    #[test]
    fn take_alerts_drains() {
        let mut view = MemoryView::new();
        view.alert("first");
        assert_eq!(view.take_alerts(), vec!["first".to_string()]);
        assert!(view.alerts().is_empty());
    }
}
