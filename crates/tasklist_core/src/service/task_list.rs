//! Task list controller.
//!
//! # Responsibility
//! - Route add/remove triggers to list and storage mutations.
//! - Replay the persisted sequence into the view once at startup.
//! - Degrade to in-memory operation when storage stops accepting writes.
//!
//! # Invariants
//! - Blank input mutates neither the view nor storage and alerts once.
//! - A successful add appends exactly one entry and one stored text.
//! - Startup replay never writes to storage.
//! - Remove drops exactly one entry and the first equal stored text.
//! - After degradation no further storage calls are made.

use crate::model::task::{EntryId, TaskEntry, TaskText};
use crate::store::task_store::{TaskSnapshot, TaskStore};
use crate::store::StoreError;
use crate::view::TaskListView;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Warning shown when add is attempted with blank input.
pub const EMPTY_TASK_WARNING: &str = "Please enter a task.";
/// Warning shown once when storage fails and the list goes memory-only.
pub const SAVE_FAILED_WARNING: &str =
    "Tasks could not be saved; changes will only last for this session.";
/// Warning shown when saved tasks cannot be read at startup.
pub const LOAD_FAILED_WARNING: &str =
    "Saved tasks could not be loaded; changes will only last for this session.";
/// Key name that submits the input field.
pub const ENTER_KEY: &str = "Enter";

pub type TaskListResult<T> = Result<T, TaskListError>;

/// Controller-level error for add/remove operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// Input was blank after trimming.
    EmptyTask,
    /// Removal targeted an entry that is no longer rendered.
    EntryNotFound(EntryId),
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTask => write!(f, "task text must not be empty"),
            Self::EntryNotFound(id) => write!(f, "task entry not found: {id}"),
        }
    }
}

impl Error for TaskListError {}

/// User-initiated host event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The "add" control was clicked.
    AddClicked,
    /// A key was pressed inside the input field.
    KeyPressed(String),
    /// The removal control of one entry was clicked.
    RemoveClicked(EntryId),
}

/// What a dispatched trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Added(EntryId),
    Removed(TaskText),
    Ignored,
}

/// Bridges host triggers to view and storage mutations.
pub struct TaskListController<S: TaskStore, V: TaskListView> {
    store: S,
    view: V,
    entries: Vec<TaskEntry>,
    loaded: bool,
    degraded: bool,
}

impl<S: TaskStore, V: TaskListView> TaskListController<S, V> {
    fn new(store: S, view: V) -> Self {
        Self {
            store,
            view,
            entries: Vec::new(),
            loaded: false,
            degraded: false,
        }
    }

    /// Creates a controller and runs the startup load.
    ///
    /// This is the only constructor, so storage is always replayed before
    /// any add or remove can reach it.
    pub fn start(store: S, view: V) -> Self {
        let mut controller = Self::new(store, view);
        controller.load_tasks();
        controller
    }

    /// Replays the persisted sequence into the view without re-persisting.
    ///
    /// Returns the number of entries rendered. `start` already runs it, so
    /// any further call renders nothing and returns `0`.
    pub fn load_tasks(&mut self) -> usize {
        if self.loaded || !self.entries.is_empty() {
            warn!("event=tasks_load module=controller status=skipped reason=already_loaded");
            return 0;
        }
        self.loaded = true;

        let snapshot = match self.store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("event=tasks_load module=controller status=error error={err}");
                self.enter_degraded(&err, LOAD_FAILED_WARNING);
                TaskSnapshot::default()
            }
        };

        let count = snapshot.tasks.len();
        for text in snapshot.tasks {
            self.render(text);
        }
        info!(
            "event=tasks_load module=controller status=ok count={} recovered={}",
            count, snapshot.recovered
        );
        count
    }

    /// Adds a task from `text`, or from the input field when `None`.
    ///
    /// # Errors
    /// - `EmptyTask` when the text is blank; the view is alerted and nothing
    ///   else changes.
    pub fn add_task(&mut self, text: Option<&str>) -> TaskListResult<EntryId> {
        let raw = match text {
            Some(value) => value.to_string(),
            None => self.view.input_value(),
        };
        let task = match TaskText::parse(&raw) {
            Ok(task) => task,
            Err(_) => {
                debug!("event=task_add module=controller status=rejected reason=empty");
                self.view.alert(EMPTY_TASK_WARNING);
                return Err(TaskListError::EmptyTask);
            }
        };

        let chars = task.char_len();
        let id = self.render(task.clone());
        self.persist_with("task_add", |tasks| tasks.push(task));
        info!("event=task_add module=controller status=ok entry={id} chars={chars}");
        Ok(id)
    }

    /// Removes one rendered entry and its first matching stored text.
    ///
    /// # Errors
    /// - `EntryNotFound` when the entry was already removed.
    pub fn remove_task(&mut self, id: EntryId) -> TaskListResult<TaskText> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            warn!("event=task_remove module=controller status=rejected reason=not_found entry={id}");
            return Err(TaskListError::EntryNotFound(id));
        };

        let entry = self.entries.remove(index);
        if !self.view.remove_entry(id) {
            warn!("event=task_remove module=controller status=view_drift entry={id}");
        }
        self.persist_with("task_remove", |tasks| {
            if let Some(position) = tasks.iter().position(|stored| *stored == entry.text) {
                tasks.remove(position);
            }
        });
        info!("event=task_remove module=controller status=ok entry={id}");
        Ok(entry.text)
    }

    /// Dispatches one host trigger.
    pub fn handle(&mut self, trigger: Trigger) -> TaskListResult<TriggerOutcome> {
        match trigger {
            Trigger::AddClicked => self.add_task(None).map(TriggerOutcome::Added),
            Trigger::KeyPressed(key) if key == ENTER_KEY => {
                self.add_task(None).map(TriggerOutcome::Added)
            }
            Trigger::KeyPressed(_) => Ok(TriggerOutcome::Ignored),
            Trigger::RemoveClicked(id) => self.remove_task(id).map(TriggerOutcome::Removed),
        }
    }

    /// Rendered entries in list order.
    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether storage failed and the list is memory-only for this session.
    pub fn is_persistence_degraded(&self) -> bool {
        self.degraded
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn render(&mut self, text: TaskText) -> EntryId {
        let entry = TaskEntry::new(text);
        let id = entry.id;
        self.view.append_entry(&entry);
        self.view.clear_input();
        self.entries.push(entry);
        id
    }

    fn persist_with(&mut self, event: &str, mutate: impl FnOnce(&mut Vec<TaskText>)) {
        if self.degraded {
            debug!("event={event} module=controller status=skipped reason=degraded");
            return;
        }

        let result = self.store.load().and_then(|snapshot| {
            let mut tasks = snapshot.tasks;
            mutate(&mut tasks);
            self.store.save(&tasks)
        });
        if let Err(err) = result {
            error!("event={event} module=controller status=error error={err}");
            self.enter_degraded(&err, SAVE_FAILED_WARNING);
        }
    }

    fn enter_degraded(&mut self, cause: &StoreError, warning: &str) {
        if self.degraded {
            return;
        }
        self.degraded = true;
        warn!("event=storage_degraded module=controller status=memory_only cause={cause}");
        self.view.alert(warning);
    }
}
