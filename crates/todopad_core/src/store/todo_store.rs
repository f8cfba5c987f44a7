//! The task store: canonical collection, edit session and form staging.
//!
//! # Responsibility
//! - Own the ordered task collection and every mutation on it.
//! - Enforce name validation at the create/update boundary, surfaced
//!   through the form error rather than returned errors.
//! - Persist after each successful mutation, tolerating write failures.
//!
//! # Invariants
//! - `initialize` runs once per store; no write is attempted before it.
//! - At most one task is being edited at a time.
//! - Invalid form input never reaches the collection: the staging buffer
//!   absorbs it and the targeted task stays untouched.
//! - Every mutation is all-or-nothing with respect to in-memory state.

use crate::model::todo::{validate_name, Priority, Todo, TodoId};
use crate::repo::todo_repo::TodoRepository;
use crate::seed::seed_todos;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::cmp::Reverse;

/// Staging buffer for the add/edit form.
///
/// Holds candidate values and the current name-validation error,
/// independently of any stored task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub name: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub name_error: Option<String>,
}

/// Owns the canonical task collection for one session.
///
/// All reads hand out borrows; all mutations go through the operations
/// below. Single-threaded by design, so no interior locking.
pub struct TodoStore<R: TodoRepository> {
    repo: R,
    todos: Vec<Todo>,
    editing: Option<TodoId>,
    form: TodoForm,
    initialized: bool,
}

impl<R: TodoRepository> TodoStore<R> {
    /// Creates an empty, uninitialized store over the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            todos: Vec::new(),
            editing: None,
            form: TodoForm::default(),
            initialized: false,
        }
    }

    /// Installs the collection from storage, falling back to seed data.
    ///
    /// Runs once per store; repeated calls are logged no-ops. A load
    /// failure counts as "no prior state" rather than aborting startup.
    pub fn initialize(&mut self) {
        if self.initialized {
            warn!("event=store_init module=store status=skipped reason=already_initialized");
            return;
        }

        self.todos = match self.repo.load() {
            Ok(Some(todos)) => {
                info!(
                    "event=store_init module=store status=ok source=storage count={}",
                    todos.len()
                );
                todos
            }
            Ok(None) => {
                let seeded = seed_todos();
                info!(
                    "event=store_init module=store status=ok source=seed count={}",
                    seeded.len()
                );
                seeded
            }
            Err(err) => {
                let seeded = seed_todos();
                warn!(
                    "event=store_init module=store status=degraded source=seed error={err}"
                );
                seeded
            }
        };
        self.initialized = true;
    }

    /// Adds a new task from candidate values.
    ///
    /// On a name-validation failure the candidates and the error message
    /// land in the form and the collection stays unchanged. On success the
    /// form is cleared and any edit session ends.
    pub fn create(&mut self, name: &str, priority: Priority, deadline: Option<DateTime<Utc>>) {
        match Todo::new(name, priority, deadline) {
            Ok(todo) => {
                debug!("event=todo_create module=store status=ok id={}", todo.id);
                self.todos.push(todo);
                self.form = TodoForm::default();
                self.editing = None;
                self.persist();
            }
            Err(err) => {
                self.form.name = name.to_string();
                self.form.priority = priority;
                self.form.deadline = deadline;
                self.form.name_error = Some(err.to_string());
            }
        }
    }

    /// Starts an edit session for `id`, staging its current values.
    ///
    /// Unknown ids are a silent no-op: no session starts, the form stays
    /// as it was.
    pub fn begin_edit(&mut self, id: TodoId) {
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            return;
        };
        self.form = TodoForm {
            name: todo.name.clone(),
            priority: todo.priority,
            deadline: todo.deadline,
            name_error: None,
        };
        self.editing = Some(id);
    }

    /// Stages a candidate name, re-validating on every change.
    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
        self.form.name_error = validate_name(&self.form.name)
            .err()
            .map(|err| err.to_string());
    }

    /// Stages a candidate priority.
    pub fn set_form_priority(&mut self, priority: Priority) {
        self.form.priority = priority;
    }

    /// Stages a candidate deadline; `None` clears it.
    pub fn set_form_deadline(&mut self, deadline: Option<DateTime<Utc>>) {
        self.form.deadline = deadline;
    }

    /// Applies the staged values to the task under edit.
    ///
    /// Only acts while a session is active. A failed validation keeps the
    /// session open with the error in the form; on success name, priority
    /// and deadline are replaced in place while `id` and the completion
    /// flag stay untouched.
    pub fn update(&mut self) {
        let Some(id) = self.editing else {
            return;
        };

        if let Err(err) = validate_name(&self.form.name) {
            self.form.name_error = Some(err.to_string());
            return;
        }

        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            todo.name = self.form.name.clone();
            todo.priority = self.form.priority;
            todo.deadline = self.form.deadline;
            debug!("event=todo_update module=store status=ok id={id}");
        }

        self.form = TodoForm::default();
        self.editing = None;
        self.persist();
    }

    /// Ends the edit session and discards staged values.
    pub fn cancel_edit(&mut self) {
        self.form = TodoForm::default();
        self.editing = None;
    }

    /// Sets the completion flag of `id`. Silent no-op when absent.
    pub fn toggle_done(&mut self, id: TodoId, value: bool) {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return;
        };
        todo.is_done = value;
        self.persist();
    }

    /// Removes the task matching `id`. Silent no-op when absent.
    pub fn remove(&mut self, id: TodoId) {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() != before {
            self.persist();
        }
    }

    /// Removes every completed task. Always writes, even when nothing
    /// matched.
    pub fn remove_completed(&mut self) {
        self.todos.retain(|todo| !todo.is_done);
        self.persist();
    }

    /// Reorders ascending by deadline; tasks without one go last.
    ///
    /// Stable, so equal deadlines and the no-deadline tail keep their
    /// relative order. The new order becomes the persisted order.
    pub fn sort_by_deadline(&mut self) {
        self.todos
            .sort_by_key(|todo| (todo.deadline.is_none(), todo.deadline));
        self.persist();
    }

    /// Reorders descending by priority (3 before 1), stable on ties.
    pub fn sort_by_priority(&mut self) {
        self.todos.sort_by_key(|todo| Reverse(todo.priority));
        self.persist();
    }

    /// Returns the number of tasks not yet done.
    pub fn uncompleted_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.is_done).count()
    }

    /// Read-only view of the collection in its current order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The id under edit, if a session is active.
    pub fn editing(&self) -> Option<TodoId> {
        self.editing
    }

    /// Read-only view of the staging form.
    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    /// Writes the collection out. Failures are non-fatal: in-memory state
    /// stays authoritative and the next mutation retries.
    fn persist(&mut self) {
        if !self.initialized {
            warn!("event=todo_save module=store status=skipped reason=not_initialized");
            return;
        }
        if let Err(err) = self.repo.save(&self.todos) {
            warn!("event=todo_save module=store status=error error={err}");
        }
    }
}
