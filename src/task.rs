//! Task records and the persisted task collection.
//!
//! The collection lives under a single storage key as a JSON array of
//! `{"id", "description", "isCompleted"}` records and is rewritten in full
//! after every mutation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::{Backend, Persisted};

/// Default storage key for the collection
pub const DEFAULT_KEY: &str = "tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub is_completed: bool,
}

impl Task {
    fn new(id: String, description: &str) -> Self {
        Self {
            id,
            description: description.to_string(),
            is_completed: false,
        }
    }
}

/// Ordered task collection backed by a store key.
#[derive(Debug)]
pub struct TaskList<B> {
    cell: Persisted<Vec<Task>, B>,
}

impl<B: Backend> TaskList<B> {
    /// Load the collection; absent or corrupt data yields an empty list.
    pub fn load(backend: B, key: impl Into<String>) -> Self {
        let cell = Persisted::load(backend, key, Vec::new());
        tracing::debug!(key = cell.key(), count = cell.get().len(), "loaded tasks");
        Self { cell }
    }

    pub fn tasks(&self) -> &[Task] {
        self.cell.get()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks().iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }

    pub fn backend(&self) -> &B {
        self.cell.backend()
    }

    /// True when the stored collection was unreadable and loaded as empty
    pub fn recovered_from_corrupt(&self) -> bool {
        self.cell.discarded()
    }

    /// Append a new incomplete task.
    ///
    /// The description is stored as typed; only the emptiness check trims.
    pub fn add(&mut self, description: &str) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        let task = Task::new(self.fresh_id(), description);
        let mut tasks = self.tasks().to_vec();
        tasks.push(task.clone());
        self.cell.set(tasks)?;
        tracing::debug!(id = %task.id, "added task");
        Ok(task)
    }

    /// Flip completion of `id`. Unknown ids are a no-op and nothing is written.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.tasks().iter().position(|task| task.id == id) else {
            tracing::debug!(id, "toggle ignored, no such task");
            return Ok(false);
        };

        let mut tasks = self.tasks().to_vec();
        tasks[index].is_completed = !tasks[index].is_completed;
        self.cell.set(tasks)?;
        tracing::debug!(id, "toggled task");
        Ok(true)
    }

    /// Remove `id` and persist. Returns whether a task was removed; callers
    /// report success either way.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.len();
        let tasks: Vec<Task> = self
            .tasks()
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        let removed = tasks.len() != before;
        self.cell.set(tasks)?;
        tracing::debug!(id, removed, "deleted task");
        Ok(removed)
    }

    /// Drop every task and the stored key.
    pub fn clear(&mut self) -> Result<usize> {
        let count = self.len();
        self.cell.clear(Vec::new())?;
        tracing::debug!(count, "cleared tasks");
        Ok(count)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
