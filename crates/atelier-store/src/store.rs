//! The task store seam and its in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use atelier_core::entities::{ProjectBounds, Task};

use crate::error::StoreError;

/// Per-project persistence of task documents.
///
/// Writes are last-writer-wins per task id; the store never merges fields.
/// Tasks come back in the order they were first saved.
pub trait TaskStore: Send + Sync {
    /// Every task of the project. Unknown projects are empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn load_project_tasks(&self, project_id: &str) -> Result<Vec<Task>, StoreError>;

    /// Insert or replace the task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn save_task(&self, project_id: &str, task: &Task) -> Result<(), StoreError>;

    /// Remove a task. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn remove_task(&self, project_id: &str, task_id: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn project_bounds(&self, project_id: &str) -> Result<ProjectBounds, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn save_project_bounds(&self, project_id: &str, bounds: ProjectBounds) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ProjectState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) bounds: ProjectBounds,
}

impl ProjectState {
    pub(crate) fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub(crate) fn remove(&mut self, task_id: &str) {
        self.tasks.retain(|task| task.id != task_id);
    }
}

/// Mutex-guarded in-memory store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    projects: Mutex<HashMap<String, ProjectState>>,
}

impl MemoryTaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_project<T>(&self, project_id: &str, f: impl FnOnce(&mut ProjectState) -> T) -> T {
        let mut projects = self.projects.lock().unwrap_or_else(PoisonError::into_inner);
        f(projects.entry(project_id.to_string()).or_default())
    }
}

impl TaskStore for MemoryTaskStore {
    fn load_project_tasks(&self, project_id: &str) -> Result<Vec<Task>, StoreError> {
        Ok(self.with_project(project_id, |project| project.tasks.clone()))
    }

    fn save_task(&self, project_id: &str, task: &Task) -> Result<(), StoreError> {
        self.with_project(project_id, |project| project.upsert(task.clone()));
        Ok(())
    }

    fn remove_task(&self, project_id: &str, task_id: &str) -> Result<(), StoreError> {
        self.with_project(project_id, |project| project.remove(task_id));
        Ok(())
    }

    fn project_bounds(&self, project_id: &str) -> Result<ProjectBounds, StoreError> {
        Ok(self.with_project(project_id, |project| project.bounds))
    }

    fn save_project_bounds(&self, project_id: &str, bounds: ProjectBounds) -> Result<(), StoreError> {
        self.with_project(project_id, |project| project.bounds = bounds);
        Ok(())
    }
}
