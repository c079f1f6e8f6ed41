//! Prerequisite resolution within a project.
//!
//! Dependency ids that do not resolve to a task in the snapshot are ignored,
//! i.e. treated as satisfied. Use [`DependencyGraph::dangling`] to surface them.

use std::collections::HashMap;

use atelier_core::entities::Task;
use atelier_core::enums::TaskStatus;

use crate::error::BlockingTask;

/// Id-indexed view over a project's task snapshot.
pub struct DependencyGraph<'a> {
    by_id: HashMap<&'a str, &'a Task>,
}

impl<'a> DependencyGraph<'a> {
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            by_id: tasks.iter().map(|task| (task.id.as_str(), task)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, task_id: &str) -> Option<&'a Task> {
        self.by_id.get(task_id).copied()
    }

    /// Frozen tasks are always blocked; otherwise blocked iff a prerequisite is not `DONE`.
    #[must_use]
    pub fn is_blocked(&self, task: &Task) -> bool {
        task.is_frozen() || self.has_unresolved(task)
    }

    /// Whether any resolvable prerequisite is not `DONE`, ignoring freeze state.
    #[must_use]
    pub fn has_unresolved(&self, task: &Task) -> bool {
        task.dependencies
            .iter()
            .filter_map(|dep| self.get(dep))
            .any(|dep| dep.status != TaskStatus::Done)
    }

    /// Prerequisites not yet `DONE`, in dependency order.
    #[must_use]
    pub fn blocking_tasks(&self, task: &Task) -> Vec<&'a Task> {
        task.dependencies
            .iter()
            .filter_map(|dep| self.get(dep))
            .filter(|dep| dep.status != TaskStatus::Done)
            .collect()
    }

    /// Dependency ids with no matching task in the snapshot.
    #[must_use]
    pub fn dangling<'t>(&self, task: &'t Task) -> Vec<&'t str> {
        task.dependencies
            .iter()
            .map(String::as_str)
            .filter(|dep| !self.by_id.contains_key(*dep))
            .collect()
    }

    /// Tasks that list `task_id` as a prerequisite.
    #[must_use]
    pub fn dependents(&self, task_id: &str) -> Vec<&'a Task> {
        let mut out: Vec<&'a Task> = self
            .by_id
            .values()
            .copied()
            .filter(|task| task.depends_on(task_id))
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

/// See [`DependencyGraph::is_blocked`].
#[must_use]
pub fn is_blocked(task: &Task, all_tasks: &[Task]) -> bool {
    DependencyGraph::new(all_tasks).is_blocked(task)
}

/// See [`DependencyGraph::blocking_tasks`].
#[must_use]
pub fn blocking_tasks<'a>(task: &Task, all_tasks: &'a [Task]) -> Vec<&'a Task> {
    DependencyGraph::new(all_tasks).blocking_tasks(task)
}

pub(crate) fn summarize(tasks: &[&Task]) -> Vec<BlockingTask> {
    tasks.iter().map(|task| BlockingTask::from(*task)).collect()
}
