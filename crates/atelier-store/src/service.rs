//! Project service: the adapter between callers, the store, and the engine.
//!
//! Every mutation follows the same protocol:
//! 1. Load the latest project snapshot from the store
//! 2. Resolve the acting user's capability
//! 3. Run the engine operation
//! 4. Save the returned task (never on rejection)

use atelier_config::AtelierConfig;
use atelier_core::entities::{NewTask, ProjectBounds, Task};
use atelier_engine::cycles::{CycleAnalysis, DependencyCycles};
use atelier_engine::dependency::DependencyGraph;
use atelier_engine::gantt::GanttLayout;
use atelier_engine::overdue;
use atelier_engine::{BlockingTask, Mutation, MutationContext, TaskEngine};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::ServiceError;
use crate::journal::JsonlTaskStore;
use crate::roles::RoleProvider;
use crate::store::TaskStore;

/// Lock badge data for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockState {
    pub task_id: String,
    pub is_blocked: bool,
    /// Unfinished prerequisites, in dependency order.
    pub blocking: Vec<BlockingTask>,
}

pub struct ProjectService<S, R> {
    store: S,
    roles: R,
    engine: TaskEngine,
}

impl<S: TaskStore, R: RoleProvider> ProjectService<S, R> {
    #[must_use]
    pub const fn new(store: S, roles: R, engine: TaskEngine) -> Self {
        Self {
            store,
            roles,
            engine,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn engine(&self) -> &TaskEngine {
        &self.engine
    }

    /// Create a task in `TODO` under a caller-chosen id.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::TaskExists`] if the id is taken.
    /// - [`ServiceError::Core`] if the draft fails validation.
    pub fn create_task(
        &self,
        project_id: &str,
        task_id: &str,
        draft: NewTask,
    ) -> Result<Task, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        if tasks.iter().any(|task| task.id == task_id) {
            return Err(ServiceError::TaskExists {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
            });
        }

        let task = Task::new(task_id, draft)?;
        let dangling = DependencyGraph::new(&tasks).dangling(&task);
        if !dangling.is_empty() {
            tracing::warn!(project_id, task_id, ?dangling, "new task references unknown tasks");
        }

        self.store.save_task(project_id, &task)?;
        tracing::info!(project_id, task_id, "task created");
        Ok(task)
    }

    /// Remove a task from the project.
    ///
    /// Dependents keep their now-dangling edges, which then count as satisfied.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TaskNotFound`] for unknown ids.
    pub fn delete_task(&self, project_id: &str, task_id: &str) -> Result<Task, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        let task = find(&tasks, project_id, task_id)?.clone();

        let orphaned: Vec<&str> = DependencyGraph::new(&tasks)
            .dependents(task_id)
            .into_iter()
            .map(|dependent| dependent.id.as_str())
            .collect();
        if !orphaned.is_empty() {
            tracing::warn!(project_id, task_id, ?orphaned, "deleted task is still a prerequisite");
        }

        self.store.remove_task(project_id, task_id)?;
        tracing::info!(project_id, task_id, "task deleted");
        Ok(task)
    }

    /// Apply one mutation on behalf of `user_id` against the freshest snapshot.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::TaskNotFound`] for unknown ids.
    /// - [`ServiceError::Rejected`] when the engine refuses; nothing is saved.
    pub fn apply(
        &self,
        project_id: &str,
        user_id: &str,
        task_id: &str,
        mutation: &Mutation,
        now: DateTime<Utc>,
    ) -> Result<Task, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        let task = find(&tasks, project_id, task_id)?;
        let actor = self.roles.actor(project_id, user_id);

        let next = self
            .engine
            .apply(task, mutation, &MutationContext::new(&actor, &tasks, now))
            .inspect_err(|err| {
                tracing::debug!(project_id, task_id, user_id, error = %err, "mutation rejected");
            })?;

        if next != *task {
            self.store.save_task(project_id, &next)?;
        }
        Ok(next)
    }

    /// Render the project timeline.
    ///
    /// The layout borrows the loaded snapshot, so it is handed to `render`
    /// rather than returned.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the snapshot cannot be loaded.
    pub fn layout<T>(
        &self,
        project_id: &str,
        render: impl FnOnce(&GanttLayout<'_>) -> T,
    ) -> Result<T, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        let bounds = self.store.project_bounds(project_id)?;
        Ok(render(&self.engine.layout(&tasks, bounds)))
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the write fails.
    pub fn set_bounds(&self, project_id: &str, bounds: ProjectBounds) -> Result<(), ServiceError> {
        self.store.save_project_bounds(project_id, bounds)?;
        Ok(())
    }

    /// Blocked flag and blocking prerequisites of every task, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the snapshot cannot be loaded.
    pub fn lock_states(&self, project_id: &str) -> Result<Vec<LockState>, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        let graph = DependencyGraph::new(&tasks);
        Ok(tasks
            .iter()
            .map(|task| LockState {
                task_id: task.id.clone(),
                is_blocked: graph.is_blocked(task),
                blocking: graph
                    .blocking_tasks(task)
                    .into_iter()
                    .map(BlockingTask::from)
                    .collect(),
            })
            .collect())
    }

    /// Mark every eligible task past its due date as `OVERDUE` and persist it.
    ///
    /// Returns the tasks that changed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if loading or saving fails.
    pub fn sweep_overdue(&self, project_id: &str, today: NaiveDate) -> Result<Vec<Task>, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        let swept = overdue::sweep_overdue(&tasks, today);
        for task in &swept {
            self.store.save_task(project_id, task)?;
        }
        if !swept.is_empty() {
            tracing::info!(project_id, count = swept.len(), %today, "tasks marked overdue");
        }
        Ok(swept)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the snapshot cannot be loaded.
    pub fn cycles(&self, project_id: &str) -> Result<CycleAnalysis, ServiceError> {
        let tasks = self.store.load_project_tasks(project_id)?;
        Ok(DependencyCycles::new(&tasks).analyze())
    }
}

impl<R: RoleProvider> ProjectService<JsonlTaskStore, R> {
    /// Journal store under `config.store.data_dir`, engine tuned by `config.gantt`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the data directory cannot be created.
    pub fn from_config(config: &AtelierConfig, roles: R) -> Result<Self, ServiceError> {
        let store = JsonlTaskStore::from_config(&config.store)?;
        Ok(Self::new(store, roles, TaskEngine::new(config.gantt.clone())))
    }
}

fn find<'a>(tasks: &'a [Task], project_id: &str, task_id: &str) -> Result<&'a Task, ServiceError> {
    tasks
        .iter()
        .find(|task| task.id == task_id)
        .ok_or_else(|| ServiceError::TaskNotFound {
            project_id: project_id.to_string(),
            task_id: task_id.to_string(),
        })
}
