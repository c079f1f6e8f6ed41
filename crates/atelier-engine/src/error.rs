//! Engine rejection types.
//!
//! Every variant is a rejection: the task handed to the engine is never
//! modified, and callers must not persist anything when they receive one.

use atelier_core::entities::Task;
use atelier_core::enums::{ApprovalRole, ApprovalStage, TaskStatus, VoteAction};
use serde::Serialize;
use thiserror::Error;

/// A prerequisite that is not yet `DONE`, carried for "blocked by" messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingTask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
}

impl From<&Task> for BlockingTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
        }
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Mutation attempted on an `ON_HOLD`/`ABORTED` task by something other than resume.
    #[error("action denied: task {task_id} is frozen ({status})")]
    FrozenTask { task_id: String, status: TaskStatus },

    /// Forward transition attempted while prerequisites are incomplete.
    #[error("task {task_id} is blocked by: {}", blocking_titles(.blocking))]
    DependencyBlocked {
        task_id: String,
        blocking: Vec<BlockingTask>,
    },

    /// The named approval flow must be satisfied (or cleared of rejections) first.
    #[error("task {task_id} needs {stage} approval")]
    ApprovalRequired { task_id: String, stage: ApprovalStage },

    /// The voter does not hold the capability for this slot or action.
    #[error("user {user_id} may not {action} the {role} slot of task {task_id}")]
    UnauthorizedVote {
        task_id: String,
        user_id: String,
        role: ApprovalRole,
        action: VoteAction,
    },

    /// Non-vote action attempted without the required role.
    #[error("user {user_id} may not {action} task {task_id}")]
    Unauthorized {
        task_id: String,
        user_id: String,
        action: &'static str,
    },

    /// A task's dependency set was made to include itself.
    #[error("task {task_id} cannot depend on itself")]
    SelfDependency { task_id: String },

    /// The requested status change is not available from the current state.
    #[error("task {task_id}: cannot move from {from} to {to}: {reason}")]
    InvalidTransition {
        task_id: String,
        from: TaskStatus,
        to: String,
        reason: &'static str,
    },

    #[error("task {task_id} has no checklist item {item_id}")]
    ChecklistItemNotFound { task_id: String, item_id: String },

    #[error("task {task_id} already has checklist item {item_id}")]
    DuplicateChecklistItem { task_id: String, item_id: String },
}

fn blocking_titles(blocking: &[BlockingTask]) -> String {
    blocking
        .iter()
        .map(|task| task.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
