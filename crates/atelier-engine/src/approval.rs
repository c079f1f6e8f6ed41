//! Two-party approval gate for the start and completion flows.

use atelier_core::entities::{ApprovalFlow, ApprovalVote, Task, TaskApprovals};
use atelier_core::enums::{ApprovalRole, ApprovalStage, ApprovalStatus, TaskStatus, VoteAction};
use atelier_core::identity::Actor;
use chrono::{DateTime, Utc};

use crate::error::EngineError;

/// Apply one vote to one slot of one flow.
///
/// `approve`/`reject` require the actor's capability to match the slot;
/// `revoke` is reserved for oversight and may reset either slot to pending.
///
/// # Errors
///
/// Returns [`EngineError::UnauthorizedVote`] when the actor may not perform
/// `action` on `role`.
pub fn vote(
    flow: &ApprovalFlow,
    task_id: &str,
    role: ApprovalRole,
    action: VoteAction,
    actor: &Actor,
    at: DateTime<Utc>,
) -> Result<ApprovalFlow, EngineError> {
    let allowed = match action {
        VoteAction::Approve | VoteAction::Reject => actor.capability.can_vote_as(role),
        VoteAction::Revoke => actor.capability.is_oversight(),
    };
    if !allowed {
        return Err(EngineError::UnauthorizedVote {
            task_id: task_id.to_string(),
            user_id: actor.user_id.clone(),
            role,
            action,
        });
    }

    let slot = match action {
        VoteAction::Approve => ApprovalVote::cast(ApprovalStatus::Approved, &actor.user_id, at),
        VoteAction::Reject => ApprovalVote::cast(ApprovalStatus::Rejected, &actor.user_id, at),
        VoteAction::Revoke => ApprovalVote::default(),
    };
    Ok(flow.with_slot(role, slot))
}

/// [`vote`] applied to the named flow of a task, returning the updated pair of flows.
///
/// # Errors
///
/// See [`vote`].
pub fn cast_vote(
    task: &Task,
    stage: ApprovalStage,
    role: ApprovalRole,
    action: VoteAction,
    actor: &Actor,
    at: DateTime<Utc>,
) -> Result<TaskApprovals, EngineError> {
    let flow = vote(task.approvals.flow(stage), &task.id, role, action, actor, at)?;
    Ok(task.approvals.with_flow(stage, flow))
}

#[must_use]
pub fn is_satisfied(flow: &ApprovalFlow) -> bool {
    flow.is_satisfied()
}

/// Status a rejection sends the task back to, if any.
///
/// A start rejection lands on `TODO`. A completion rejection undoes one stage:
/// `DONE -> REVIEW`, `REVIEW -> IN_PROGRESS`.
#[must_use]
pub const fn rejection_landing(stage: ApprovalStage, current: TaskStatus) -> Option<TaskStatus> {
    match (stage, current) {
        (_, TaskStatus::OnHold | TaskStatus::Aborted) => None,
        (ApprovalStage::Start, _) => Some(TaskStatus::Todo),
        (ApprovalStage::Completion, TaskStatus::Done) => Some(TaskStatus::Review),
        (ApprovalStage::Completion, TaskStatus::Review) => Some(TaskStatus::InProgress),
        (ApprovalStage::Completion, _) => None,
    }
}
