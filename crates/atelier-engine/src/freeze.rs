//! Administrative on-hold / aborted override.
//!
//! While a task is frozen every automated mutation is rejected; only an
//! oversight actor can abort it further or resume it.
//!
//! Comments are exempt: a frozen task still accepts them from anyone allowed
//! to comment.

use atelier_core::entities::Task;
use atelier_core::enums::{FreezeKind, TaskStatus};
use atelier_core::identity::Actor;

use crate::deriver;
use crate::error::EngineError;

/// Reject a mutation on a frozen task. Callers skip this for freeze, resume and comments.
///
/// # Errors
///
/// Returns [`EngineError::FrozenTask`] if the task is `ON_HOLD` or `ABORTED`.
pub fn ensure_not_frozen(task: &Task) -> Result<(), EngineError> {
    if task.is_frozen() {
        return Err(EngineError::FrozenTask {
            task_id: task.id.clone(),
            status: task.status,
        });
    }
    Ok(())
}

fn require_oversight(task: &Task, actor: &Actor, action: &'static str) -> Result<(), EngineError> {
    if actor.capability.is_oversight() {
        Ok(())
    } else {
        Err(EngineError::Unauthorized {
            task_id: task.id.clone(),
            user_id: actor.user_id.clone(),
            action,
        })
    }
}

/// Put a task on hold or abort it, regardless of checklist and dependency state.
///
/// Freezing into the current frozen status is a no-op. `ON_HOLD -> ABORTED`
/// is allowed; an aborted task can only be restored, not put on hold.
///
/// # Errors
///
/// - [`EngineError::Unauthorized`] for non-oversight actors.
/// - [`EngineError::FrozenTask`] when putting an aborted task on hold.
pub fn freeze(task: &Task, kind: FreezeKind, actor: &Actor) -> Result<Task, EngineError> {
    require_oversight(task, actor, "freeze")?;

    let target = kind.status();
    if task.status == target {
        return Ok(task.clone());
    }
    if task.status == TaskStatus::Aborted {
        return Err(EngineError::FrozenTask {
            task_id: task.id.clone(),
            status: task.status,
        });
    }

    tracing::info!(task_id = %task.id, from = %task.status, to = %target, "task frozen");
    let mut next = task.clone();
    next.status = target;
    Ok(next)
}

/// Leave the frozen state, landing on the status the checklist and approvals imply.
///
/// Dependencies are not consulted: resuming is an explicit oversight decision.
///
/// # Errors
///
/// - [`EngineError::Unauthorized`] for non-oversight actors.
/// - [`EngineError::InvalidTransition`] if the task is not frozen.
pub fn resume(task: &Task, actor: &Actor) -> Result<Task, EngineError> {
    require_oversight(task, actor, "resume")?;

    if !task.is_frozen() {
        return Err(EngineError::InvalidTransition {
            task_id: task.id.clone(),
            from: task.status,
            to: "resumed".into(),
            reason: "task is not frozen",
        });
    }

    let mut next = task.clone();
    next.status = deriver::resumed_status(task);
    tracing::info!(task_id = %task.id, from = %task.status, to = %next.status, "task resumed");
    Ok(next)
}
