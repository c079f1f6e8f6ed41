//! Lifecycle status derivation.
//!
//! Checklist-bearing tasks have their status computed from checklist
//! completion and approval state. Checklist-free tasks are driven by manual
//! actions and only reconciled against the completion flow. Frozen tasks are
//! never touched here.

use atelier_core::entities::Task;
use atelier_core::enums::{ApprovalStage, TaskStatus};

use crate::error::EngineError;

/// Status implied by the task's checklist, approvals, and current status.
///
/// Idempotent: deriving from an already-derived task returns the same status.
#[must_use]
pub fn derive_status(task: &Task) -> TaskStatus {
    if task.is_frozen() {
        return task.status;
    }
    derive_unfrozen(task, task.status)
}

/// Status a frozen task lands on when resumed.
///
/// Checklist-free tasks default to `IN_PROGRESS`.
#[must_use]
pub fn resumed_status(task: &Task) -> TaskStatus {
    derive_unfrozen(task, TaskStatus::InProgress)
}

fn derive_unfrozen(task: &Task, current: TaskStatus) -> TaskStatus {
    let completion = &task.approvals.completion;

    let Some(progress) = task.progress() else {
        return match current {
            TaskStatus::Review if completion.is_satisfied() => TaskStatus::Done,
            TaskStatus::Done if !completion.is_satisfied() => TaskStatus::Review,
            other => other,
        };
    };

    if task.approvals.start.has_rejection() || progress.is_untouched() {
        return TaskStatus::Todo;
    }
    if !progress.is_complete() {
        return TaskStatus::InProgress;
    }
    if completion.is_satisfied() {
        return TaskStatus::Done;
    }
    match current {
        TaskStatus::InProgress | TaskStatus::Review if completion.has_rejection() => current,
        _ => TaskStatus::Review,
    }
}

/// Next status for the manual "advance" action on a checklist-free task.
///
/// Cycles `TODO -> IN_PROGRESS -> REVIEW -> DONE -> IN_PROGRESS`; an overdue
/// task advances to `IN_PROGRESS`. Approval checks happen in [`check_manual_target`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidTransition`] for checklist-driven tasks and
/// [`EngineError::FrozenTask`] for frozen ones.
pub fn advance_target(task: &Task) -> Result<TaskStatus, EngineError> {
    if task.has_checklist() {
        return Err(EngineError::InvalidTransition {
            task_id: task.id.clone(),
            from: task.status,
            to: "next stage".into(),
            reason: "status is derived from the checklist",
        });
    }
    match task.status {
        TaskStatus::Todo | TaskStatus::Overdue | TaskStatus::Done => Ok(TaskStatus::InProgress),
        TaskStatus::InProgress => Ok(TaskStatus::Review),
        TaskStatus::Review => Ok(TaskStatus::Done),
        TaskStatus::OnHold | TaskStatus::Aborted => Err(EngineError::FrozenTask {
            task_id: task.id.clone(),
            status: task.status,
        }),
    }
}

/// Validate a manual move of a checklist-free task to `target`.
///
/// # Errors
///
/// - [`EngineError::InvalidTransition`] if the task has a checklist or `target`
///   is not a manual status.
/// - [`EngineError::ApprovalRequired`] for `DONE` without a satisfied completion
///   flow, or any forward move while the start flow holds a rejection.
pub fn check_manual_target(task: &Task, target: TaskStatus) -> Result<(), EngineError> {
    if !target.is_manual_target() {
        return Err(EngineError::InvalidTransition {
            task_id: task.id.clone(),
            from: task.status,
            to: target.to_string(),
            reason: "status cannot be set manually",
        });
    }
    if task.has_checklist() {
        return Err(EngineError::InvalidTransition {
            task_id: task.id.clone(),
            from: task.status,
            to: target.to_string(),
            reason: "status is derived from the checklist",
        });
    }
    if target == TaskStatus::Done && !task.approvals.completion.is_satisfied() {
        return Err(EngineError::ApprovalRequired {
            task_id: task.id.clone(),
            stage: ApprovalStage::Completion,
        });
    }
    if target != TaskStatus::Todo && task.approvals.start.has_rejection() {
        return Err(EngineError::ApprovalRequired {
            task_id: task.id.clone(),
            stage: ApprovalStage::Start,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{completion_approved, task, with_checklist, with_status, with_vote};
    use atelier_core::enums::{ApprovalRole, ApprovalStatus};
    use rstest::rstest;

    #[rstest]
    #[case::untouched(&[false, false], TaskStatus::Todo)]
    #[case::partial(&[true, false, false], TaskStatus::InProgress)]
    #[case::almost(&[true, true, false], TaskStatus::InProgress)]
    #[case::complete_unapproved(&[true, true], TaskStatus::Review)]
    fn checklist_ratio_drives_status(#[case] states: &[bool], #[case] expected: TaskStatus) {
        let t = with_checklist(task("tsk-1"), states);
        assert_eq!(derive_status(&t), expected);
    }

    #[test]
    fn complete_and_approved_is_done() {
        let t = completion_approved(with_checklist(task("tsk-1"), &[true, true]));
        assert_eq!(derive_status(&t), TaskStatus::Done);
    }

    #[test]
    fn done_with_unsatisfied_completion_falls_back_to_review() {
        let t = with_status(with_checklist(task("tsk-1"), &[true, true]), TaskStatus::Done);
        assert_eq!(derive_status(&t), TaskStatus::Review);
    }

    #[test]
    fn frozen_status_is_preserved() {
        for status in [TaskStatus::OnHold, TaskStatus::Aborted] {
            let t = with_status(with_checklist(task("tsk-1"), &[true, false]), status);
            assert_eq!(derive_status(&t), status);
        }
    }

    #[test]
    fn checklist_free_task_keeps_manual_status() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Overdue,
        ] {
            let t = with_status(task("tsk-1"), status);
            assert_eq!(derive_status(&t), status);
        }
    }

    #[test]
    fn checklist_free_review_completes_on_approval() {
        let t = completion_approved(with_status(task("tsk-1"), TaskStatus::Review));
        assert_eq!(derive_status(&t), TaskStatus::Done);
    }

    #[test]
    fn checklist_free_done_without_approval_returns_to_review() {
        let t = with_status(task("tsk-1"), TaskStatus::Done);
        assert_eq!(derive_status(&t), TaskStatus::Review);
    }

    #[test]
    fn start_rejection_pins_checklist_task_to_todo() {
        let t = with_vote(
            with_checklist(task("tsk-1"), &[true, false]),
            ApprovalStage::Start,
            ApprovalRole::Client,
            ApprovalStatus::Rejected,
        );
        assert_eq!(derive_status(&t), TaskStatus::Todo);
    }

    #[rstest]
    #[case(TaskStatus::InProgress, TaskStatus::InProgress)]
    #[case(TaskStatus::Review, TaskStatus::Review)]
    #[case(TaskStatus::Done, TaskStatus::Review)]
    #[case(TaskStatus::Todo, TaskStatus::Review)]
    fn completion_rejection_keeps_landing_stage(
        #[case] current: TaskStatus,
        #[case] expected: TaskStatus,
    ) {
        let t = with_vote(
            with_status(with_checklist(task("tsk-1"), &[true, true]), current),
            ApprovalStage::Completion,
            ApprovalRole::Client,
            ApprovalStatus::Rejected,
        );
        assert_eq!(derive_status(&t), expected);
    }

    #[test]
    fn derivation_is_idempotent() {
        let cases = [
            with_checklist(task("a"), &[false]),
            with_checklist(task("b"), &[true, false]),
            with_checklist(task("c"), &[true, true]),
            completion_approved(with_checklist(task("d"), &[true])),
            with_vote(
                with_status(with_checklist(task("e"), &[true]), TaskStatus::InProgress),
                ApprovalStage::Completion,
                ApprovalRole::Oversight,
                ApprovalStatus::Rejected,
            ),
            completion_approved(with_status(task("f"), TaskStatus::Review)),
        ];
        for t in cases {
            let once = with_status(t.clone(), derive_status(&t));
            assert_eq!(derive_status(&once), once.status, "task {}", t.id);
        }
    }

    #[test]
    fn resume_defaults_checklist_free_to_in_progress() {
        let t = with_status(task("tsk-1"), TaskStatus::OnHold);
        assert_eq!(resumed_status(&t), TaskStatus::InProgress);
    }

    #[test]
    fn resume_follows_checklist() {
        let t = with_status(with_checklist(task("tsk-1"), &[true, true]), TaskStatus::Aborted);
        assert_eq!(resumed_status(&t), TaskStatus::Review);

        let t = with_status(with_checklist(task("tsk-2"), &[false]), TaskStatus::OnHold);
        assert_eq!(resumed_status(&t), TaskStatus::Todo);
    }

    #[rstest]
    #[case(TaskStatus::Todo, TaskStatus::InProgress)]
    #[case(TaskStatus::InProgress, TaskStatus::Review)]
    #[case(TaskStatus::Review, TaskStatus::Done)]
    #[case(TaskStatus::Done, TaskStatus::InProgress)]
    #[case(TaskStatus::Overdue, TaskStatus::InProgress)]
    fn advance_cycle(#[case] from: TaskStatus, #[case] to: TaskStatus) {
        let t = with_status(task("tsk-1"), from);
        assert_eq!(advance_target(&t).unwrap(), to);
    }

    #[test]
    fn advance_refuses_checklist_tasks() {
        let t = with_checklist(task("tsk-1"), &[false]);
        assert!(matches!(
            advance_target(&t),
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn manual_done_needs_completion_approval() {
        let t = with_status(task("tsk-1"), TaskStatus::Review);
        assert!(matches!(
            check_manual_target(&t, TaskStatus::Done),
            Err(EngineError::ApprovalRequired {
                stage: ApprovalStage::Completion,
                ..
            })
        ));
        assert!(check_manual_target(&completion_approved(t), TaskStatus::Done).is_ok());
    }

    #[test]
    fn manual_forward_move_blocked_by_start_rejection() {
        let t = with_vote(
            task("tsk-1"),
            ApprovalStage::Start,
            ApprovalRole::Oversight,
            ApprovalStatus::Rejected,
        );
        assert!(matches!(
            check_manual_target(&t, TaskStatus::InProgress),
            Err(EngineError::ApprovalRequired {
                stage: ApprovalStage::Start,
                ..
            })
        ));
        assert!(check_manual_target(&t, TaskStatus::Todo).is_ok());
    }

    #[test]
    fn manual_target_rejects_non_manual_statuses() {
        let t = task("tsk-1");
        for target in [TaskStatus::Overdue, TaskStatus::OnHold, TaskStatus::Aborted] {
            assert!(matches!(
                check_manual_target(&t, target),
                Err(EngineError::InvalidTransition { .. })
            ));
        }
    }
}
