//! Helpers for the externally scheduled overdue sweep.

use atelier_core::entities::Task;
use atelier_core::enums::TaskStatus;
use chrono::NaiveDate;

/// Whether the sweep should mark `task` overdue on `today`.
///
/// True iff the due date has passed and the task is neither finished, under
/// review, frozen, nor already overdue.
#[must_use]
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && task.status.is_overdue_eligible()
}

/// Copies of every task [`is_overdue`] selects, with status set to `OVERDUE`.
///
/// Input order is preserved. The caller persists the returned tasks.
#[must_use]
pub fn sweep_overdue(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let swept: Vec<Task> = tasks
        .iter()
        .filter(|task| is_overdue(task, today))
        .map(|task| {
            let mut next = task.clone();
            next.status = TaskStatus::Overdue;
            next
        })
        .collect();
    if !swept.is_empty() {
        tracing::debug!(count = swept.len(), %today, "overdue sweep selected tasks");
    }
    swept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, task, with_status};
    use rstest::rstest;

    // test_support tasks are due 2026-03-05

    #[rstest]
    #[case(TaskStatus::Todo, true)]
    #[case(TaskStatus::InProgress, true)]
    #[case(TaskStatus::Review, false)]
    #[case(TaskStatus::Done, false)]
    #[case(TaskStatus::Overdue, false)]
    #[case(TaskStatus::OnHold, false)]
    #[case(TaskStatus::Aborted, false)]
    fn eligibility_after_due_date(#[case] status: TaskStatus, #[case] expected: bool) {
        let t = with_status(task("tsk-1"), status);
        assert_eq!(is_overdue(&t, date(2026, 3, 6)), expected);
    }

    #[test]
    fn due_today_is_not_overdue() {
        assert!(!is_overdue(&task("tsk-1"), date(2026, 3, 5)));
    }

    #[test]
    fn sweep_marks_only_eligible_tasks() {
        let tasks = vec![
            task("a"),
            with_status(task("b"), TaskStatus::Done),
            with_status(task("c"), TaskStatus::InProgress),
        ];
        let swept = sweep_overdue(&tasks, date(2026, 3, 9));
        let ids: Vec<&str> = swept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(swept.iter().all(|t| t.status == TaskStatus::Overdue));
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }
}
