//! Shared builders for engine unit tests.

use atelier_core::entities::{ApprovalVote, ChecklistItem, NewTask, Task};
use atelier_core::enums::{ApprovalRole, ApprovalStage, ApprovalStatus, Priority, TaskStatus};
use chrono::{NaiveDate, TimeZone, Utc};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A checklist-free `TODO` task in the `design` category, 2026-03-01..2026-03-05.
pub fn task(id: &str) -> Task {
    Task::new(
        id,
        NewTask {
            title: format!("Task {id}"),
            category: "design".into(),
            priority: Priority::Medium,
            assignee_id: Some("usr-assignee".into()),
            start_date: date(2026, 3, 1),
            due_date: date(2026, 3, 5),
            dependencies: Vec::new(),
            checklist: Vec::new(),
        },
    )
    .unwrap()
}

pub fn with_status(mut task: Task, status: TaskStatus) -> Task {
    task.status = status;
    task
}

pub fn with_deps(mut task: Task, deps: &[&str]) -> Task {
    task.dependencies = deps.iter().map(|d| (*d).to_string()).collect();
    task
}

pub fn with_checklist(mut task: Task, states: &[bool]) -> Task {
    task.checklist = states
        .iter()
        .enumerate()
        .map(|(i, done)| ChecklistItem {
            id: format!("chk-{i}"),
            title: format!("Step {i}"),
            is_completed: *done,
        })
        .collect();
    task
}

pub fn with_dates(mut task: Task, start: NaiveDate, due: NaiveDate) -> Task {
    task.start_date = start;
    task.due_date = due;
    task
}

pub fn with_category(mut task: Task, category: &str) -> Task {
    task.category = category.to_string();
    task
}

pub fn with_vote(
    mut task: Task,
    stage: ApprovalStage,
    role: ApprovalRole,
    status: ApprovalStatus,
) -> Task {
    let vote = ApprovalVote::cast(
        status,
        format!("usr-{role}"),
        Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap(),
    );
    let flow = task.approvals.flow(stage).with_slot(role, vote);
    task.approvals = task.approvals.with_flow(stage, flow);
    task
}

/// Both completion slots approved.
pub fn completion_approved(task: Task) -> Task {
    let task = with_vote(
        task,
        ApprovalStage::Completion,
        ApprovalRole::Client,
        ApprovalStatus::Approved,
    );
    with_vote(
        task,
        ApprovalStage::Completion,
        ApprovalRole::Oversight,
        ApprovalStatus::Approved,
    )
}
