use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ChecklistItem, ChecklistProgress, Comment, TaskApprovals};
use crate::enums::{Priority, TaskStatus};
use crate::errors::CoreError;

/// A scheduled unit of work inside a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub assignee_id: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    /// Prerequisite task ids, deduplicated, in insertion order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub approvals: TaskApprovals,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub assignee_id: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Task {
    /// Create a task in `TODO` with both approval flows pending.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the due date precedes the start date,
    /// the title is blank, a dependency names the task itself, or two checklist
    /// items share an id.
    pub fn new(id: impl Into<String>, draft: NewTask) -> Result<Self, CoreError> {
        let id = id.into();

        if draft.title.trim().is_empty() {
            return Err(CoreError::Validation(format!("task {id}: title is empty")));
        }
        if draft.due_date < draft.start_date {
            return Err(CoreError::Validation(format!(
                "task {id}: due date {} precedes start date {}",
                draft.due_date, draft.start_date
            )));
        }
        if draft.dependencies.iter().any(|dep| *dep == id) {
            return Err(CoreError::Validation(format!(
                "task {id}: a task cannot depend on itself"
            )));
        }
        for (idx, item) in draft.checklist.iter().enumerate() {
            if draft.checklist[..idx].iter().any(|prev| prev.id == item.id) {
                return Err(CoreError::Validation(format!(
                    "task {id}: duplicate checklist item {}",
                    item.id
                )));
            }
        }

        Ok(Self {
            id,
            title: draft.title,
            category: draft.category,
            priority: draft.priority,
            assignee_id: draft.assignee_id,
            start_date: draft.start_date,
            due_date: draft.due_date,
            status: TaskStatus::Todo,
            dependencies: dedup_ids(draft.dependencies),
            checklist: draft.checklist,
            approvals: TaskApprovals::default(),
            comments: Vec::new(),
        })
    }

    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.status.is_frozen()
    }

    /// Checklist-bearing tasks have their status derived automatically.
    #[must_use]
    pub fn has_checklist(&self) -> bool {
        !self.checklist.is_empty()
    }

    #[must_use]
    pub fn progress(&self) -> Option<ChecklistProgress> {
        ChecklistProgress::of(&self.checklist)
    }

    #[must_use]
    pub fn depends_on(&self, task_id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == task_id)
    }

    #[must_use]
    pub fn checklist_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub fn is_assignee(&self, user_id: &str) -> bool {
        self.assignee_id.as_deref() == Some(user_id)
    }
}

/// Drop repeated ids, keeping the first occurrence.
#[must_use]
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
