use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ApprovalRole, ApprovalStage, ApprovalStatus};

/// A single slot's sign-off state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalVote {
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ApprovalVote {
    /// A vote cast by `voter` at `at`.
    #[must_use]
    pub fn cast(status: ApprovalStatus, voter: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            status,
            voted_by: Some(voter.into()),
            timestamp: Some(at),
        }
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.status == ApprovalStatus::Rejected
    }
}

/// Two-party sign-off: exactly one client slot and one oversight slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApprovalFlow {
    #[serde(default)]
    pub client: ApprovalVote,
    #[serde(default)]
    pub oversight: ApprovalVote,
}

impl ApprovalFlow {
    /// Satisfied iff both slots are approved.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.client.is_approved() && self.oversight.is_approved()
    }

    /// Whether either slot currently holds a rejection.
    #[must_use]
    pub fn has_rejection(&self) -> bool {
        self.client.is_rejected() || self.oversight.is_rejected()
    }

    #[must_use]
    pub const fn slot(&self, role: ApprovalRole) -> &ApprovalVote {
        match role {
            ApprovalRole::Client => &self.client,
            ApprovalRole::Oversight => &self.oversight,
        }
    }

    /// Copy of this flow with one slot replaced.
    #[must_use]
    pub fn with_slot(&self, role: ApprovalRole, vote: ApprovalVote) -> Self {
        let mut next = self.clone();
        match role {
            ApprovalRole::Client => next.client = vote,
            ApprovalRole::Oversight => next.oversight = vote,
        }
        next
    }
}

/// The start and completion flows attached to every task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskApprovals {
    #[serde(default)]
    pub start: ApprovalFlow,
    #[serde(default)]
    pub completion: ApprovalFlow,
}

impl TaskApprovals {
    #[must_use]
    pub const fn flow(&self, stage: ApprovalStage) -> &ApprovalFlow {
        match stage {
            ApprovalStage::Start => &self.start,
            ApprovalStage::Completion => &self.completion,
        }
    }

    #[must_use]
    pub fn with_flow(&self, stage: ApprovalStage, flow: ApprovalFlow) -> Self {
        let mut next = self.clone();
        match stage {
            ApprovalStage::Start => next.start = flow,
            ApprovalStage::Completion => next.completion = flow,
        }
        next
    }
}
