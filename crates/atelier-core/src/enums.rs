//! Status enums, approval roles, and actions for Atelier.
//!
//! `TaskStatus` serializes as `SCREAMING_SNAKE_CASE` (`"IN_PROGRESS"`), matching
//! the stored task documents. Every other enum uses `snake_case`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a task.
///
/// ```text
/// todo → in_progress → review → done
///   ↑         ↑          │        │
///   │         └──────────┘ (completion rejected / reopened)
///   └── start rejected
///
/// any non-frozen ─(oversight)→ on_hold → aborted
/// on_hold | aborted ─(resume)→ derived status
/// todo | in_progress ─(sweep)→ overdue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Overdue,
    OnHold,
    Aborted,
}

impl TaskStatus {
    /// Frozen statuses suspend all automated derivation and dependency enforcement.
    #[must_use]
    pub const fn is_frozen(self) -> bool {
        matches!(self, Self::OnHold | Self::Aborted)
    }

    /// Position along the forward progression, used to tell forward moves from backward ones.
    ///
    /// `Overdue` ranks with `Todo`: leaving it for anything but `Todo` counts as progress.
    /// Frozen statuses have no rank.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn progress_rank(self) -> Option<u8> {
        match self {
            Self::Todo | Self::Overdue => Some(0),
            Self::InProgress => Some(1),
            Self::Review => Some(2),
            Self::Done => Some(3),
            Self::OnHold | Self::Aborted => None,
        }
    }

    /// Whether moving from `self` to `next` advances the task.
    #[must_use]
    pub fn is_forward_move(self, next: Self) -> bool {
        match (self.progress_rank(), next.progress_rank()) {
            (Some(from), Some(to)) => to > from,
            (None, Some(to)) => to > 0,
            _ => false,
        }
    }

    /// Statuses the overdue sweep may overwrite.
    #[must_use]
    pub const fn is_overdue_eligible(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress)
    }

    /// Statuses a manual transition may target.
    #[must_use]
    pub const fn is_manual_target(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Review | Self::Done)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Review => "REVIEW",
            Self::Done => "DONE",
            Self::Overdue => "OVERDUE",
            Self::OnHold => "ON_HOLD",
            Self::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FreezeKind
// ---------------------------------------------------------------------------

/// Administrative override that suspends automation on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FreezeKind {
    OnHold,
    Aborted,
}

impl FreezeKind {
    /// The frozen status this override puts a task in.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::OnHold => TaskStatus::OnHold,
            Self::Aborted => TaskStatus::Aborted,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnHold => "on_hold",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for FreezeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApprovalStage
// ---------------------------------------------------------------------------

/// Which lifecycle transition an approval flow guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    Start,
    Completion,
}

impl ApprovalStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Completion => "completion",
        }
    }
}

impl fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApprovalRole
// ---------------------------------------------------------------------------

/// One of the two sign-off slots in an approval flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRole {
    Client,
    /// Admin or designer.
    Oversight,
}

impl ApprovalRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Oversight => "oversight",
        }
    }
}

impl fmt::Display for ApprovalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApprovalStatus
// ---------------------------------------------------------------------------

/// State of a single approval slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VoteAction
// ---------------------------------------------------------------------------

/// What a voter does to an approval slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Approve,
    Reject,
    /// Reset a slot to pending. Oversight only.
    Revoke,
}

impl VoteAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Revoke => "revoke",
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// What an acting user may do on a given project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Client,
    Oversight,
    #[default]
    None,
}

impl Capability {
    /// Whether this capability may fill the given approval slot.
    #[must_use]
    pub const fn can_vote_as(self, role: ApprovalRole) -> bool {
        matches!(
            (self, role),
            (Self::Client, ApprovalRole::Client) | (Self::Oversight, ApprovalRole::Oversight)
        )
    }

    #[must_use]
    pub const fn is_oversight(self) -> bool {
        matches!(self, Self::Oversight)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Oversight => "oversight",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_todo, TaskStatus, TaskStatus::Todo, "TODO");
    test_serde_roundtrip!(
        status_in_progress,
        TaskStatus,
        TaskStatus::InProgress,
        "IN_PROGRESS"
    );
    test_serde_roundtrip!(status_on_hold, TaskStatus, TaskStatus::OnHold, "ON_HOLD");
    test_serde_roundtrip!(priority_high, Priority, Priority::High, "high");
    test_serde_roundtrip!(freeze_on_hold, FreezeKind, FreezeKind::OnHold, "on_hold");
    test_serde_roundtrip!(
        stage_completion,
        ApprovalStage,
        ApprovalStage::Completion,
        "completion"
    );
    test_serde_roundtrip!(role_oversight, ApprovalRole, ApprovalRole::Oversight, "oversight");
    test_serde_roundtrip!(
        approval_rejected,
        ApprovalStatus,
        ApprovalStatus::Rejected,
        "rejected"
    );
    test_serde_roundtrip!(vote_revoke, VoteAction, VoteAction::Revoke, "revoke");
    test_serde_roundtrip!(capability_none, Capability, Capability::None, "none");

    #[test]
    fn frozen_statuses() {
        assert!(TaskStatus::OnHold.is_frozen());
        assert!(TaskStatus::Aborted.is_frozen());
        assert!(!TaskStatus::Todo.is_frozen());
        assert!(!TaskStatus::Overdue.is_frozen());
        assert!(!TaskStatus::Done.is_frozen());
    }

    #[test]
    fn forward_moves() {
        assert!(TaskStatus::Todo.is_forward_move(TaskStatus::InProgress));
        assert!(TaskStatus::Review.is_forward_move(TaskStatus::Done));
        assert!(TaskStatus::Overdue.is_forward_move(TaskStatus::InProgress));
        assert!(TaskStatus::OnHold.is_forward_move(TaskStatus::InProgress));
    }

    #[test]
    fn backward_and_lateral_moves() {
        assert!(!TaskStatus::Done.is_forward_move(TaskStatus::Review));
        assert!(!TaskStatus::Review.is_forward_move(TaskStatus::InProgress));
        assert!(!TaskStatus::Overdue.is_forward_move(TaskStatus::Todo));
        assert!(!TaskStatus::InProgress.is_forward_move(TaskStatus::InProgress));
        assert!(!TaskStatus::InProgress.is_forward_move(TaskStatus::OnHold));
    }

    #[test]
    fn overdue_eligibility() {
        assert!(TaskStatus::Todo.is_overdue_eligible());
        assert!(TaskStatus::InProgress.is_overdue_eligible());
        for status in [
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::Overdue,
            TaskStatus::OnHold,
            TaskStatus::Aborted,
        ] {
            assert!(!status.is_overdue_eligible(), "{status} must not be swept");
        }
    }

    #[test]
    fn capability_slot_matching() {
        assert!(Capability::Client.can_vote_as(ApprovalRole::Client));
        assert!(Capability::Oversight.can_vote_as(ApprovalRole::Oversight));
        assert!(!Capability::Client.can_vote_as(ApprovalRole::Oversight));
        assert!(!Capability::Oversight.can_vote_as(ApprovalRole::Client));
        assert!(!Capability::None.can_vote_as(ApprovalRole::Client));
    }

    #[test]
    fn freeze_kind_maps_to_status() {
        assert_eq!(FreezeKind::OnHold.status(), TaskStatus::OnHold);
        assert_eq!(FreezeKind::Aborted.status(), TaskStatus::Aborted);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TaskStatus::InProgress), "IN_PROGRESS");
        assert_eq!(format!("{}", Priority::Medium), "medium");
        assert_eq!(format!("{}", FreezeKind::Aborted), "aborted");
        assert_eq!(format!("{}", ApprovalStage::Start), "start");
        assert_eq!(format!("{}", ApprovalRole::Client), "client");
        assert_eq!(format!("{}", ApprovalStatus::Pending), "pending");
        assert_eq!(format!("{}", VoteAction::Approve), "approve");
        assert_eq!(format!("{}", Capability::Oversight), "oversight");
    }
}
