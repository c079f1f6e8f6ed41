//! Entity structs for the Atelier task domain.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Field names
//! serialize in `camelCase` to match the stored task documents.

mod approval;
mod checklist;
mod comment;
mod project;
mod task;

pub use approval::{ApprovalFlow, ApprovalVote, TaskApprovals};
pub use checklist::{ChecklistItem, ChecklistProgress};
pub use comment::Comment;
pub use project::ProjectBounds;
pub use task::{NewTask, Task, dedup_ids};
