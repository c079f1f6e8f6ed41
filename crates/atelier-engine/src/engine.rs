//! Mutation facade over the engine components.
//!
//! [`TaskEngine::apply`] takes a task, the latest project snapshot, and one
//! [`Mutation`], and returns either the next version of the task or a
//! rejection. Checks run in a fixed order: freeze, authorization, dependency
//! gate, then approval and checklist rules.

use atelier_config::GanttConfig;
use atelier_core::entities::{
    dedup_ids, ApprovalFlow, ChecklistItem, Comment, ProjectBounds, Task,
};
use atelier_core::enums::{
    ApprovalRole, ApprovalStage, Capability, FreezeKind, TaskStatus, VoteAction,
};
use atelier_core::identity::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::approval;
use crate::cycles::would_create_cycle;
use crate::dependency::{summarize, DependencyGraph};
use crate::deriver;
use crate::error::EngineError;
use crate::freeze;
use crate::gantt::{self, GanttLayout};

/// One user-initiated change to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Mutation {
    ToggleChecklistItem { item_id: String },
    AddChecklistItem { item: ChecklistItem },
    RemoveChecklistItem { item_id: String },
    Vote {
        stage: ApprovalStage,
        role: ApprovalRole,
        action: VoteAction,
    },
    /// Step a checklist-free task to the next lifecycle stage.
    Advance,
    /// Set a checklist-free task to an explicit manual status.
    TransitionTo { status: TaskStatus },
    Freeze { kind: FreezeKind },
    /// Resume an on-hold task or restore an aborted one.
    Resume,
    SetDependencies { dependencies: Vec<String> },
    AddDependency { task_id: String },
    RemoveDependency { task_id: String },
    AddComment { comment_id: String, text: String },
}

impl Mutation {
    /// Short verb used in authorization errors and logs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ToggleChecklistItem { .. } => "toggle checklist of",
            Self::AddChecklistItem { .. } => "add checklist item to",
            Self::RemoveChecklistItem { .. } => "remove checklist item from",
            Self::Vote { .. } => "vote on",
            Self::Advance => "advance",
            Self::TransitionTo { .. } => "change status of",
            Self::Freeze { .. } => "freeze",
            Self::Resume => "resume",
            Self::SetDependencies { .. }
            | Self::AddDependency { .. }
            | Self::RemoveDependency { .. } => "edit dependencies of",
            Self::AddComment { .. } => "comment on",
        }
    }
}

/// Everything a mutation is evaluated against besides the task itself.
#[derive(Debug, Clone, Copy)]
pub struct MutationContext<'a> {
    pub actor: &'a Actor,
    /// Latest snapshot of every task in the project, used to resolve dependencies.
    pub project_tasks: &'a [Task],
    pub now: DateTime<Utc>,
}

impl<'a> MutationContext<'a> {
    #[must_use]
    pub const fn new(actor: &'a Actor, project_tasks: &'a [Task], now: DateTime<Utc>) -> Self {
        Self {
            actor,
            project_tasks,
            now,
        }
    }
}

/// Stateless entry point; holds only layout configuration.
#[derive(Debug, Clone, Default)]
pub struct TaskEngine {
    gantt: GanttConfig,
}

impl TaskEngine {
    #[must_use]
    pub const fn new(gantt: GanttConfig) -> Self {
        Self { gantt }
    }

    #[must_use]
    pub const fn gantt_config(&self) -> &GanttConfig {
        &self.gantt
    }

    /// Apply `mutation` to `task`, returning the updated copy.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; `task` is never modified.
    pub fn apply(
        &self,
        task: &Task,
        mutation: &Mutation,
        ctx: &MutationContext<'_>,
    ) -> Result<Task, EngineError> {
        if !matches!(
            mutation,
            Mutation::Freeze { .. } | Mutation::Resume | Mutation::AddComment { .. }
        ) {
            freeze::ensure_not_frozen(task)?;
        }
        let graph = DependencyGraph::new(ctx.project_tasks);

        let next = match mutation {
            Mutation::ToggleChecklistItem { item_id } => {
                toggle_item(task, item_id, mutation, ctx, &graph)?
            }
            Mutation::AddChecklistItem { item } => add_item(task, item, mutation, ctx, &graph)?,
            Mutation::RemoveChecklistItem { item_id } => {
                remove_item(task, item_id, mutation, ctx, &graph)?
            }
            Mutation::Vote {
                stage,
                role,
                action,
            } => cast_vote(task, *stage, *role, *action, ctx, &graph)?,
            Mutation::Advance => {
                require_assignee_or_oversight(task, ctx.actor, mutation)?;
                let target = deriver::advance_target(task)?;
                manual_move(task, target, &graph)?
            }
            Mutation::TransitionTo { status } => {
                require_assignee_or_oversight(task, ctx.actor, mutation)?;
                if *status == task.status {
                    return Ok(task.clone());
                }
                manual_move(task, *status, &graph)?
            }
            Mutation::Freeze { kind } => freeze::freeze(task, *kind, ctx.actor)?,
            Mutation::Resume => freeze::resume(task, ctx.actor)?,
            Mutation::SetDependencies { dependencies } => {
                set_dependencies(task, dependencies.clone(), mutation, ctx, &graph)?
            }
            Mutation::AddDependency { task_id } => {
                let mut dependencies = task.dependencies.clone();
                dependencies.push(task_id.clone());
                set_dependencies(task, dependencies, mutation, ctx, &graph)?
            }
            Mutation::RemoveDependency { task_id } => {
                let dependencies = task
                    .dependencies
                    .iter()
                    .filter(|dep| *dep != task_id)
                    .cloned()
                    .collect();
                set_dependencies(task, dependencies, mutation, ctx, &graph)?
            }
            Mutation::AddComment { comment_id, text } => {
                add_comment(task, comment_id, text, mutation, ctx)?
            }
        };

        if next.status != task.status {
            tracing::debug!(
                task_id = %task.id,
                from = %task.status,
                to = %next.status,
                action = mutation.action(),
                "task status changed"
            );
        }
        Ok(next)
    }

    /// The task with its status re-derived from checklist and approvals.
    #[must_use]
    pub fn recompute(&self, task: &Task) -> Task {
        let mut next = task.clone();
        next.status = deriver::derive_status(task);
        next
    }

    /// Timeline layout of `tasks` using this engine's Gantt configuration.
    #[must_use]
    pub fn layout<'a>(&self, tasks: &'a [Task], bounds: ProjectBounds) -> GanttLayout<'a> {
        gantt::layout(tasks, bounds, &self.gantt)
    }
}

fn unauthorized(task: &Task, actor: &Actor, mutation: &Mutation) -> EngineError {
    EngineError::Unauthorized {
        task_id: task.id.clone(),
        user_id: actor.user_id.clone(),
        action: mutation.action(),
    }
}

fn require_assignee_or_oversight(
    task: &Task,
    actor: &Actor,
    mutation: &Mutation,
) -> Result<(), EngineError> {
    if actor.capability.is_oversight() || task.is_assignee(&actor.user_id) {
        Ok(())
    } else {
        Err(unauthorized(task, actor, mutation))
    }
}

/// Reject progress on a blocked task.
///
/// Progress means the status ranks higher afterwards, or a checklist item got ticked.
/// An overdue task is ranked by the status its checklist already implies.
fn ensure_unblocked(
    before: &Task,
    after: TaskStatus,
    ticks_item: bool,
    graph: &DependencyGraph<'_>,
) -> Result<(), EngineError> {
    let baseline = match before.status {
        TaskStatus::Overdue => deriver::derive_status(before),
        status => status,
    };
    if !ticks_item && !baseline.is_forward_move(after) {
        return Ok(());
    }
    let blocking = graph.blocking_tasks(before);
    if blocking.is_empty() {
        return Ok(());
    }
    Err(EngineError::DependencyBlocked {
        task_id: before.id.clone(),
        blocking: summarize(&blocking),
    })
}

fn derived(mut task: Task) -> Task {
    task.status = deriver::derive_status(&task);
    task
}

fn toggle_item(
    task: &Task,
    item_id: &str,
    mutation: &Mutation,
    ctx: &MutationContext<'_>,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    require_assignee_or_oversight(task, ctx.actor, mutation)?;
    let Some(item) = task.checklist_item(item_id) else {
        return Err(EngineError::ChecklistItemNotFound {
            task_id: task.id.clone(),
            item_id: item_id.to_string(),
        });
    };
    let ticks_item = !item.is_completed;

    let mut next = task.clone();
    for item in &mut next.checklist {
        if item.id == item_id {
            item.is_completed = !item.is_completed;
        }
    }
    let next = derived(next);
    ensure_unblocked(task, next.status, ticks_item, graph)?;
    Ok(next)
}

fn add_item(
    task: &Task,
    item: &ChecklistItem,
    mutation: &Mutation,
    ctx: &MutationContext<'_>,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    require_assignee_or_oversight(task, ctx.actor, mutation)?;
    if task.checklist_item(&item.id).is_some() {
        return Err(EngineError::DuplicateChecklistItem {
            task_id: task.id.clone(),
            item_id: item.id.clone(),
        });
    }

    let mut next = task.clone();
    next.checklist.push(item.clone());
    let next = derived(next);
    ensure_unblocked(task, next.status, item.is_completed, graph)?;
    Ok(next)
}

fn remove_item(
    task: &Task,
    item_id: &str,
    mutation: &Mutation,
    ctx: &MutationContext<'_>,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    require_assignee_or_oversight(task, ctx.actor, mutation)?;
    if task.checklist_item(item_id).is_none() {
        return Err(EngineError::ChecklistItemNotFound {
            task_id: task.id.clone(),
            item_id: item_id.to_string(),
        });
    }

    let mut next = task.clone();
    next.checklist.retain(|item| item.id != item_id);
    let next = derived(next);
    ensure_unblocked(task, next.status, false, graph)?;
    Ok(next)
}

fn cast_vote(
    task: &Task,
    stage: ApprovalStage,
    role: ApprovalRole,
    action: VoteAction,
    ctx: &MutationContext<'_>,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    let approvals = approval::cast_vote(task, stage, role, action, ctx.actor, ctx.now)?;

    let mut next = task.clone();
    next.approvals = approvals;
    if action == VoteAction::Reject {
        if let Some(landing) = approval::rejection_landing(stage, task.status) {
            next.status = landing;
        }
    }
    let next = derived(next);
    ensure_unblocked(task, next.status, false, graph)?;
    Ok(next)
}

/// Explicit status change of a checklist-free task.
///
/// Leaving `DONE` reopens the work, so the completion flow starts over.
fn manual_move(
    task: &Task,
    target: TaskStatus,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    if target.is_manual_target() {
        ensure_unblocked(task, target, false, graph)?;
    }
    deriver::check_manual_target(task, target)?;

    let mut next = task.clone();
    next.status = target;
    if task.status == TaskStatus::Done && target != TaskStatus::Done {
        next.approvals = task
            .approvals
            .with_flow(ApprovalStage::Completion, ApprovalFlow::default());
    }
    Ok(derived(next))
}

fn set_dependencies(
    task: &Task,
    dependencies: Vec<String>,
    mutation: &Mutation,
    ctx: &MutationContext<'_>,
    graph: &DependencyGraph<'_>,
) -> Result<Task, EngineError> {
    if !ctx.actor.capability.is_oversight() {
        return Err(unauthorized(task, ctx.actor, mutation));
    }
    if dependencies.iter().any(|dep| *dep == task.id) {
        return Err(EngineError::SelfDependency {
            task_id: task.id.clone(),
        });
    }

    let mut next = task.clone();
    next.dependencies = dedup_ids(dependencies);

    let dangling = graph.dangling(&next);
    if !dangling.is_empty() {
        tracing::warn!(task_id = %task.id, ?dangling, "dependency references unknown tasks");
    }
    if would_create_cycle(ctx.project_tasks, &task.id, &next.dependencies) {
        tracing::warn!(task_id = %task.id, "dependency edit introduces a cycle");
    }
    Ok(next)
}

fn add_comment(
    task: &Task,
    comment_id: &str,
    text: &str,
    mutation: &Mutation,
    ctx: &MutationContext<'_>,
) -> Result<Task, EngineError> {
    let actor = ctx.actor;
    if actor.capability == Capability::None && !task.is_assignee(&actor.user_id) {
        return Err(unauthorized(task, actor, mutation));
    }
    let mut next = task.clone();
    next.comments.push(Comment {
        id: comment_id.to_string(),
        author_id: actor.user_id.clone(),
        text: text.to_string(),
        timestamp: ctx.now,
    });
    Ok(next)
}
