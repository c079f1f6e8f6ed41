//! Timeline projection: shared axis, bar geometry, and dependency conflicts.
//!
//! Pure read-side computation. Positions are fractions of the axis in `[0, 1]`.

use std::cmp::Ordering;
use std::collections::HashMap;

use atelier_config::GanttConfig;
use atelier_core::entities::{ProjectBounds, Task};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Tolerance for comparing bar edges built from floating-point sums.
const EDGE_EPSILON: f64 = 1e-9;

/// Shared date range every bar is positioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GanttAxis {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GanttAxis {
    #[must_use]
    pub fn span_days(self) -> i64 {
        (self.end - self.start).num_days()
    }

    #[allow(clippy::cast_precision_loss)]
    fn fraction(self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 / self.span_days() as f64
    }
}

/// One bar on the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct GanttRow<'a> {
    pub task: &'a Task,
    pub left: f64,
    pub width: f64,
    /// Set when any of this task's incoming dependency edges conflicts.
    pub conflict: bool,
}

impl GanttRow<'_> {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A prerequisite edge between two laid-out tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttEdge {
    pub parent_id: String,
    pub child_id: String,
    /// The prerequisite's bar extends past the dependent's start.
    pub conflict: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GanttLayout<'a> {
    /// `None` only for an empty task list.
    pub axis: Option<GanttAxis>,
    pub rows: Vec<GanttRow<'a>>,
    pub edges: Vec<GanttEdge>,
}

impl<'a> GanttLayout<'a> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            axis: None,
            rows: Vec::new(),
            edges: Vec::new(),
        }
    }

    #[must_use]
    pub fn row(&self, task_id: &str) -> Option<&GanttRow<'a>> {
        self.rows.iter().find(|row| row.task.id == task_id)
    }

    #[must_use]
    pub fn edge(&self, parent_id: &str, child_id: &str) -> Option<&GanttEdge> {
        self.edges
            .iter()
            .find(|edge| edge.parent_id == parent_id && edge.child_id == child_id)
    }

    #[must_use]
    pub fn conflicts(&self) -> impl Iterator<Item = &GanttEdge> {
        self.edges.iter().filter(|edge| edge.conflict)
    }
}

/// Compute the axis covering every task date plus the project bounds, widened by padding.
///
/// Returns `None` for an empty task list. The axis always spans at least one day.
#[must_use]
pub fn compute_axis(tasks: &[Task], bounds: ProjectBounds, padding_days: i64) -> Option<GanttAxis> {
    let earliest = tasks
        .iter()
        .map(|task| task.start_date.min(task.due_date))
        .chain(bounds.start_date)
        .min()?;
    let latest = tasks
        .iter()
        .map(|task| task.start_date.max(task.due_date))
        .chain(bounds.deadline)
        .max()?;

    let padding = Duration::days(padding_days.max(0));
    let start = earliest - padding;
    let mut end = latest + padding;
    if end <= start {
        end = start + Duration::days(1);
    }
    Some(GanttAxis { start, end })
}

/// Row order: canonical category groups, unknown categories last by name, then start date.
///
/// Ties keep input order.
#[must_use]
pub fn row_order<'a>(tasks: &'a [Task], config: &GanttConfig) -> Vec<&'a Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| {
        compare_categories(&a.category, &b.category, config)
            .then_with(|| a.start_date.cmp(&b.start_date))
    });
    ordered
}

fn compare_categories(a: &str, b: &str, config: &GanttConfig) -> Ordering {
    match (config.category_rank(a), config.category_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.trim().to_lowercase().cmp(&b.trim().to_lowercase()),
    }
}

/// Lay out `tasks` on a shared axis and flag dependency edges whose dates disagree.
#[must_use]
pub fn layout<'a>(tasks: &'a [Task], bounds: ProjectBounds, config: &GanttConfig) -> GanttLayout<'a> {
    let Some(axis) = compute_axis(tasks, bounds, config.padding_days) else {
        return GanttLayout::empty();
    };

    let mut rows: Vec<GanttRow<'a>> = row_order(tasks, config)
        .into_iter()
        .map(|task| place(task, axis, config.min_visible_width))
        .collect();

    let index: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.task.id.as_str(), idx))
        .collect();

    let mut edges = Vec::new();
    for child_idx in 0..rows.len() {
        let child = rows[child_idx].task;
        let mut child_conflict = false;
        for dep in &child.dependencies {
            let Some(&parent_idx) = index.get(dep.as_str()) else {
                continue;
            };
            let conflict = rows[parent_idx].right() > rows[child_idx].left + EDGE_EPSILON;
            child_conflict |= conflict;
            edges.push(GanttEdge {
                parent_id: dep.clone(),
                child_id: child.id.clone(),
                conflict,
            });
        }
        rows[child_idx].conflict = child_conflict;
    }

    let conflicts = edges.iter().filter(|edge| edge.conflict).count();
    if conflicts > 0 {
        tracing::debug!(conflicts, "gantt layout found dependency date conflicts");
    }

    GanttLayout {
        axis: Some(axis),
        rows,
        edges,
    }
}

#[allow(clippy::cast_precision_loss)]
fn place(task: &Task, axis: GanttAxis, min_visible_width: f64) -> GanttRow<'_> {
    let duration = (task.due_date - task.start_date).num_days().max(0) as f64;
    let width = (duration / axis.span_days() as f64)
        .max(min_visible_width)
        .min(1.0);
    // bars ending on the axis edge shift left to keep their width
    let left = axis
        .fraction(task.start_date)
        .clamp(0.0, 1.0)
        .min(1.0 - width);
    GanttRow {
        task,
        left,
        width,
        conflict: false,
    }
}
