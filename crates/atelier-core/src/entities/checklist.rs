use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of a task's checklist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl ChecklistItem {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_completed: false,
        }
    }
}

/// Completion summary of a non-empty checklist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub completed: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Summarize `items`. `None` for an empty checklist.
    #[must_use]
    pub fn of(items: &[ChecklistItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let completed = items.iter().filter(|item| item.is_completed).count();
        Some(Self {
            completed,
            total: items.len(),
        })
    }

    #[must_use]
    pub const fn is_untouched(self) -> bool {
        self.completed == 0
    }

    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.completed == self.total
    }

    /// Completed / total in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self) -> f64 {
        self.completed as f64 / self.total as f64
    }

    /// Rounded percentage for progress bars.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u8 {
        (self.ratio() * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(states: &[bool]) -> Vec<ChecklistItem> {
        states
            .iter()
            .enumerate()
            .map(|(i, done)| ChecklistItem {
                id: format!("chk-{i}"),
                title: format!("step {i}"),
                is_completed: *done,
            })
            .collect()
    }

    #[test]
    fn empty_checklist_has_no_progress() {
        assert!(ChecklistProgress::of(&[]).is_none());
    }

    #[test]
    fn partial_progress() {
        let progress = ChecklistProgress::of(&items(&[true, false, false])).unwrap();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert!(!progress.is_untouched());
        assert!(!progress.is_complete());
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn full_and_untouched() {
        let full = ChecklistProgress::of(&items(&[true, true])).unwrap();
        assert!(full.is_complete());
        assert!((full.ratio() - 1.0).abs() < f64::EPSILON);
        assert_eq!(full.percent(), 100);

        let none = ChecklistProgress::of(&items(&[false, false])).unwrap();
        assert!(none.is_untouched());
        assert_eq!(none.percent(), 0);
    }
}
