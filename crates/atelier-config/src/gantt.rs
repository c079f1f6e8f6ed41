//! Gantt timeline layout configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Days added on both sides of the computed axis.
const fn default_padding_days() -> i64 {
    2
}

/// Smallest bar width, as a fraction of the axis.
const fn default_min_visible_width() -> f64 {
    0.01
}

/// Canonical trade sequence of an interior fit-out.
fn default_category_order() -> Vec<String> {
    [
        "design",
        "procurement",
        "civil",
        "electrical",
        "plumbing",
        "carpentry",
        "false_ceiling",
        "painting",
        "flooring",
        "furnishing",
        "installation",
        "handover",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GanttConfig {
    /// Padding in days applied before the earliest and after the latest date.
    #[serde(default = "default_padding_days")]
    pub padding_days: i64,

    /// Minimum bar width so zero-length tasks stay visible.
    #[serde(default = "default_min_visible_width")]
    pub min_visible_width: f64,

    /// Row group order. Categories not listed sort after these, by name.
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            padding_days: default_padding_days(),
            min_visible_width: default_min_visible_width(),
            category_order: default_category_order(),
        }
    }
}

impl GanttConfig {
    /// Position of `category` in the canonical order, compared case-insensitively.
    #[must_use]
    pub fn category_rank(&self, category: &str) -> Option<usize> {
        self.category_order
            .iter()
            .position(|known| known.eq_ignore_ascii_case(category.trim()))
    }

    /// Check the values a layout relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for negative padding, a minimum width
    /// outside `(0, 1)`, or a category listed twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.padding_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "gantt.padding_days".into(),
                reason: format!("must be >= 0, got {}", self.padding_days),
            });
        }
        if !(self.min_visible_width > 0.0 && self.min_visible_width < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "gantt.min_visible_width".into(),
                reason: format!("must be in (0, 1), got {}", self.min_visible_width),
            });
        }
        for (idx, category) in self.category_order.iter().enumerate() {
            if self.category_order[..idx]
                .iter()
                .any(|prev| prev.eq_ignore_ascii_case(category))
            {
                return Err(ConfigError::InvalidValue {
                    field: "gantt.category_order".into(),
                    reason: format!("'{category}' is listed more than once"),
                });
            }
        }
        Ok(())
    }
}
