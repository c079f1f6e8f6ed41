use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Project-level dates used as fallback bounds for the Gantt axis.
///
/// Owned by the project record; the engine only reads them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBounds {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl ProjectBounds {
    #[must_use]
    pub const fn new(start_date: Option<NaiveDate>, deadline: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            deadline,
        }
    }
}
