//! Task store configuration.

use serde::{Deserialize, Serialize};

/// Default journal directory, relative to the project root.
fn default_data_dir() -> String {
    String::from(".atelier/data")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one `{project_id}.jsonl` journal per project.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
