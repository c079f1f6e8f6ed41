//! Store and service error types.

use std::path::PathBuf;

use atelier_core::errors::CoreError;
use atelier_engine::EngineError;
use thiserror::Error;

/// Errors from task persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or appending a journal file failed.
    #[error("journal I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project id cannot be used as a journal file name.
    #[error("invalid project id: {0:?}")]
    InvalidProjectId(String),

    /// A journal line is JSON but not a record this build understands.
    #[error("journal line {line} of {path} is not a valid record: {source}")]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from [`crate::ProjectService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("task {task_id} not found in project {project_id}")]
    TaskNotFound { project_id: String, task_id: String },

    #[error("task {task_id} already exists in project {project_id}")]
    TaskExists { project_id: String, task_id: String },

    /// The engine rejected the mutation; nothing was saved.
    #[error(transparent)]
    Rejected(#[from] EngineError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
