//! Cross-cutting error types for Atelier.
//!
//! Engine rejections live in `atelier-engine`; persistence errors live in
//! `atelier-store`. This enum covers what the data model itself can refuse.

use thiserror::Error;

/// Errors raised while constructing domain entities.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (dates, ids, required fields).
    #[error("Validation error: {0}")]
    Validation(String),
}
