//! Errors raised by the progress engine

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before anything was written
    #[error("Invalid task: {field} {reason}")]
    InvalidTask { field: &'static str, reason: String },

    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
