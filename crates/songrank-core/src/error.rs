//! Typed failures returned by the [`ScoringEngine`](crate::engine::ScoringEngine).

use thiserror::Error;

use crate::store::StoreError;

/// Message used for duplicate-name conflicts.
pub const DUPLICATE_NAME_MESSAGE: &str = "Recommendations names must be unique";

/// Failure outcome of an engine operation.
///
/// Each variant maps to a stable machine-readable code via [`kind`](Self::kind),
/// which the HTTP layer turns into a status code.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A recommendation with the same name already exists.
    #[error("{0}")]
    Conflict(String),

    /// The targeted recommendation does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The input failed validation.
    #[error("{0}")]
    Validation(String),

    /// The storage backend failed.
    #[error(transparent)]
    Store(StoreError),
}

impl EngineError {
    /// Stable error code: `conflict`, `not_found`, `validation`, or `internal`.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Conflict(_) => "conflict",
            EngineError::NotFound(_) => "not_found",
            EngineError::Validation(_) => "validation",
            EngineError::Store(_) => "internal",
        }
    }

    pub(crate) fn missing(id: i64) -> Self {
        EngineError::NotFound(format!("recommendation {} not found", id))
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NameTaken(_) => EngineError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()),
            StoreError::NotFound(id) => EngineError::missing(id),
            other => EngineError::Store(other),
        }
    }
}
