//! Error taxonomy shared by every repository implementation.

use thiserror::Error;

/// Failures surfaced by the data boundary, whether the concrete
/// implementation talks to a remote backend or to in-memory state.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,
    /// A uniqueness rule was violated, e.g. a duplicate product SKU.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Transport or storage failure reported by the backing collaborator.
    #[error("backend error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
