//! Business workflows behind the console's screens.
//!
//! Services are free functions generic over the repository traits so that
//! any backend (remote or in-memory) can drive them. Repository failures
//! are logged here and mapped to [`ServiceError`], keeping callers thin.

use thiserror::Error;

pub mod categories;
pub mod customers;
pub mod products;

/// Errors surfaced to the presentation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    /// Recoverable input problem, shown next to the offending form.
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    TypeConstraint(String),
    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
