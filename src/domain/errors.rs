//! Domain errors for the moderation core.

use thiserror::Error;

/// Domain-level errors that can occur in the moderation core.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Entity not tracked: {0}")]
    NotTracked(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Concurrency conflict: {entity} {id} was modified")]
    ConcurrencyConflict { entity: String, id: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}
