//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found with id: {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "User",
            id,
        }
    }

    pub fn post_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Unique or foreign-key constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
