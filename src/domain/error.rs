//! Domain errors

use thiserror::Error;

/// Domain-level error taxonomy.
///
/// Maps onto the HTTP surface as 404 / 400 / 401 / 403; repository errors
/// wrapped into [`DomainError::Validation`] with a `Database error:` prefix
/// surface as 500.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
