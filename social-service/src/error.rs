/// Error types for social-service
use thiserror::Error;

use crate::domain::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("not allowed: {0}")]
    Authorization(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Single field-level validation failure.
    pub fn invalid(field: &str, message: &str) -> Self {
        ServiceError::Validation(ValidationErrors::single(field, message))
    }
}

/// Returns the violated constraint name when the error is a Postgres
/// unique violation. Used to turn duplicate-creation races into
/// field-level validation outcomes instead of opaque 500s.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(|c| c.to_string())
        }
        _ => None,
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_renders_field_and_message() {
        let err = ServiceError::invalid("username", "already exists");
        assert_eq!(
            err.to_string(),
            "validation failed: username: already exists"
        );
    }

    #[test]
    fn not_found_message() {
        let err = ServiceError::NotFound("post".into());
        assert_eq!(err.to_string(), "not found: post");
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(unique_violation(&sqlx::Error::RowNotFound).is_none());
    }
}
