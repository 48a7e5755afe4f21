/// Common error types for the repository layer
///
/// All repository and resolver operations return `Result<T, RepoError>`.
/// The three variants map directly onto the categories callers can act on:
/// fix the input, re-resolve the referenced entity, or retry later.

use thiserror::Error;

/// Repository result type alias
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error taxonomy
#[derive(Debug, Error)]
pub enum RepoError {
    /// Malformed or missing input. Always caller-fixable, never retried
    /// automatically.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist. The caller must re-resolve or
    /// abort.
    #[error("{0}")]
    NotFound(String),

    /// The persistence layer itself failed. Transient and safe to retry;
    /// internal detail is logged, not shown to end users.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl RepoError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        RepoError::Validation(msg.into())
    }

    /// Shorthand for a missing-entity failure
    pub fn not_found(msg: impl Into<String>) -> Self {
        RepoError::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RepoError::validation("title is required");
        assert_eq!(err.to_string(), "title is required");

        let err = RepoError::not_found("Task not found");
        assert_eq!(err.to_string(), "Task not found");
    }

    #[test]
    fn test_storage_error_from_sqlx() {
        let err: RepoError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepoError::Storage(_)));
        assert!(err.to_string().starts_with("storage failure"));
    }
}
