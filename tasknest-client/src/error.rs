/// Client error types
///
/// Mirrors the boundary's error categories so callers (and the store's
/// error downgrade) can distinguish bad input from a missing entity from a
/// server-side or transport failure.

use thiserror::Error;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by a [`crate::backend::TaskBackend`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The referenced entity does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// The request was rejected as malformed (HTTP 400/422)
    #[error("{0}")]
    BadInput(String),

    /// The server failed internally (HTTP 5xx)
    #[error("server error: {0}")]
    Server(String),

    /// The request never completed
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_displays_bare_message() {
        // The store shows this string directly to the user.
        let err = ClientError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_server_error_is_prefixed() {
        let err = ClientError::Server("boom".to_string());
        assert_eq!(err.to_string(), "server error: boom");
    }
}
