/// User resolution endpoints
///
/// This module provides the identity boundary of the core: an idempotent
/// endpoint mapping an email to an internal user record, and a lookup by
/// id used by clients before attaching work to a user.
///
/// # Endpoints
///
/// - `POST /v1/users` - Resolve (get-or-create) a user by email
/// - `GET  /v1/users/:id` - Fetch a user by id

use crate::{
    app::AppState,
    error::{validation_details, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tasknest_shared::{models::user::User, repo::users};
use validator::Validate;

/// Resolve request
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveUserRequest {
    /// Display name, stored on first resolution only
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Email address the user is identified by
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Resolve a user by email
///
/// Returns the existing user when the email has been seen before (the
/// stored name is not updated), otherwise creates one. This is the only
/// way a user row comes into existence.
///
/// # Endpoint
///
/// ```text
/// POST /v1/users
/// Content-Type: application/json
///
/// {
///   "name": "Ann",
///   "email": "ann@x.com"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `400 Bad Request`: Missing name/email or malformed email
/// - `500 Internal Server Error`: Database failure
pub async fn resolve_user(
    State(state): State<AppState>,
    Json(req): Json<ResolveUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()
        .map_err(|e| ApiError::ValidationError(validation_details(e)))?;

    tracing::info!(email = %req.email, "Resolving user");

    let user = users::resolve(&state.db, &req.name, &req.email).await?;

    Ok(Json(user))
}

/// Fetch a user by id
///
/// # Errors
///
/// - `404 Not Found`: No user has that id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_request_validation() {
        let valid = ResolveUserRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_name = ResolveUserRequest {
            name: "".to_string(),
            email: "ann@x.com".to_string(),
        };
        assert!(missing_name.validate().is_err());

        let bad_email = ResolveUserRequest {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }
}
