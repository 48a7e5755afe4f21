/// Task endpoints
///
/// The CRUD and state-transition surface over the task repository.
///
/// # Endpoints
///
/// - `GET    /v1/tasks?email=…` or `?user_id=…` - List a user's tasks
/// - `POST   /v1/tasks` - Create a task
/// - `GET    /v1/tasks/:id` - Fetch a task
/// - `PUT    /v1/tasks/:id` - Full update (overwrite of all editable fields)
/// - `PATCH  /v1/tasks/:id/status` - Status-only patch
/// - `DELETE /v1/tasks/:id` - Delete a task
///
/// Listing accepts either identifying key; both resolve through the users
/// table first and answer 404 "User not found" when the key matches
/// nothing, so a caller can distinguish an empty task list from an unknown
/// user.

use crate::{
    app::AppState,
    error::{validation_details, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    models::{task::Task, user::User},
    repo::tasks::{self, CreateTaskInput, UpdateTaskInput},
};
use validator::Validate;

/// Query parameters for task listing
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Email to resolve the owning user by
    pub email: Option<String>,

    /// User id to list for directly
    pub user_id: Option<i32>,
}

/// Status patch request
#[derive(Debug, Clone, Deserialize)]
pub struct PatchStatusRequest {
    /// New status value, written as-is (see repository notes)
    pub status: String,
}

/// Acknowledgment body for mutations that return no payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// List all tasks for a user
///
/// # Errors
///
/// - `400 Bad Request`: Neither email nor user_id supplied
/// - `404 Not Found`: The identifying key resolves to no user
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let user_id = if let Some(user_id) = query.user_id {
        User::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
            .id
    } else if let Some(email) = query.email.as_deref() {
        User::find_by_email(&state.db, email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
            .id
    } else {
        return Err(ApiError::BadRequest(
            "Email or user_id parameter is required".to_string(),
        ));
    };

    let tasks = tasks::list_by_user(&state.db, user_id).await?;

    Ok(Json(tasks))
}

/// Create a task
///
/// Persists with defaults `status=pending`, `priority=low` when omitted
/// and returns the created record including its generated id.
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Write spec",
///   "description": "Draft v1",
///   "user_id": 1,
///   "priority": "high",
///   "due_date": "2024-06-01"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed (empty title/description)
/// - `400 Bad Request`: Unknown status/priority value or unparsable due date
/// - `404 Not Found`: `user_id` references no existing user
/// - `500 Internal Server Error`: Database failure
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> ApiResult<Json<Task>> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(validation_details(e)))?;

    tracing::info!(user_id = input.user_id, title = %input.title, "Creating task");

    let task = tasks::create(&state.db, input).await?;

    Ok(Json(task))
}

/// Fetch a task by id
///
/// # Errors
///
/// - `404 Not Found`: No task has that id
pub async fn get_task(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Task>> {
    let task = tasks::get_by_id(&state.db, id).await?;
    Ok(Json(task))
}

/// Replace every editable field of a task
///
/// This is a full overwrite: optional fields absent from the request body
/// are written as null. Callers must send the complete current
/// representation.
///
/// # Errors
///
/// - `404 Not Found`: No task has that id
/// - `422 Unprocessable Entity`: Validation failed
/// - `400 Bad Request`: Unparsable due date
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateTaskInput>,
) -> ApiResult<Json<MessageResponse>> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(validation_details(e)))?;

    tasks::update(&state.db, id, input).await?;

    Ok(Json(MessageResponse::new("Task updated successfully")))
}

/// Update only a task's status
///
/// # Errors
///
/// - `404 Not Found`: No task has that id
pub async fn patch_task_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<PatchStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::patch_status(&state.db, id, &req.status).await?;

    Ok(Json(MessageResponse::new("Task status updated successfully")))
}

/// Delete a task permanently
///
/// # Errors
///
/// - `404 Not Found`: No task has that id (including an already-deleted one)
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::delete(&state.db, id).await?;

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_validation() {
        let valid = CreateTaskInput {
            title: "Write spec".to_string(),
            description: "Draft v1".to_string(),
            user_id: 1,
            project_id: None,
            category_id: None,
            status: None,
            due_date: None,
            priority: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateTaskInput {
            title: "".to_string(),
            ..valid.clone()
        };
        assert!(empty_title.validate().is_err());

        let empty_description = CreateTaskInput {
            description: "".to_string(),
            ..valid
        };
        assert!(empty_description.validate().is_err());
    }

    #[test]
    fn test_patch_status_request_deserialization() {
        let req: PatchStatusRequest = serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(req.status, "completed");
    }

    #[test]
    fn test_list_query_accepts_either_key() {
        let by_email: ListTasksQuery =
            serde_json::from_str(r#"{"email": "ann@x.com"}"#).unwrap();
        assert_eq!(by_email.email.as_deref(), Some("ann@x.com"));
        assert!(by_email.user_id.is_none());

        let by_id: ListTasksQuery = serde_json::from_str(r#"{"user_id": 7}"#).unwrap();
        assert_eq!(by_id.user_id, Some(7));
    }

    #[test]
    fn test_message_response_serialization() {
        let response = MessageResponse::new("Task deleted successfully");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Task deleted successfully"));
    }
}
