/// Task repository
///
/// The CRUD and state-transition contract over the tasks table:
///
/// - [`create`] validates input, checks the owning user exists, and
///   persists with defaults (`status=pending`, `priority=low`).
/// - [`update`] is a full overwrite of every editable field. Optional
///   fields the caller omits are written as NULL, never merged, so callers
///   must always supply the complete current representation.
/// - [`patch_status`] writes only the status column and performs no enum
///   validation (the observed behavior of the status patch path).
/// - [`delete`] is permanent; deleting an already-deleted id is NotFound,
///   not a silent success.
///
/// Every mutation is immediately visible to subsequent reads on the same
/// pool; there is no multi-statement transaction around the user-existence
/// check and the insert.
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::repo::tasks::{self, CreateTaskInput};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let task = tasks::create(&pool, CreateTaskInput {
///     title: "Write spec".to_string(),
///     description: "Draft v1".to_string(),
///     user_id: 1,
///     project_id: None,
///     category_id: None,
///     status: None,
///     due_date: Some("2024-06-01".to_string()),
///     priority: Some("high".to_string()),
/// }).await?;
///
/// tasks::patch_status(&pool, task.id, "completed").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{RepoError, RepoResult};
use crate::models::task::{NewTask, Task, TaskPriority, TaskReplacement, TaskStatus};
use crate::models::user::User;

/// Input for creating a task
///
/// `status`, `due_date`, and `priority` arrive as raw strings from the
/// boundary and are validated here before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskInput {
    /// Task title (required, trimmed before storage)
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Task description (required, trimmed before storage)
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Owning user (must exist)
    pub user_id: i32,

    /// Soft project tag
    #[serde(default)]
    pub project_id: Option<i32>,

    /// Soft category tag
    #[serde(default)]
    pub category_id: Option<i32>,

    /// Initial status; defaults to "pending" when omitted
    #[serde(default)]
    pub status: Option<String>,

    /// Due date; RFC 3339 or `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,

    /// Priority; defaults to "low" when omitted
    #[serde(default)]
    pub priority: Option<String>,
}

/// Input for a full task update
///
/// The complete editable field set. Optional fields left as None are
/// written to the row as NULL.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTaskInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub status: String,

    pub user_id: i32,

    #[serde(default)]
    pub project_id: Option<i32>,

    #[serde(default)]
    pub category_id: Option<i32>,

    #[serde(default)]
    pub due_date: Option<String>,

    pub priority: String,
}

/// Validated, typed create input ready for insertion
#[derive(Debug)]
struct ValidatedCreate {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
}

/// Parses a due-date string into an instant
///
/// Accepts RFC 3339 (`2024-06-01T12:00:00Z`), a naive datetime
/// (`2024-06-01T12:00:00`, read as UTC), or a bare date (`2024-06-01`,
/// read as midnight UTC). Returns None for anything else.
fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Validates a create input without touching the database
fn validate_create(input: &CreateTaskInput) -> RepoResult<ValidatedCreate> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(RepoError::validation("Title is required"));
    }

    let description = input.description.trim();
    if description.is_empty() {
        return Err(RepoError::validation("Description is required"));
    }

    let status = match input.status.as_deref() {
        Some(raw) => TaskStatus::parse(raw).ok_or_else(|| {
            RepoError::validation("Status must be one of: pending, in_progress, completed")
        })?,
        None => TaskStatus::Pending,
    };

    let priority = match input.priority.as_deref() {
        Some(raw) => TaskPriority::parse(raw)
            .ok_or_else(|| RepoError::validation("Priority must be one of: low, medium, high"))?,
        None => TaskPriority::Low,
    };

    let due_date = match input.due_date.as_deref() {
        Some(raw) => Some(
            parse_due_date(raw).ok_or_else(|| RepoError::validation("Invalid due date format"))?,
        ),
        None => None,
    };

    Ok(ValidatedCreate {
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        due_date,
    })
}

/// Lists all tasks owned by a user
pub async fn list_by_user(pool: &PgPool, user_id: i32) -> RepoResult<Vec<Task>> {
    Ok(Task::list_by_user(pool, user_id).await?)
}

/// Fetches a task by id
///
/// # Errors
///
/// `NotFound` if no task has that id.
pub async fn get_by_id(pool: &PgPool, id: i32) -> RepoResult<Task> {
    Task::find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found("Task not found"))
}

/// Creates a task
///
/// Validation order: required title/description, status enum, priority
/// enum, due-date parse, user existence. The persisted record, including
/// the generated id, is returned.
///
/// # Errors
///
/// - `Validation` for missing/malformed input
/// - `NotFound` if `user_id` does not reference an existing user (a task
///   is never silently created for a missing owner)
/// - `Storage` if the insert itself fails
pub async fn create(pool: &PgPool, input: CreateTaskInput) -> RepoResult<Task> {
    let validated = validate_create(&input)?;

    if User::find_by_id(pool, input.user_id).await?.is_none() {
        return Err(RepoError::not_found("User not found"));
    }

    let task = Task::insert(
        pool,
        NewTask {
            title: validated.title,
            description: validated.description,
            user_id: input.user_id,
            project_id: input.project_id,
            category_id: input.category_id,
            status: validated.status,
            due_date: validated.due_date,
            priority: validated.priority,
        },
    )
    .await?;

    tracing::info!(
        task_id = task.id,
        user_id = task.user_id,
        status = %task.status,
        "Task created"
    );

    Ok(task)
}

/// Replaces every editable field of a task
///
/// This is a full overwrite, not a merge: optional fields the caller left
/// as None become NULL. Status and priority strings are written as given
/// (the original update path does not re-validate them); the due date must
/// still parse.
///
/// # Errors
///
/// `NotFound` if the id is unknown, `Validation` for an unparsable due
/// date.
pub async fn update(pool: &PgPool, id: i32, input: UpdateTaskInput) -> RepoResult<()> {
    if Task::find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::not_found("Task not found"));
    }

    let due_date = match input.due_date.as_deref() {
        Some(raw) => Some(
            parse_due_date(raw).ok_or_else(|| RepoError::validation("Invalid due date format"))?,
        ),
        None => None,
    };

    Task::replace(
        pool,
        id,
        TaskReplacement {
            title: input.title,
            description: input.description,
            status: input.status,
            user_id: input.user_id,
            project_id: input.project_id,
            category_id: input.category_id,
            due_date,
            priority: input.priority,
        },
    )
    .await?;

    tracing::info!(task_id = id, "Task updated");

    Ok(())
}

/// Updates only a task's status
///
/// The status string is not checked against the enum here; the create path
/// is the only validated entry point for status values.
///
/// # Errors
///
/// `NotFound` if the id is unknown.
pub async fn patch_status(pool: &PgPool, id: i32, status: &str) -> RepoResult<()> {
    let updated = Task::set_status(pool, id, status).await?;
    if !updated {
        return Err(RepoError::not_found("Task not found"));
    }

    tracing::info!(task_id = id, status = %status, "Task status updated");

    Ok(())
}

/// Deletes a task permanently
///
/// # Errors
///
/// `NotFound` if the id is unknown, including a second delete of the same
/// id.
pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
    let deleted = Task::delete(pool, id).await?;
    if !deleted {
        return Err(RepoError::not_found("Task not found"));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn base_input() -> CreateTaskInput {
        CreateTaskInput {
            title: "Write spec".to_string(),
            description: "Draft v1".to_string(),
            user_id: 1,
            project_id: None,
            category_id: None,
            status: None,
            due_date: None,
            priority: None,
        }
    }

    #[test]
    fn test_validate_create_defaults() {
        let validated = validate_create(&base_input()).unwrap();
        assert_eq!(validated.status, TaskStatus::Pending);
        assert_eq!(validated.priority, TaskPriority::Low);
        assert!(validated.due_date.is_none());
    }

    #[test]
    fn test_validate_create_trims_fields() {
        let mut input = base_input();
        input.title = "  Write spec  ".to_string();
        input.description = "\tDraft v1\n".to_string();

        let validated = validate_create(&input).unwrap();
        assert_eq!(validated.title, "Write spec");
        assert_eq!(validated.description, "Draft v1");
    }

    #[test]
    fn test_validate_create_rejects_empty_title() {
        let mut input = base_input();
        input.title = "".to_string();
        assert!(matches!(
            validate_create(&input),
            Err(RepoError::Validation(_))
        ));

        // Whitespace-only is empty after trim
        input.title = "   ".to_string();
        assert!(matches!(
            validate_create(&input),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_create_rejects_empty_description() {
        let mut input = base_input();
        input.description = " \t ".to_string();
        assert!(matches!(
            validate_create(&input),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_create_rejects_unknown_priority() {
        let mut input = base_input();
        input.priority = Some("urgent".to_string());

        let err = validate_create(&input).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(err.to_string().contains("low, medium, high"));
    }

    #[test]
    fn test_validate_create_rejects_unknown_status() {
        let mut input = base_input();
        input.status = Some("done".to_string());
        assert!(matches!(
            validate_create(&input),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_create_accepts_enumerated_values() {
        let mut input = base_input();
        input.status = Some("in_progress".to_string());
        input.priority = Some("high".to_string());

        let validated = validate_create(&input).unwrap();
        assert_eq!(validated.status, TaskStatus::InProgress);
        assert_eq!(validated.priority, TaskPriority::High);
    }

    #[test]
    fn test_validate_create_rejects_bad_due_date() {
        let mut input = base_input();
        input.due_date = Some("not-a-date".to_string());

        let err = validate_create(&input).unwrap_err();
        assert!(err.to_string().contains("due date"));
    }

    #[test]
    fn test_parse_due_date_rfc3339() {
        let parsed = parse_due_date("2024-06-01T12:30:00Z").unwrap();
        assert_eq!(parsed.hour(), 12);
        assert_eq!(parsed.minute(), 30);

        // Offset forms normalize to UTC
        let offset = parse_due_date("2024-06-01T12:30:00+02:00").unwrap();
        assert_eq!(offset.hour(), 10);
    }

    #[test]
    fn test_parse_due_date_naive_forms() {
        assert!(parse_due_date("2024-06-01T08:00:00").is_some());

        let midnight = parse_due_date("2024-06-01").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
    }

    #[test]
    fn test_parse_due_date_rejects_garbage() {
        assert!(parse_due_date("").is_none());
        assert!(parse_due_date("tomorrow").is_none());
        assert!(parse_due_date("2024-13-45").is_none());
    }

    #[test]
    fn test_create_input_deserializes_with_omitted_optionals() {
        let input: CreateTaskInput = serde_json::from_str(
            r#"{"title": "Write spec", "description": "Draft v1", "user_id": 1}"#,
        )
        .unwrap();

        assert!(input.project_id.is_none());
        assert!(input.status.is_none());
        assert!(input.due_date.is_none());
        assert!(input.priority.is_none());
    }

    // Database-backed contract tests are in tests/task_repo_tests.rs
}
