/// Task model and database operations
///
/// This module provides the Task model, the central entity of TaskNest.
/// A task is a unit of work owned by exactly one user, with a lifecycle
/// status, a priority, and an optional due date.
///
/// # Lifecycle
///
/// ```text
/// pending → in_progress → completed
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     project_id INTEGER,
///     category_id INTEGER,
///     status TEXT NOT NULL DEFAULT 'pending',
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     priority TEXT NOT NULL DEFAULT 'low'
/// );
/// ```
///
/// `status` and `priority` are text columns rather than database enums:
/// the create path validates against [`TaskStatus`] and [`TaskPriority`],
/// but the status patch path accepts what it is given (see
/// [`Task::set_status`]).
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::task::{NewTask, Task, TaskPriority, TaskStatus};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::insert(&pool, NewTask {
///     title: "Write spec".to_string(),
///     description: "Draft v1".to_string(),
///     user_id: 1,
///     project_id: None,
///     category_id: None,
///     status: TaskStatus::Pending,
///     due_date: None,
///     priority: TaskPriority::Low,
/// }).await?;
///
/// println!("Created task {}", task.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but not started
    Pending,

    /// Task is actively being worked on
    InProgress,

    /// Task is done
    Completed,
}

impl TaskStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses a stored string into a status
    ///
    /// Returns None for anything outside the enumerated set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// Checks if the task has reached the end of its lifecycle
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// Task urgency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Converts priority to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Parses a stored string into a priority
    ///
    /// Returns None for anything outside the enumerated set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// Task model representing a unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned at creation and immutable
    pub id: i32,

    /// Short task title (stored trimmed, never empty)
    pub title: String,

    /// Task description (stored trimmed, never empty)
    pub description: String,

    /// Owning user
    pub user_id: i32,

    /// Soft reference into the project catalog (no FK)
    pub project_id: Option<i32>,

    /// Soft reference into the category catalog (no FK)
    pub category_id: Option<i32>,

    /// Lifecycle status, stored as text
    pub status: String,

    /// When the task is due (None if no deadline)
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Urgency, stored as text
    pub priority: String,
}

/// Insert shape for a new task
///
/// Fields are already validated and typed; defaults have been resolved by
/// the repository layer.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub user_id: i32,
    pub project_id: Option<i32>,
    pub category_id: Option<i32>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
}

/// Full-overwrite shape for replacing a task's editable fields
///
/// Every editable column is written unconditionally; an absent optional
/// field here becomes NULL in the row. This is deliberately not a merge.
#[derive(Debug, Clone)]
pub struct TaskReplacement {
    pub title: String,
    pub description: String,
    pub status: String,
    pub user_id: i32,
    pub project_id: Option<i32>,
    pub category_id: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: String,
}

impl Task {
    /// Inserts a new task row
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails (including a
    /// foreign-key violation on user_id).
    pub async fn insert(pool: &PgPool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id, project_id, category_id,
                               status, due_date, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, user_id, project_id, category_id,
                      status, due_date, created_at, priority
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .bind(data.project_id)
        .bind(data.category_id)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .bind(data.priority.as_str())
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, project_id, category_id,
                   status, due_date, created_at, priority
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user
    ///
    /// Ordered by id so the sequence is stable for a given underlying
    /// state. Callers sort client-side if they need another order.
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, project_id, category_id,
                   status, due_date, created_at, priority
            FROM tasks
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites every editable column of a task
    ///
    /// Returns false if no task has that id. This writes the complete
    /// editable set unconditionally; see [`TaskReplacement`].
    pub async fn replace(
        pool: &PgPool,
        id: i32,
        data: TaskReplacement,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                user_id = $5,
                project_id = $6,
                category_id = $7,
                due_date = $8,
                priority = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.user_id)
        .bind(data.project_id)
        .bind(data.category_id)
        .bind(data.due_date)
        .bind(data.priority)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Updates only the status column
    ///
    /// Returns false if no task has that id. The status string is written
    /// as-is; enum validation happens on the create path only.
    pub async fn set_status(pool: &PgPool, id: i32, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task permanently
    ///
    /// Returns false if no task has that id. No cascade to related
    /// entities.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
