/// Project catalog model
///
/// Projects act as free-form tags on tasks: a task's `project_id` is a soft
/// reference that is never validated against this table. The rows exist so
/// the UI surfaces (sidebar, add-task form) have a catalog to render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Project catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: i32,

    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Owning user
    pub user_id: i32,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Lists all projects owned by a user
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, user_id, created_at
            FROM projects
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, user_id, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }
}
