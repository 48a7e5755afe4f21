/// Category catalog model
///
/// Categories are the second free-form tag axis on tasks. Like projects,
/// a task's `category_id` is a soft reference with no existence check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Category catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: i32,

    /// Category name
    pub name: String,

    /// Category description
    pub description: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Lists all categories
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Finds a category by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }
}
