/// Project and category catalog endpoints
///
/// Read-only surfaces for the tag catalogs. Tasks reference these by id
/// only; nothing here is consulted when a task is created.
///
/// # Endpoints
///
/// - `GET /v1/projects?user_id=…` - List a user's projects
/// - `GET /v1/categories` - List all categories

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tasknest_shared::models::{category::Category, project::Project};

/// Query parameters for project listing
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    /// Owning user
    pub user_id: i32,
}

/// List a user's projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_by_user(&state.db, query.user_id).await?;
    Ok(Json(projects))
}

/// List all categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = Category::list(&state.db).await?;
    Ok(Json(categories))
}
