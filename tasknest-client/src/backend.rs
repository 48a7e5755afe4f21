/// TaskBackend trait
///
/// The network boundary the store talks through. Implementations perform
/// the boundary operations against some task source: the HTTP API
/// ([`crate::http::HttpBackend`]) in production, an in-memory fake
/// ([`crate::mock::MockBackend`]) in tests.
///
/// # Contract
///
/// All implementations must:
/// 1. Map "the identifying key resolves to no user" onto
///    [`crate::error::ClientError::NotFound`] with the message
///    "User not found"
/// 2. Return created tasks exactly as the backend persisted them
///    (generated id, server-side defaults applied)
/// 3. Never panic on failure; every error is a typed
///    [`crate::error::ClientError`]

use async_trait::async_trait;

use tasknest_shared::models::{task::Task, user::User};
use tasknest_shared::repo::tasks::CreateTaskInput;

use crate::error::ClientResult;

/// Boundary operations the client store consumes
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Lists all tasks for the user identified by `email`
    ///
    /// # Errors
    ///
    /// `NotFound` when the email resolves to no user.
    async fn list_tasks(&self, email: &str) -> ClientResult<Vec<Task>>;

    /// Lists all tasks owned by `user_id`
    ///
    /// # Errors
    ///
    /// `NotFound` when no user has that id.
    async fn list_tasks_for_user(&self, user_id: i32) -> ClientResult<Vec<Task>>;

    /// Fetches a user by id, None if absent
    async fn get_user(&self, user_id: i32) -> ClientResult<Option<User>>;

    /// Creates a task and returns the persisted record
    async fn create_task(&self, input: CreateTaskInput) -> ClientResult<Task>;
}
