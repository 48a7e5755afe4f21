/// Mock backend
///
/// An in-memory [`TaskBackend`] for tests: seeded users and tasks,
/// server-side defaults applied on create, plus failure and latency
/// injection to exercise the store's error downgrade and race handling.
///
/// # Example
///
/// ```
/// use tasknest_client::mock::MockBackend;
///
/// let backend = MockBackend::new().with_user(1, "Ann", "ann@x.com");
/// ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use tasknest_shared::models::{task::Task, user::User};
use tasknest_shared::repo::tasks::CreateTaskInput;

use crate::backend::TaskBackend;
use crate::error::{ClientError, ClientResult};

/// In-memory implementation of [`TaskBackend`]
#[derive(Default)]
pub struct MockBackend {
    users: Mutex<Vec<User>>,
    tasks: Mutex<Vec<Task>>,
    next_task_id: Mutex<i32>,
    /// When set, list operations fail with this server error message
    fail_lists: Mutex<Option<String>>,
    /// When set, create fails with this server error message
    fail_creates: Mutex<Option<String>>,
    /// Artificial latency for list_tasks, keyed by email
    list_delays: Mutex<HashMap<String, Duration>>,
}

impl MockBackend {
    /// Creates an empty backend
    pub fn new() -> Self {
        Self {
            next_task_id: Mutex::new(1),
            ..Default::default()
        }
    }

    /// Seeds a user
    pub fn with_user(self, id: i32, name: &str, email: &str) -> Self {
        self.users.lock().unwrap().push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        });
        self
    }

    /// Seeds a task owned by `user_id`
    pub fn with_task(self, user_id: i32, title: &str) -> Self {
        {
            let mut next_id = self.next_task_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;

            self.tasks.lock().unwrap().push(Task {
                id,
                title: title.to_string(),
                description: "seeded".to_string(),
                user_id,
                project_id: None,
                category_id: None,
                status: "pending".to_string(),
                due_date: None,
                created_at: Utc::now(),
                priority: "low".to_string(),
            });
        }
        self
    }

    /// Makes list operations fail until cleared
    pub fn fail_lists_with(&self, message: &str) {
        *self.fail_lists.lock().unwrap() = Some(message.to_string());
    }

    /// Makes create fail until cleared
    pub fn fail_creates_with(&self, message: &str) {
        *self.fail_creates.lock().unwrap() = Some(message.to_string());
    }

    /// Clears any injected failures
    pub fn clear_failures(&self) {
        *self.fail_lists.lock().unwrap() = None;
        *self.fail_creates.lock().unwrap() = None;
    }

    /// Delays list_tasks responses for `email`
    pub fn delay_list_for(&self, email: &str, delay: Duration) {
        self.list_delays
            .lock()
            .unwrap()
            .insert(email.to_string(), delay);
    }

    fn tasks_for(&self, user_id: i32) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskBackend for MockBackend {
    async fn list_tasks(&self, email: &str) -> ClientResult<Vec<Task>> {
        let delay = self.list_delays.lock().unwrap().get(email).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_lists.lock().unwrap().clone() {
            return Err(ClientError::Server(message));
        }

        let user_id = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
            .ok_or_else(|| ClientError::NotFound("User not found".to_string()))?;

        Ok(self.tasks_for(user_id))
    }

    async fn list_tasks_for_user(&self, user_id: i32) -> ClientResult<Vec<Task>> {
        if let Some(message) = self.fail_lists.lock().unwrap().clone() {
            return Err(ClientError::Server(message));
        }

        if self.get_user(user_id).await?.is_none() {
            return Err(ClientError::NotFound("User not found".to_string()));
        }

        Ok(self.tasks_for(user_id))
    }

    async fn get_user(&self, user_id: i32) -> ClientResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn create_task(&self, input: CreateTaskInput) -> ClientResult<Task> {
        if let Some(message) = self.fail_creates.lock().unwrap().clone() {
            return Err(ClientError::Server(message));
        }

        if self.get_user(input.user_id).await?.is_none() {
            return Err(ClientError::NotFound("User not found".to_string()));
        }

        let id = {
            let mut next_id = self.next_task_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };

        // Apply the server-side defaults a real backend would.
        let task = Task {
            id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            user_id: input.user_id,
            project_id: input.project_id,
            category_id: input.category_id,
            status: input.status.unwrap_or_else(|| "pending".to_string()),
            due_date: None,
            created_at: Utc::now(),
            priority: input.priority.unwrap_or_else(|| "low".to_string()),
        };

        self.tasks.lock().unwrap().push(task.clone());

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_tasks_unknown_email_is_not_found() {
        let backend = MockBackend::new();
        let err = backend.list_tasks("ghost@x.com").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_defaults() {
        let backend = MockBackend::new().with_user(1, "Ann", "ann@x.com");

        let task = backend
            .create_task(CreateTaskInput {
                title: "Write spec".to_string(),
                description: "Draft v1".to_string(),
                user_id: 1,
                project_id: None,
                category_id: None,
                status: None,
                due_date: None,
                priority: None,
            })
            .await
            .unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.status, "pending");
        assert_eq!(task.priority, "low");
    }
}
