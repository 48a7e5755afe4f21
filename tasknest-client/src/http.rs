/// HTTP backend
///
/// Implements [`TaskBackend`] against the TaskNest API using reqwest. The
/// server's structured error body (`{error, message}`) is decoded back
/// into the matching [`ClientError`] category by status code, so the store
/// sees the same taxonomy whether it is talking to the API or a mock.
///
/// # Example
///
/// ```no_run
/// use tasknest_client::http::HttpBackend;
/// use tasknest_client::TaskBackend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8080");
/// let tasks = backend.list_tasks("ann@x.com").await?;
/// println!("{} tasks", tasks.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use tasknest_shared::models::{task::Task, user::User};
use tasknest_shared::repo::tasks::CreateTaskInput;

use crate::backend::TaskBackend;
use crate::error::{ClientError, ClientResult};

/// Structured error body returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
}

/// reqwest-based implementation of [`TaskBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Creates a backend for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a non-success response into the matching error category
    async fn decode_error(response: Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("unexpected response status {}", status),
        };

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::BadInput(message)
            }
            _ => ClientError::Server(message),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::decode_error(response).await)
        }
    }
}

#[async_trait]
impl TaskBackend for HttpBackend {
    async fn list_tasks(&self, email: &str) -> ClientResult<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/v1/tasks"))
            .query(&[("email", email)])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn list_tasks_for_user(&self, user_id: i32) -> ClientResult<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/v1/tasks"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn get_user(&self, user_id: i32) -> ClientResult<Option<User>> {
        let response = self
            .client
            .get(self.url(&format!("/v1/users/{}", user_id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(Self::decode(response).await?))
    }

    async fn create_task(&self, input: CreateTaskInput) -> ClientResult<Task> {
        let response = self
            .client
            .post(self.url("/v1/tasks"))
            .json(&input)
            .send()
            .await?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.url("/v1/tasks"), "http://localhost:8080/v1/tasks");
    }

    #[test]
    fn test_error_body_deserialization() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "not_found", "message": "User not found"}"#).unwrap();
        assert_eq!(body.message, "User not found");
    }
}
