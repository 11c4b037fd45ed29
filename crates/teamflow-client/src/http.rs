//! HTTP client for the task REST endpoints.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use teamflow_core::{ProjectId, Task, TaskId, TaskStatus};

use crate::error::ClientError;

/// Longest response body kept in a [`ClientError::Status`].
const BODY_PREVIEW_LIMIT: usize = 512;

/// HTTP client for the task API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: TaskStatus,
}

impl HttpClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://"))
            || Url::parse(base_url).is_err()
        {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every task visible to the caller.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.get_json("/tasks").await
    }

    /// Fetch the tasks of one project, in backend order.
    ///
    /// The API has no per-project listing, so the full list is filtered here.
    pub async fn tasks_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, ClientError> {
        let mut tasks = self.list_tasks().await?;
        tasks.retain(|t| &t.project_id == project_id);
        debug!(project_id = %project_id, count = tasks.len(), "Loaded project tasks");
        Ok(tasks)
    }

    /// Persist a new status for a task.
    pub async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(["tasks", task_id.as_str()])?;
        let response = self
            .request(Method::PUT, url)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Get JSON from an endpoint. Each `/`-separated part of `path` is sent
    /// as one percent-encoded segment.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path.split('/').filter(|s| !s.is_empty()))?;
        let response = self.request(Method::GET, url).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint<I>(&self, segments: I) -> Result<Url, ClientError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "HTTP request");

        let builder = self.inner.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let path = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        path,
        body: body.chars().take(BODY_PREVIEW_LIMIT).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(server: &Server) -> HttpClient {
        HttpClient::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(matches!(
            HttpClient::new("localhost:5000/api", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = HttpClient::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn test_tasks_by_project_filters() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"_id": "t1", "title": "A", "status": "todo", "projectId": "p1"},
                    {"_id": "t2", "title": "B", "status": "done", "projectId": "p2"},
                    {"_id": "t3", "title": "C", "status": "in-progress", "projectId": "p1"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let tasks = client(&server)
            .tasks_by_project(&ProjectId::new("p1"))
            .await
            .unwrap();

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t3"]);
        assert_eq!(tasks[1].status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_status_sends_body_and_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/tasks/t1")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::Json(json!({"status": "in-progress"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .with_token("secret-token")
            .update_task_status(&TaskId::new("t1"), TaskStatus::InProgress)
            .await
            .unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/tasks")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let tasks = client(&server).list_tasks().await.unwrap();
        assert!(tasks.is_empty());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_keeps_body_preview() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/t9")
            .with_status(404)
            .with_body("task not found")
            .create_async()
            .await;

        let err = client(&server)
            .update_task_status(&TaskId::new("t9"), TaskStatus::Done)
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, path, body } => {
                assert_eq!(status, 404);
                assert_eq!(path, "/tasks/t9");
                assert_eq!(body, "task not found");
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_task_id_is_one_path_segment() {
        let client = HttpClient::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        let url = client.endpoint(["tasks", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/tasks/a%2Fb%3Fc%23d");
    }

    #[tokio::test]
    async fn test_update_status_encodes_task_id() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/tasks/a%2Fb%3Fc")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server)
            .update_task_status(&TaskId::new("a/b?c"), TaskStatus::Done)
            .await
            .unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_json_is_serialization_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server).list_tasks().await.unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
