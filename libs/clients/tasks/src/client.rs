//! HTTP client for the tasks API

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::{NewTask, Task, TaskStats};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over `reqwest` bound to one API base URL
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: i32, action: Option<&str>) -> String {
        match action {
            Some(action) => format!("{}/tasks/{}/{}", self.base_url, id, action),
            None => format!("{}/tasks/{}", self.base_url, id),
        }
    }

    /// `GET /tasks`: pending tasks in list order
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        let response = self.client.get(self.tasks_url()).send().await?;
        let tasks: Vec<Task> = check(response).await?.json().await?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    #[instrument(skip(self))]
    pub async fn create_task(&self, task: &NewTask) -> ClientResult<Task> {
        let response = self.client.post(self.tasks_url()).json(task).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `POST /tasks/{id}/done`
    #[instrument(skip(self))]
    pub async fn complete_task(&self, id: i32) -> ClientResult<()> {
        let response = self.client.post(self.task_url(id, Some("done"))).send().await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn uncomplete_task(&self, id: i32) -> ClientResult<()> {
        let response = self
            .client
            .post(self.task_url(id, Some("uncomplete")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> ClientResult<()> {
        let response = self.client.delete(self.task_url(id, None)).send().await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> ClientResult<TaskStats> {
        let response = self
            .client
            .get(format!("{}/stats", self.tasks_url()))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

impl Default for TaskClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Turn any non-2xx response into [`ClientError::Status`]
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    warn!(status = status.as_u16(), %message, "Tasks API returned an error");

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
