//! Todoist REST v2 client for uni-mirror.
//!
//! Read-only: one sync cycle issues three GET round trips (projects,
//! sections, tasks). Errors are mapped onto the [`SyncError`] taxonomy;
//! no retries happen at this layer.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use uni_mirror_core::{RemoteProject, RemoteSection, RemoteSource, RemoteTask, SyncError};

const BASE_URL: &str = "https://api.todoist.com/rest/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Todoist REST v2 API.
pub struct TodoistClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    /// Create a client authenticating with the given bearer credential.
    ///
    /// # Errors
    /// Returns [`SyncError::RemoteUnavailable`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, SyncError> {
        Self::with_base_url(token, BASE_URL)
    }

    /// Create a client against a non-default base URL (used by tests).
    ///
    /// # Errors
    /// Returns [`SyncError::RemoteUnavailable`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| SyncError::RemoteUnavailable(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|err| SyncError::RemoteUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        decode(status, response.text().await)
    }
}

fn decode<T>(status: StatusCode, body: Result<String, reqwest::Error>) -> Result<T, SyncError>
where
    T: DeserializeOwned,
{
    let body = body.map_err(|err| SyncError::RemoteUnavailable(err.to_string()))?;
    serde_json::from_str(&body)
        .map_err(|err| SyncError::RemoteMalformed(format!("HTTP {status}: {err}")))
}

impl RemoteSource for TodoistClient {
    async fn list_projects(&self) -> Result<Vec<RemoteProject>, SyncError> {
        self.get("projects", &[]).await
    }

    async fn list_sections(&self, project_id: &str) -> Result<Vec<RemoteSection>, SyncError> {
        self.get("sections", &[("project_id", project_id)]).await
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<RemoteTask>, SyncError> {
        self.get("tasks", &[("project_id", project_id)]).await
    }
}
