use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::calendar::{MeetingSummary, ProjectSummary, TaskSummary};
use crate::sync::session::Session;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const MEETINGS_ENDPOINT: &str = "/api/meetings";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Access denied: {0}")]
    Forbidden(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeetingRequest<'a> {
    meeting_date: String,
    message: &'a str,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudioApi: Send + Sync {
    async fn fetch_projects(
        &self,
        session: &Session,
        endpoint: &str,
    ) -> Result<Vec<ProjectSummary>, ApiError>;

    async fn fetch_tasks(
        &self,
        session: &Session,
        endpoint: &str,
    ) -> Result<Vec<TaskSummary>, ApiError>;

    async fn fetch_meetings(&self, session: &Session) -> Result<Vec<MeetingSummary>, ApiError>;

    async fn request_meeting(
        &self,
        session: &Session,
        date: NaiveDate,
        message: &str,
    ) -> Result<(), ApiError>;
}

pub struct StudioClient {
    base_url: String,
    client: reqwest::Client,
}

impl StudioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        tracing::info!("{} response status: {}", endpoint, status);

        if status == 401 {
            tracing::error!("Authentication failed for {}", endpoint);
            return Err(ApiError::AuthenticationFailed);
        }

        if status == 403 {
            tracing::error!("Access denied for {}", endpoint);
            return Err(ApiError::Forbidden(endpoint.to_string()));
        }

        if status == 404 {
            tracing::error!("Endpoint not found: {}", endpoint);
            return Err(ApiError::NotFound(endpoint.to_string()));
        }

        if status == 429 {
            tracing::warn!("Rate limit exceeded");
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Request to {} failed. Status: {}, Body: {}", endpoint, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        tracing::info!("GET {}", endpoint);

        let response = self.client
            .get(self.url(endpoint))
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let response = self.check_status(response, endpoint).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::ParseError(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl StudioApi for StudioClient {
    async fn fetch_projects(
        &self,
        session: &Session,
        endpoint: &str,
    ) -> Result<Vec<ProjectSummary>, ApiError> {
        let projects: Vec<ProjectSummary> = self.get_json(session, endpoint).await?;
        tracing::info!("Fetched {} projects from {}", projects.len(), endpoint);
        Ok(projects)
    }

    async fn fetch_tasks(
        &self,
        session: &Session,
        endpoint: &str,
    ) -> Result<Vec<TaskSummary>, ApiError> {
        let tasks: Vec<TaskSummary> = self.get_json(session, endpoint).await?;
        tracing::info!("Fetched {} tasks from {}", tasks.len(), endpoint);
        Ok(tasks)
    }

    async fn fetch_meetings(&self, session: &Session) -> Result<Vec<MeetingSummary>, ApiError> {
        let meetings: Vec<MeetingSummary> = self.get_json(session, MEETINGS_ENDPOINT).await?;
        tracing::info!("Fetched {} meetings", meetings.len());
        Ok(meetings)
    }

    async fn request_meeting(
        &self,
        session: &Session,
        date: NaiveDate,
        message: &str,
    ) -> Result<(), ApiError> {
        let payload = MeetingRequest {
            meeting_date: date.format("%Y-%m-%d").to_string(),
            message,
        };

        tracing::info!("Requesting meeting on {}", date);
        tracing::debug!("POST {} with payload: {:?}", MEETINGS_ENDPOINT, payload);

        let response = self.client
            .post(self.url(MEETINGS_ENDPOINT))
            .bearer_auth(&session.access_token)
            .json(&payload)
            .send()
            .await?;

        self.check_status(response, MEETINGS_ENDPOINT).await?;
        tracing::info!("Meeting on {} requested", date);
        Ok(())
    }
}
