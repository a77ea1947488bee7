//! Backend client: the session listing and meeting creation calls.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::meeting::{CreatedMeeting, MeetingRequest};
use crate::sessions::{Session, SessionsEnvelope, session_from_value};

/// Client for the tutoring backend.
#[derive(Debug, Clone)]
pub struct StudyHubClient {
    http: reqwest::Client,
    base_url: String,
    sessions_path: String,
    meetings_path: String,
}

impl StudyHubClient {
    /// Builds a client from config, honoring `STUDYHUB_API_BASE_URL`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.effective_base_url()?;
        Self::new(
            &base_url,
            &config.api.sessions_path,
            &config.api.meetings_path,
            config.request_timeout(),
        )
    }

    pub fn new(
        base_url: &str,
        sessions_path: &str,
        meetings_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions_path: sessions_path.to_string(),
            meetings_path: meetings_path.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetches every session the backend knows about.
    ///
    /// Malformed records are skipped and logged; the rest are returned in
    /// backend order.
    pub async fn fetch_sessions(&self) -> ApiResult<Vec<Session>> {
        let url = self.endpoint(&self.sessions_path);
        debug!(%url, "fetching sessions");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let envelope: SessionsEnvelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse(format!("Unexpected sessions response: {e}"), &body))?;

        let total = envelope.sessions.len();
        let sessions: Vec<Session> = envelope
            .sessions
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match session_from_value(index, value) {
                Ok(session) => Some(session),
                Err(invalid) => {
                    warn!(%invalid, "skipping session record");
                    None
                }
            })
            .collect();
        debug!(total, kept = sessions.len(), "sessions fetched");

        Ok(sessions)
    }

    /// Asks the backend to provision a meeting.
    ///
    /// Returns `Ok(None)` when the backend answers success with an empty or
    /// `null` body.
    pub async fn create_meeting(
        &self,
        request: &MeetingRequest,
    ) -> ApiResult<Option<CreatedMeeting>> {
        let url = self.endpoint(&self.meetings_path);
        debug!(%url, topic = %request.topic, duration = request.duration, "creating meeting");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let meeting: CreatedMeeting = serde_json::from_str(trimmed)
            .map_err(|e| ApiError::parse(format!("Unexpected meeting response: {e}"), &body))?;
        if meeting.join_url.trim().is_empty() {
            return Err(ApiError::parse("Meeting response has an empty join_url", &body));
        }

        Ok(Some(meeting))
    }
}
