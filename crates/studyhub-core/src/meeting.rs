//! Meeting-creation payloads.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::sessions::{Session, SessionType, Subject};

/// Body sent to the meeting-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingRequest {
    pub topic: String,
    /// ISO-8601 with millisecond precision and a `Z` suffix.
    pub start_time: String,
    /// Whole minutes, rounded up.
    pub duration: i64,
    pub subject: Subject,
    pub title: Option<String>,
    pub session_type: SessionType,
    pub description: Option<String>,
    #[serde(rename = "zoomLink")]
    pub zoom_link: Option<String>,
}

impl MeetingRequest {
    pub fn for_session(session: &Session) -> Self {
        Self {
            topic: session.display_title().to_string(),
            start_time: session
                .start_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            duration: duration_minutes(session.start_time, session.end_time),
            subject: session.subject.clone(),
            title: session.title.clone(),
            session_type: session.session_type.clone(),
            description: session.description.clone(),
            zoom_link: session.meeting_link.clone(),
        }
    }
}

/// What the meeting endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedMeeting {
    pub join_url: String,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// Meeting length in minutes, rounded up to the next whole minute.
///
/// An end before the start yields 0.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    const MINUTE_MS: i64 = 60_000;

    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MINUTE_MS - 1) / MINUTE_MS
}
