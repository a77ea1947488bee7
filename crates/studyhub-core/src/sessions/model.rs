//! Session types and the mapping from the backend's wire records.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subject a session covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub code: String,
    pub name: String,
}

/// Who the session is for.
///
/// Anything the backend sends other than `tutor` is a peer study group. The
/// wire value is kept so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionType {
    #[default]
    Tutor,
    Group(String),
}

impl SessionType {
    /// Label shown under the session heading.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Tutor => "Tutoring Session",
            SessionType::Group(_) => "Peer Study Group",
        }
    }
}

impl From<String> for SessionType {
    fn from(raw: String) -> Self {
        if raw == "tutor" {
            SessionType::Tutor
        } else {
            SessionType::Group(raw)
        }
    }
}

impl From<SessionType> for String {
    fn from(kind: SessionType) -> Self {
        match kind {
            SessionType::Tutor => "tutor".to_string(),
            SessionType::Group(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A scheduled tutoring or peer-study session.
///
/// Only `meeting_link` changes after construction, once a meeting is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub subject: Subject,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
    pub session_type: SessionType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Session {
    /// A session is past once its end time is strictly before `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_time < now
    }

    /// Title, or the subject name when the session has none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.subject.name)
    }

    pub fn has_meeting_link(&self) -> bool {
        self.meeting_link.is_some()
    }
}

/// Response body of the sessions endpoint.
///
/// Records stay raw so one malformed entry does not fail the whole listing.
#[derive(Debug, Deserialize)]
pub struct SessionsEnvelope {
    pub sessions: Vec<serde_json::Value>,
}

/// One session as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub subject: Subject,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default, rename = "zoomLink")]
    pub zoom_link: Option<String>,
    #[serde(default, rename = "sessionType")]
    pub session_type: Option<SessionType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A wire record that could not be turned into a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRecord {
    /// The record does not have the expected shape.
    Shape { index: usize, reason: String },
    /// A timestamp could not be read.
    Time {
        id: String,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRecord::Shape { index, reason } => {
                write!(f, "session record #{index} is malformed: {reason}")
            }
            InvalidRecord::Time { id, field, value } => {
                write!(f, "session '{id}' has an unreadable {field}: {value:?}")
            }
        }
    }
}

impl std::error::Error for InvalidRecord {}

impl TryFrom<SessionRecord> for Session {
    type Error = InvalidRecord;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let invalid = |field: &'static str, value: &str| InvalidRecord::Time {
            id: record.id.clone(),
            field,
            value: value.to_string(),
        };
        let start_time = parse_timestamp(&record.start_time)
            .ok_or_else(|| invalid("start_time", &record.start_time))?;
        let end_time = parse_timestamp(&record.end_time)
            .ok_or_else(|| invalid("end_time", &record.end_time))?;

        Ok(Session {
            id: record.id,
            tutor_id: record.tutor_id,
            student_id: record.student_id,
            subject: record.subject,
            start_time,
            end_time,
            status: record.status.unwrap_or_default(),
            meeting_link: non_empty(record.zoom_link),
            session_type: record.session_type.unwrap_or_default(),
            title: non_empty(record.title),
            description: non_empty(record.description),
        })
    }
}

/// Decodes the `index`th raw record of a listing and maps it to a session.
pub fn session_from_value(
    index: usize,
    value: serde_json::Value,
) -> Result<Session, InvalidRecord> {
    let record: SessionRecord = serde_json::from_value(value).map_err(|e| InvalidRecord::Shape {
        index,
        reason: e.to_string(),
    })?;
    Session::try_from(record)
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a bare date-time (read as UTC), or a bare
/// date (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
