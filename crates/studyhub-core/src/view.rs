//! State behind the session list.
//!
//! `SessionListView` owns the fetched sessions, the signed-in identity and the
//! busy flag. It never performs I/O: callers run the requests it asks for and
//! hand the results back. The terminal view and the one-shot commands share it.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::{ApiError, ApiResult};
use crate::meeting::{CreatedMeeting, MeetingRequest};
use crate::sessions::{Session, sample_sessions, sort_sessions};

pub const FETCH_FAILED: &str = "Could not fetch sessions.";
pub const MEETING_CREATED: &str = "Session created successfully!";
pub const MEETING_FAILED: &str = "Could not create meeting. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Screens the view can move between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Sessions,
    Calendar,
}

/// Identifies one load request. Results carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What applying a fetch result did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Sessions from the backend were published.
    Loaded(usize),
    /// The fetch failed in a local environment; sample sessions were published.
    Samples(ApiError),
    /// The fetch failed; the list is empty.
    Failed {
        error: ApiError,
        notification: Notification,
    },
    /// A newer load was started before this one finished.
    Stale,
}

impl LoadOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            LoadOutcome::Failed { notification, .. } => Some(notification),
            _ => None,
        }
    }
}

/// What the caller should do for a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinAction {
    /// Open the existing link. No request is needed.
    OpenLink { url: String },
    /// POST the request to the meeting endpoint, then call
    /// [`SessionListView::finish_meeting`].
    CreateMeeting {
        session_id: String,
        request: MeetingRequest,
    },
}

/// Why a join request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRefusal {
    /// Another meeting is being created.
    Busy { session_id: String },
    Past,
    UnknownSession,
}

impl fmt::Display for JoinRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinRefusal::Busy { session_id } => {
                write!(f, "a meeting is already being created for '{session_id}'")
            }
            JoinRefusal::Past => f.write_str("session has already ended"),
            JoinRefusal::UnknownSession => f.write_str("no such session"),
        }
    }
}

impl std::error::Error for JoinRefusal {}

/// Result of a finished meeting request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingOutcome {
    /// The new meeting link, when one was created.
    pub link: Option<String>,
    pub notification: Option<Notification>,
    pub navigate: Option<Route>,
}

/// One list row, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub id: String,
    pub heading: String,
    pub kind_label: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    /// Ended before `now`; drawn dimmed.
    pub past: bool,
    pub has_link: bool,
    pub action_label: &'static str,
    pub action_enabled: bool,
}

pub const JOIN_LABEL: &str = "Join Session";
pub const CREATE_LABEL: &str = "Create Meeting";

#[derive(Debug, Clone)]
pub struct SessionListView {
    sessions: Vec<Session>,
    identity: Option<String>,
    local: bool,
    busy: Option<String>,
    generation: u64,
    loading: bool,
}

impl SessionListView {
    /// `local` enables the sample-session fallback on fetch failure.
    pub fn new(identity: Option<String>, local: bool) -> Self {
        Self {
            sessions: Vec::new(),
            identity: normalize_identity(identity),
            local,
            busy: None,
            generation: 0,
            loading: false,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Session whose meeting is being created, if any.
    pub fn busy(&self) -> Option<&str> {
        self.busy.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Replaces the signed-in identity. Returns true when it changed, in which
    /// case the caller should reload.
    pub fn set_identity(&mut self, identity: Option<String>) -> bool {
        let identity = normalize_identity(identity);
        if identity == self.identity {
            return false;
        }
        info!(identity = ?identity, "identity changed");
        self.identity = identity;
        true
    }

    /// Starts a load and returns its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Publishes the result of the load identified by `ticket`.
    pub fn apply_fetch(
        &mut self,
        ticket: LoadTicket,
        result: ApiResult<Vec<Session>>,
        now: DateTime<Utc>,
    ) -> LoadOutcome {
        if ticket.0 != self.generation {
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(mut sessions) => {
                sort_sessions(&mut sessions, now);
                self.sessions = sessions;
                LoadOutcome::Loaded(self.sessions.len())
            }
            Err(error) if self.local => {
                warn!(%error, "session fetch failed, using sample sessions");
                self.sessions = sample_sessions(now, self.identity.as_deref());
                LoadOutcome::Samples(error)
            }
            Err(error) => {
                warn!(%error, "session fetch failed");
                self.sessions.clear();
                LoadOutcome::Failed {
                    error,
                    notification: Notification::error(FETCH_FAILED),
                }
            }
        }
    }

    /// Decides what activating `session_id` should do.
    ///
    /// Sets the busy flag when a meeting has to be created.
    pub fn begin_join(
        &mut self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<JoinAction, JoinRefusal> {
        if let Some(busy) = &self.busy {
            return Err(JoinRefusal::Busy {
                session_id: busy.clone(),
            });
        }
        let session = self
            .session(session_id)
            .ok_or(JoinRefusal::UnknownSession)?;
        if session.is_past(now) {
            return Err(JoinRefusal::Past);
        }

        if let Some(url) = &session.meeting_link {
            return Ok(JoinAction::OpenLink { url: url.clone() });
        }

        let request = MeetingRequest::for_session(session);
        self.busy = Some(session_id.to_string());
        Ok(JoinAction::CreateMeeting {
            session_id: session_id.to_string(),
            request,
        })
    }

    /// Applies the meeting endpoint's answer. Always clears the busy flag.
    pub fn finish_meeting(
        &mut self,
        session_id: &str,
        result: ApiResult<Option<CreatedMeeting>>,
    ) -> MeetingOutcome {
        if self.busy.as_deref() != Some(session_id) {
            warn!(session_id, busy = ?self.busy, "meeting finished for a session that was not in flight");
        }
        self.busy = None;

        match result {
            Ok(Some(meeting)) => {
                match self.sessions.iter_mut().find(|s| s.id == session_id) {
                    Some(session) => session.meeting_link = Some(meeting.join_url.clone()),
                    None => warn!(session_id, "created meeting for a session no longer listed"),
                }
                info!(session_id, "meeting created");
                MeetingOutcome {
                    link: Some(meeting.join_url),
                    notification: Some(Notification::success(MEETING_CREATED)),
                    navigate: Some(Route::Calendar),
                }
            }
            Ok(None) => {
                warn!(session_id, "meeting endpoint returned no meeting");
                MeetingOutcome::default()
            }
            Err(error) => {
                warn!(session_id, %error, "meeting creation failed");
                MeetingOutcome {
                    link: None,
                    notification: Some(Notification::error(MEETING_FAILED)),
                    navigate: None,
                }
            }
        }
    }

    /// Rows in display order, evaluated against one `now`.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<SessionRow> {
        self.sessions
            .iter()
            .map(|session| {
                let past = session.is_past(now);
                let has_link = session.has_meeting_link();
                SessionRow {
                    id: session.id.clone(),
                    heading: session.display_title().to_string(),
                    kind_label: session.session_type.label(),
                    start: session.start_time,
                    end: session.end_time,
                    description: session.description.clone(),
                    past,
                    has_link,
                    action_label: if has_link { JOIN_LABEL } else { CREATE_LABEL },
                    action_enabled: !past && self.busy.is_none(),
                }
            })
            .collect()
    }
}

fn normalize_identity(identity: Option<String>) -> Option<String> {
    identity
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
