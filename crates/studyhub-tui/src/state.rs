//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── view: SessionListView   (sessions, identity, busy flag)
//! │   ├── selected / route         (list cursor, current screen)
//! │   └── toast: Option<Toast>     (bottom notification)
//! └── overlay: Option<Overlay>     (identity prompt)
//! ```
//!
//! Overlays live beside `TuiState` so an overlay key handler can borrow both.

use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local, Utc};
use studyhub_core::config::Config;
use studyhub_core::sessions::format;
use studyhub_core::view::{Notification, Route, SessionListView};

use crate::overlays::Overlay;

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(view: SessionListView, base_url: String, toast_duration: Duration) -> Self {
        Self {
            tui: TuiState::new(view, base_url, toast_duration),
            overlay: None,
        }
    }

    /// Builds the state for a config, resolving the base URL and environment.
    pub fn from_config(config: &Config, identity: Option<String>) -> anyhow::Result<Self> {
        let base_url = config.effective_base_url()?;
        let local = config.is_local(&base_url);
        let identity = identity.or_else(|| config.user_id.clone());
        Ok(Self::new(
            SessionListView::new(identity, local),
            base_url,
            config.toast_duration(),
        ))
    }
}

/// A notification with an expiry.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

pub struct TuiState {
    pub should_quit: bool,
    pub view: SessionListView,
    /// Index into the sorted session list.
    pub selected: usize,
    pub route: Route,
    pub toast: Option<Toast>,
    pub toast_duration: Duration,
    /// The list holds offline sample sessions.
    pub showing_samples: bool,
    /// Shown in the footer.
    pub base_url: String,
    /// Fixed offset used for labels. `None` uses the machine's local zone.
    pub utc_offset: Option<FixedOffset>,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(view: SessionListView, base_url: String, toast_duration: Duration) -> Self {
        Self {
            should_quit: false,
            view,
            selected: 0,
            route: Route::Sessions,
            toast: None,
            toast_duration,
            showing_samples: false,
            base_url,
            utc_offset: None,
            spinner_frame: 0,
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.toast = Some(Toast {
            notification,
            expires_at: Instant::now() + self.toast_duration,
        });
    }

    /// Drops the toast once it has expired.
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// Keeps the cursor inside the list after it changes length.
    pub fn clamp_selection(&mut self) {
        let len = self.view.sessions().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.view
            .sessions()
            .get(self.selected)
            .map(|s| s.id.as_str())
    }

    pub fn date_label(&self, at: DateTime<Utc>) -> String {
        match &self.utc_offset {
            Some(offset) => format::date_label(at, offset),
            None => format::date_label(at, &Local),
        }
    }

    pub fn time_range_label(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        match &self.utc_offset {
            Some(offset) => format::time_range_label(start, end, offset),
            None => format::time_range_label(start, end, &Local),
        }
    }
}
