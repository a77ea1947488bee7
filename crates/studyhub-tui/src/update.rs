//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use studyhub_core::api::ApiResult;
use studyhub_core::meeting::CreatedMeeting;
use studyhub_core::sessions::Session;
use studyhub_core::view::{JoinAction, LoadOutcome, LoadTicket, Notification, Route};
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{self, IdentityState, Overlay};
use crate::state::{AppState, TuiState};

/// Effects to run once when the view opens.
pub fn mount(app: &mut AppState) -> Vec<UiEffect> {
    start_load(&mut app.tui)
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.expire_toast(Instant::now());
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key, Utc::now()),
        UiEvent::Terminal(_) => vec![],
        UiEvent::SessionsLoaded { ticket, result } => {
            handle_sessions_loaded(&mut app.tui, ticket, result, Utc::now());
            vec![]
        }
        UiEvent::MeetingFinished { session_id, result } => {
            handle_meeting_finished(&mut app.tui, &session_id, result);
            vec![]
        }
        UiEvent::IdentitySaved { identity, result } => match result {
            Ok(()) if app.tui.view.set_identity(identity) => start_load(&mut app.tui),
            Ok(()) => vec![],
            Err(error) => {
                // Keep the current identity; the config still holds it.
                app.tui
                    .notify(Notification::error(format!("Could not save identity: {error}")));
                vec![]
            }
        },
    }
}

fn start_load(tui: &mut TuiState) -> Vec<UiEffect> {
    let ticket = tui.view.begin_load();
    vec![UiEffect::LoadSessions { ticket }]
}

fn handle_sessions_loaded(
    tui: &mut TuiState,
    ticket: LoadTicket,
    result: ApiResult<Vec<Session>>,
    now: DateTime<Utc>,
) {
    match tui.view.apply_fetch(ticket, result, now) {
        LoadOutcome::Stale => return,
        LoadOutcome::Loaded(_) => tui.showing_samples = false,
        LoadOutcome::Samples(_) => tui.showing_samples = true,
        LoadOutcome::Failed { notification, .. } => {
            tui.showing_samples = false;
            tui.notify(notification);
        }
    }
    tui.clamp_selection();
}

fn handle_meeting_finished(
    tui: &mut TuiState,
    session_id: &str,
    result: ApiResult<Option<CreatedMeeting>>,
) {
    let outcome = tui.view.finish_meeting(session_id, result);
    if let Some(notification) = outcome.notification {
        tui.notify(notification);
    }
    if let Some(route) = outcome.navigate {
        tui.route = route;
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent, now: DateTime<Utc>) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if let Some(effects) = overlays::handle_overlay_key(&mut app.overlay, key) {
        return effects;
    }

    let tui = &mut app.tui;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('r') => start_load(tui),
        KeyCode::Char('u') => {
            let current = tui.view.identity().map(str::to_string);
            app.overlay = Some(Overlay::Identity(IdentityState::open(current)));
            vec![]
        }
        KeyCode::Esc if tui.route == Route::Calendar => {
            tui.route = Route::Sessions;
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') if tui.route == Route::Sessions => {
            tui.selected = tui.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') if tui.route == Route::Sessions => {
            tui.selected += 1;
            tui.clamp_selection();
            vec![]
        }
        KeyCode::Enter if tui.route == Route::Sessions => join_selected(tui, now),
        _ => vec![],
    }
}

fn join_selected(tui: &mut TuiState, now: DateTime<Utc>) -> Vec<UiEffect> {
    let Some(id) = tui.selected_id().map(str::to_string) else {
        return vec![];
    };

    match tui.view.begin_join(&id, now) {
        Ok(JoinAction::OpenLink { url }) => vec![UiEffect::OpenBrowser { url }],
        Ok(JoinAction::CreateMeeting {
            session_id,
            request,
        }) => vec![UiEffect::CreateMeeting {
            session_id,
            request,
        }],
        Err(refusal) => {
            debug!(session_id = %id, %refusal, "join refused");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use chrono::Duration;
    use studyhub_core::api::{ApiError, ApiErrorKind};
    use studyhub_core::sessions::{SessionStatus, SessionType, Subject};
    use studyhub_core::view::{Level, SessionListView};

    use super::*;

    fn app(local: bool) -> AppState {
        AppState::new(
            SessionListView::new(None, local),
            "http://localhost:3007".to_string(),
            StdDuration::from_secs(4),
        )
    }

    fn session(id: &str, start: DateTime<Utc>, link: Option<&str>) -> Session {
        Session {
            id: id.to_string(),
            tutor_id: "user-1".to_string(),
            student_id: "user-2".to_string(),
            subject: Subject {
                id: "subject-1".to_string(),
                code: "CSE101".to_string(),
                name: "Intro to Programming".to_string(),
            },
            start_time: start,
            end_time: start + Duration::minutes(45),
            status: SessionStatus::Scheduled,
            meeting_link: link.map(str::to_string),
            session_type: SessionType::Tutor,
            title: None,
            description: None,
        }
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn load(app: &mut AppState, sessions: Vec<Session>) {
        let effects = mount(app);
        let [UiEffect::LoadSessions { ticket }] = effects.as_slice() else {
            panic!("expected a single LoadSessions, got {effects:?}");
        };
        update(
            app,
            UiEvent::SessionsLoaded {
                ticket: *ticket,
                result: Ok(sessions),
            },
        );
    }

    #[test]
    fn test_mount_requests_load() {
        let mut app = app(false);
        let effects = mount(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadSessions { .. }]));
        assert!(app.tui.view.is_loading());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let now = Utc::now();
        let mut app = app(false);
        load(
            &mut app,
            vec![
                session("a", now + Duration::hours(1), None),
                session("b", now + Duration::hours(2), None),
            ],
        );

        update(&mut app, press(KeyCode::Down));
        update(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.tui.selected, 1);
        update(&mut app, press(KeyCode::Up));
        update(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.tui.selected, 0);
    }

    #[test]
    fn test_enter_on_linked_session_opens_browser() {
        let now = Utc::now();
        let mut app = app(false);
        load(
            &mut app,
            vec![session(
                "a",
                now + Duration::hours(1),
                Some("https://meet.example.com/j/1"),
            )],
        );

        let effects = update(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::OpenBrowser {
                url: "https://meet.example.com/j/1".to_string()
            }]
        );
    }

    #[test]
    fn test_create_flow_navigates_to_calendar() {
        let now = Utc::now();
        let mut app = app(false);
        load(&mut app, vec![session("a", now + Duration::hours(1), None)]);

        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CreateMeeting { session_id, .. }] if session_id == "a"
        ));
        // Busy: a second Enter does nothing.
        assert!(update(&mut app, press(KeyCode::Enter)).is_empty());

        update(
            &mut app,
            UiEvent::MeetingFinished {
                session_id: "a".to_string(),
                result: Ok(Some(CreatedMeeting {
                    join_url: "https://meet.example.com/j/2".to_string(),
                    start_url: None,
                    id: None,
                })),
            },
        );

        assert_eq!(app.tui.route, Route::Calendar);
        let toast = app.tui.toast.as_ref().unwrap();
        assert_eq!(toast.notification.level, Level::Success);
        assert_eq!(
            app.tui.view.session("a").unwrap().meeting_link.as_deref(),
            Some("https://meet.example.com/j/2")
        );

        update(&mut app, press(KeyCode::Esc));
        assert_eq!(app.tui.route, Route::Sessions);
    }

    #[test]
    fn test_failed_fetch_notifies_in_production() {
        let mut app = app(false);
        let effects = mount(&mut app);
        let [UiEffect::LoadSessions { ticket }] = effects.as_slice() else {
            panic!("expected LoadSessions");
        };
        update(
            &mut app,
            UiEvent::SessionsLoaded {
                ticket: *ticket,
                result: Err(ApiError::new(ApiErrorKind::Transport, "refused")),
            },
        );

        let toast = app.tui.toast.as_ref().unwrap();
        assert_eq!(toast.notification.message, "Could not fetch sessions.");
        assert!(!app.tui.showing_samples);
    }

    #[test]
    fn test_failed_fetch_shows_samples_locally() {
        let mut app = app(true);
        let effects = mount(&mut app);
        let [UiEffect::LoadSessions { ticket }] = effects.as_slice() else {
            panic!("expected LoadSessions");
        };
        update(
            &mut app,
            UiEvent::SessionsLoaded {
                ticket: *ticket,
                result: Err(ApiError::new(ApiErrorKind::Transport, "refused")),
            },
        );

        assert!(app.tui.toast.is_none());
        assert!(app.tui.showing_samples);
        assert_eq!(app.tui.view.sessions().len(), 2);
    }

    #[test]
    fn test_identity_change_reloads() {
        let mut app = app(false);
        update(&mut app, press(KeyCode::Char('u')));
        assert!(app.overlay.is_some());

        for c in "user-8".chars() {
            update(&mut app, press(KeyCode::Char(c)));
        }
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(app.overlay.is_none());
        assert_eq!(
            effects,
            vec![UiEffect::PersistIdentity {
                identity: Some("user-8".to_string())
            }]
        );

        let effects = update(
            &mut app,
            UiEvent::IdentitySaved {
                identity: Some("user-8".to_string()),
                result: Ok(()),
            },
        );
        assert!(matches!(effects.as_slice(), [UiEffect::LoadSessions { .. }]));
        assert_eq!(app.tui.view.identity(), Some("user-8"));

        // Same identity again: no reload.
        let effects = update(
            &mut app,
            UiEvent::IdentitySaved {
                identity: Some("user-8".to_string()),
                result: Ok(()),
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_failed_identity_save_keeps_identity() {
        let mut app = AppState::new(
            SessionListView::new(Some("user-1".to_string()), false),
            "http://localhost:3007".to_string(),
            StdDuration::from_secs(4),
        );

        let effects = update(
            &mut app,
            UiEvent::IdentitySaved {
                identity: Some("user-8".to_string()),
                result: Err("permission denied".to_string()),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(app.tui.view.identity(), Some("user-1"));
        let toast = app.tui.toast.as_ref().unwrap();
        assert_eq!(toast.notification.level, Level::Error);
        assert!(toast.notification.message.contains("permission denied"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(false);
        assert_eq!(update(&mut app, press(KeyCode::Char('q'))), vec![UiEffect::Quit]);
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut app, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_tick_expires_toast() {
        let mut app = app(false);
        app.tui.toast_duration = StdDuration::ZERO;
        app.tui.notify(Notification::error("x"));
        update(&mut app, UiEvent::Tick);
        assert!(app.tui.toast.is_none());
    }
}
