//! UI events consumed by the reducer.

use crossterm::event::Event;
use studyhub_core::api::ApiResult;
use studyhub_core::meeting::CreatedMeeting;
use studyhub_core::sessions::Session;
use studyhub_core::view::LoadTicket;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; the only event that triggers a redraw.
    Tick,
    Terminal(Event),
    SessionsLoaded {
        ticket: LoadTicket,
        result: ApiResult<Vec<Session>>,
    },
    MeetingFinished {
        session_id: String,
        result: ApiResult<Option<CreatedMeeting>>,
    },
    /// The identity was written to config (or failed to be).
    IdentitySaved {
        identity: Option<String>,
        result: Result<(), String>,
    },
}
