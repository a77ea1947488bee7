//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or spawns tasks itself.

use studyhub_core::meeting::MeetingRequest;
use studyhub_core::view::LoadTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Quit,

    /// Fetch the session list; the result carries `ticket` back.
    LoadSessions { ticket: LoadTicket },

    /// POST a meeting request for a session.
    CreateMeeting {
        session_id: String,
        request: MeetingRequest,
    },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Write the signed-in identity to config. `None` removes it.
    PersistIdentity { identity: Option<String> },
}
