//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return a `UiEvent`. They
//! never touch state; the runtime spawns them and sends the result to the
//! inbox.

use studyhub_core::api::StudyHubClient;
use studyhub_core::config::Config;
use studyhub_core::meeting::MeetingRequest;
use studyhub_core::view::LoadTicket;
use tracing::debug;

use crate::events::UiEvent;

pub async fn load_sessions(client: StudyHubClient, ticket: LoadTicket) -> UiEvent {
    let result = client.fetch_sessions().await;
    debug!(ok = result.is_ok(), "session load finished");
    UiEvent::SessionsLoaded { ticket, result }
}

pub async fn create_meeting(
    client: StudyHubClient,
    session_id: String,
    request: MeetingRequest,
) -> UiEvent {
    let result = client.create_meeting(&request).await;
    UiEvent::MeetingFinished { session_id, result }
}

/// Writes the identity to config on a blocking thread.
pub async fn persist_identity(identity: Option<String>) -> UiEvent {
    let saved = identity.clone();
    let result = tokio::task::spawn_blocking(move || Config::save_user_id(saved.as_deref()))
        .await
        .map_err(|e| format!("Task failed: {e}"))
        .and_then(|r| r.map_err(|e| format!("{e:#}")));
    UiEvent::IdentitySaved { identity, result }
}

#[cfg(test)]
mod tests {
    use studyhub_core::view::SessionListView;

    use super::*;

    #[tokio::test]
    async fn test_load_sessions_reports_transport_error() {
        let client =
            StudyHubClient::new("http://127.0.0.1:9", "/api/sessions/all", "/api/meetings", None)
                .unwrap();
        let ticket = SessionListView::new(None, false).begin_load();

        let UiEvent::SessionsLoaded { ticket: got, result } = load_sessions(client, ticket).await
        else {
            panic!("expected SessionsLoaded");
        };
        assert_eq!(got, ticket);
        assert!(result.is_err());
    }
}
