//! CLI command handlers.

pub mod config;
pub mod join;
pub mod list;
pub mod view;

use anyhow::Result;
use chrono::{DateTime, Utc};
use studyhub_core::api::StudyHubClient;
use studyhub_core::config::Config;
use studyhub_core::view::{LoadOutcome, SessionListView};
use tracing::warn;

/// Fetches and sorts sessions the same way the interactive view does.
///
/// A fetch failure outside a local environment is an error; locally the
/// sample sessions are used and a warning goes to stderr.
async fn load_view(
    config: &Config,
    user: Option<String>,
) -> Result<(StudyHubClient, SessionListView, DateTime<Utc>)> {
    let client = StudyHubClient::from_config(config)?;
    let identity = user.or_else(|| config.user_id.clone());
    let mut view = SessionListView::new(identity, config.is_local(client.base_url()));

    let ticket = view.begin_load();
    let result = client.fetch_sessions().await;
    let now = Utc::now();
    match view.apply_fetch(ticket, result, now) {
        LoadOutcome::Failed {
            error,
            notification,
        } => {
            return Err(anyhow::Error::new(error).context(notification.message));
        }
        LoadOutcome::Samples(error) => {
            warn!(%error, "session fetch failed");
            eprintln!("Backend unreachable; showing sample sessions.");
        }
        LoadOutcome::Loaded(_) | LoadOutcome::Stale => {}
    }

    Ok((client, view, now))
}
