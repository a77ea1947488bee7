//! Full-screen session view for StudyHub.

pub mod common;
pub mod effects;
pub mod events;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use studyhub_core::api::StudyHubClient;
use studyhub_core::config::Config;

use crate::state::AppState;

/// Runs the interactive session view.
///
/// `identity` overrides the `user_id` from config.
pub async fn run_sessions_view(config: &Config, identity: Option<String>) -> Result<()> {
    // The view renders on the terminal; refuse to start without one
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The session view requires a terminal.\n\
             Use `studyhub list` for non-interactive output."
        );
    }

    let client = StudyHubClient::from_config(config)?;
    let state = AppState::from_config(config, identity)?;

    let mut err = stderr();
    writeln!(err, "StudyHub")?;
    writeln!(err, "API: {}", client.base_url())?;
    if state.tui.view.is_local() {
        writeln!(err, "Environment: local (sample sessions when offline)")?;
    }
    err.flush()?;

    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
