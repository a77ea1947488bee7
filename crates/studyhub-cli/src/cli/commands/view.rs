//! Interactive session view.

use anyhow::Result;
use studyhub_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, user: Option<String>) -> Result<()> {
    studyhub_tui::run_sessions_view(config, user).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _user: Option<String>) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive view.\n\
         Use `studyhub list` or `studyhub join <SESSION_ID>`."
    )
}
