//! `studyhub join`

use anyhow::{Context, Result, anyhow};
use studyhub_core::config::Config;
use studyhub_core::view::{JoinAction, MEETING_FAILED};
use tracing::debug;

pub async fn run(
    config: &Config,
    user: Option<String>,
    session_id: &str,
    no_open: bool,
) -> Result<()> {
    let (client, mut view, now) = super::load_view(config, user).await?;

    let action = view
        .begin_join(session_id, now)
        .map_err(|refusal| anyhow!("Cannot join session '{session_id}': {refusal}"))?;

    let url = match action {
        JoinAction::OpenLink { url } => url,
        JoinAction::CreateMeeting {
            session_id,
            request,
        } => {
            debug!(%session_id, "creating meeting");
            let result = client.create_meeting(&request).await;
            let error = result.as_ref().err().cloned();
            let outcome = view.finish_meeting(&session_id, result);

            match (outcome.link, error) {
                (Some(link), _) => {
                    if let Some(notification) = outcome.notification {
                        eprintln!("{}", notification.message);
                    }
                    link
                }
                (None, Some(error)) => {
                    return Err(anyhow::Error::new(error).context(MEETING_FAILED));
                }
                (None, None) => anyhow::bail!("The meeting service did not return a meeting."),
            }
        }
    };

    println!("{url}");
    if !no_open {
        open::that(&url).with_context(|| format!("open {url}"))?;
    }
    Ok(())
}
