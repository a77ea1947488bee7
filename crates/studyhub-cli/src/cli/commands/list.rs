//! `studyhub list`

use anyhow::{Context, Result};
use chrono::Local;
use studyhub_core::config::Config;
use studyhub_core::sessions::format;
use studyhub_core::view::SessionRow;

pub async fn run(config: &Config, user: Option<String>, json: bool) -> Result<()> {
    let (_client, view, now) = super::load_view(config, user).await?;

    if json {
        let out = serde_json::to_string_pretty(view.sessions()).context("serialize sessions")?;
        println!("{out}");
        return Ok(());
    }

    let rows = view.rows(now);
    if rows.is_empty() {
        println!("You don't have any upcoming sessions.");
        return Ok(());
    }
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &SessionRow) -> String {
    let mut line = format!(
        "{:<12} {:<20} {} ({})  {}",
        format::date_label(row.start, &Local),
        format::time_range_label(row.start, row.end, &Local),
        row.heading,
        row.kind_label,
        row.id,
    );
    if row.past {
        line.push_str("  [past]");
    } else if row.has_link {
        line.push_str("  [meeting ready]");
    }
    line
}
