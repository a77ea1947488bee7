//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never mutate
//! state or return effects.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use studyhub_core::view::{Level, Route, SessionRow};

use crate::common::truncate_with_ellipsis;
use crate::state::{AppState, TuiState};

pub const PAGE_TITLE: &str = "My Sessions";
pub const LIST_TITLE: &str = "Upcoming Sessions";
pub const CALENDAR_TITLE: &str = "Calendar";
pub const EMPTY_TEXT: &str = "You don't have any upcoming sessions.";

/// Columns taken by the selection marker.
const MARKER_WIDTH: usize = 2;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let state = &app.tui;
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(state, frame, header);
    match state.route {
        Route::Sessions => render_sessions(state, frame, body),
        Route::Calendar => render_calendar(state, frame, body),
    }
    render_footer(state, frame, footer);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, frame.area());
    }
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    let identity = match state.view.identity() {
        Some(id) => format!("signed in as {id}"),
        None => "not signed in".to_string(),
    };
    let title_width = PAGE_TITLE.len() as u16 + 1;
    let gap = area
        .width
        .saturating_sub(title_width + identity.len() as u16 + 1);

    let line = Line::from(vec![
        Span::styled(
            format!(" {PAGE_TITLE}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(gap as usize)),
        Span::styled(identity, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_sessions(state: &TuiState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {LIST_TITLE} "))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = state.view.rows(Utc::now());
    if rows.is_empty() {
        frame.render_widget(placeholder(state), inner);
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| session_item(state, row, i == state.selected, width))
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}

fn placeholder(state: &TuiState) -> Paragraph<'static> {
    let text = if state.view.is_loading() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        format!("{spinner} Loading sessions...")
    } else {
        EMPTY_TEXT.to_string()
    };
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
}

fn session_item(
    state: &TuiState,
    row: &SessionRow,
    selected: bool,
    width: usize,
) -> ListItem<'static> {
    let base = if row.past {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let marker = if selected { "▸ " } else { "  " };

    let button = action_button(row);
    let in_flight = state.view.busy() == Some(row.id.as_str());
    let spinner = if in_flight {
        format!(" {}", SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()])
    } else {
        String::new()
    };
    let when = format!(
        "{}  {}",
        state.date_label(row.start),
        state.time_range_label(row.start, row.end)
    );
    let when_width = width.saturating_sub(
        MARKER_WIDTH + button.content.len() + spinner.chars().count() + 1,
    );
    let heading_width = width.saturating_sub(MARKER_WIDTH + 2 + row.kind_label.len());

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, base.fg(Color::Cyan)),
            Span::styled(
                truncate_with_ellipsis(&row.heading, heading_width),
                base.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", row.kind_label), base.fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("  ", base),
            Span::styled(
                format!("{:<when_width$}", truncate_with_ellipsis(&when, when_width)),
                base,
            ),
            Span::raw(" "),
            button,
            Span::styled(spinner, Style::default().fg(Color::Yellow)),
        ]),
    ];
    if let Some(description) = &row.description {
        lines.push(Line::from(Span::styled(
            format!(
                "  {}",
                truncate_with_ellipsis(description, width.saturating_sub(MARKER_WIDTH))
            ),
            base.fg(Color::Gray),
        )));
    }
    lines.push(Line::default());

    ListItem::new(Text::from(lines))
}

fn action_button(row: &SessionRow) -> Span<'static> {
    let style = if row.action_enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[ {} ]", row.action_label), style)
}

/// Agenda of the listed sessions, grouped by local date.
fn render_calendar(state: &TuiState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {CALENDAR_TITLE} "))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut rows = state.view.rows(Utc::now());
    if rows.is_empty() {
        frame.render_widget(placeholder(state), inner);
        return;
    }
    rows.sort_by_key(|row| row.start);

    let mut lines = Vec::new();
    let mut current_day: Option<String> = None;
    for row in &rows {
        let day = state.date_label(row.start);
        if current_day.as_deref() != Some(day.as_str()) {
            if current_day.is_some() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                day.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            current_day = Some(day);
        }

        let style = if row.past {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(
                format!("  {}  ", state.time_range_label(row.start, row.end)),
                style.fg(Color::Cyan),
            ),
            Span::styled(row.heading.clone(), style),
        ];
        if row.has_link {
            spans.push(Span::styled("  ● meeting ready", style.fg(Color::Green)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_footer(state: &TuiState, frame: &mut Frame, area: Rect) {
    if let Some(toast) = &state.toast {
        let color = match toast.notification.level {
            Level::Success => Color::Green,
            Level::Error => Color::Red,
        };
        let line = Line::from(Span::styled(
            format!(" {}", toast.notification.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let keys = match state.route {
        Route::Sessions => " ↑/↓ select • Enter join • r reload • u sign in • q quit",
        Route::Calendar => " Esc back • r reload • q quit",
    };
    let mut spans = vec![
        Span::styled(keys, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {}", state.base_url),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if state.showing_samples {
        spans.push(Span::styled(
            "  (sample data, backend unreachable)",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
