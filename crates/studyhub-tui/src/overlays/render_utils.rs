use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Draws the bordered popup with its hint footer and returns the body area.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> Rect {
    let popup = centered_area(area, config.width, config.height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.border_color))
        .title(format!(" {} ", config.title))
        .title_style(
            Style::default()
                .fg(config.border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if config.hints.is_empty() {
        return inner;
    }

    let body_height = inner.height.saturating_sub(1);
    let footer = Rect::new(inner.x, inner.y + body_height, inner.width, 1);
    render_hints(frame, footer, config.hints, config.border_color);
    Rect::new(inner.x, inner.y, inner.width, body_height)
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Draws `prompt`, the value (or placeholder) and a block cursor on one line.
pub fn render_input_line(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    color: Color,
) {
    const PROMPT: &str = "> ";
    let max_text_width = area.width.saturating_sub(PROMPT.len() as u16 + 1) as usize;

    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Color::DarkGray))];
    if value.is_empty() {
        spans.push(Span::styled("█", Style::default().fg(color)));
        spans.push(Span::styled(
            truncate_start_with_ellipsis(placeholder, max_text_width),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(value, max_text_width),
            Style::default().fg(color),
        ));
        spans.push(Span::styled("█", Style::default().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint<'_>], highlight: Color) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
