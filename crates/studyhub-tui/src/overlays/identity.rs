//! Prompt for the signed-in user id.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_input_line, render_overlay};
use crate::effects::UiEffect;

#[derive(Debug, Clone)]
pub struct IdentityState {
    pub input: String,
    /// Identity when the prompt opened; shown as the placeholder.
    pub current: Option<String>,
    pub error: Option<String>,
}

impl IdentityState {
    pub fn open(current: Option<String>) -> Self {
        Self {
            input: String::new(),
            current,
            error: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_identity_overlay(frame, self, area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => {
                let id = self.input.trim();
                if !id.is_empty() {
                    OverlayUpdate::close().with_ui_effects(vec![UiEffect::PersistIdentity {
                        identity: Some(id.to_string()),
                    }])
                } else if self.current.is_some() {
                    // Empty input signs out.
                    OverlayUpdate::close()
                        .with_ui_effects(vec![UiEffect::PersistIdentity { identity: None }])
                } else {
                    self.error = Some("Type a user id to sign in".to_string());
                    OverlayUpdate::stay()
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl && !c.is_whitespace() => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_identity_overlay(frame: &mut Frame, state: &IdentityState, area: Rect) {
    let hints = [
        InputHint::new("Enter", "save"),
        InputHint::new("Esc", "cancel"),
    ];
    let body = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Sign In",
            border_color: Color::Yellow,
            width: 50,
            height: 6,
            hints: &hints,
        },
    );
    if body.height == 0 {
        return;
    }

    let placeholder = state.current.as_deref().unwrap_or("user id");
    render_input_line(
        frame,
        Rect::new(body.x, body.y, body.width, 1),
        &state.input,
        placeholder,
        Color::Yellow,
    );

    let (help, style) = match (&state.error, &state.current) {
        (Some(error), _) => (error.as_str(), Style::default().fg(Color::Red)),
        (None, Some(_)) => (
            "Enter a new id, or leave empty to sign out",
            Style::default().fg(Color::DarkGray),
        ),
        (None, None) => ("Enter your user id", Style::default().fg(Color::DarkGray)),
    };
    if body.height > 2 {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(help, style))),
            Rect::new(body.x, body.y + 2, body.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut IdentityState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_saves_trimmed_id() {
        let mut state = IdentityState::open(None);
        type_text(&mut state, "user-5");

        let update = state.handle_key(key(KeyCode::Enter));
        assert_eq!(update.transition, OverlayTransition::Close);
        assert_eq!(
            update.effects,
            vec![UiEffect::PersistIdentity {
                identity: Some("user-5".to_string())
            }]
        );
    }

    #[test]
    fn test_empty_enter_signs_out_when_signed_in() {
        let mut state = IdentityState::open(Some("user-1".to_string()));
        let update = state.handle_key(key(KeyCode::Enter));
        assert_eq!(
            update.effects,
            vec![UiEffect::PersistIdentity { identity: None }]
        );
    }

    #[test]
    fn test_empty_enter_without_identity_stays_open() {
        let mut state = IdentityState::open(None);
        let update = state.handle_key(key(KeyCode::Enter));
        assert_eq!(update.transition, OverlayTransition::Stay);
        assert!(state.error.is_some());

        // Typing clears the error.
        state.handle_key(key(KeyCode::Char('u')));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_backspace_and_spaces() {
        let mut state = IdentityState::open(None);
        type_text(&mut state, "ab c");
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.input, "ab");
    }

    #[test]
    fn test_escape_closes_without_effects() {
        let mut state = IdentityState::open(None);
        let mut esc = key(KeyCode::Esc);
        esc.kind = KeyEventKind::Press;
        let update = state.handle_key(esc);
        assert_eq!(update.transition, OverlayTransition::Close);
        assert!(update.effects.is_empty());
    }
}
