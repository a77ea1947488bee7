//! Modal overlays.
//!
//! An overlay takes over keyboard input while open. Each one owns its state,
//! key handler and render function.

pub mod identity;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use identity::IdentityState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;

/// Whether the overlay stays open after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Identity(IdentityState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Identity(state) => state.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Identity(state) => state.handle_key(key),
        }
    }
}

/// Routes a key to the open overlay, closing it when asked.
///
/// Returns `None` when no overlay is open.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let update = overlay.as_mut()?.handle_key(key);
    if update.transition == OverlayTransition::Close {
        *overlay = None;
    }
    Some(update.effects)
}
