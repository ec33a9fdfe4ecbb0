//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.

pub mod auth_modal;
pub mod render_utils;

pub use auth_modal::{AuthField, AuthModalState, AuthMode};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Auth(AuthModalState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        match self {
            Overlay::Auth(modal) => modal.render(frame, area, spinner_frame),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Auth(modal) => modal.handle_key(tui, key),
        }
    }

}
