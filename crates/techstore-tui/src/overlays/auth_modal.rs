//! Email/password auth modal.
//!
//! Three states: closed (no overlay), login, and signup. Mode toggling
//! preserves the entered fields and clears the error line; a successful
//! submission closes the modal from the `AuthCompleted` event.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use techstore_core::session::AuthError;

use super::{OverlayUpdate, render_utils};
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Which auth operation the modal submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Sign Up",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    fn toggle_hint(self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account? Sign Up",
            AuthMode::Signup => "Already have an account? Sign In",
        }
    }
}

/// Focused input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// State for the auth modal.
#[derive(Debug)]
pub struct AuthModalState {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    /// True only while a sign-in/sign-up call is in flight.
    pub loading: bool,
    /// Set only immediately after a failed operation; cleared when a new
    /// operation starts or the mode is toggled.
    pub error: Option<String>,
}

impl AuthModalState {
    pub fn open(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            loading: false,
            error: None,
        }
    }

    /// Toggles login <-> signup. Entered fields carry over; the error line
    /// does not.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Char('t') if ctrl => {
                self.toggle_mode();
                OverlayUpdate::stay()
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    AuthField::Email => AuthField::Password,
                    AuthField::Password => AuthField::Email,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            KeyCode::Backspace => {
                self.focused_field_mut().pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.focused_field_mut().push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Validates and submits the form.
    ///
    /// Order of guards: an in-flight request hard-blocks resubmission, then
    /// form validation, then the configuration check. Only when all pass does
    /// a service call get spawned.
    fn submit(&mut self, tui: &TuiState) -> OverlayUpdate {
        if self.loading {
            return OverlayUpdate::stay();
        }

        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return OverlayUpdate::stay();
        }

        if !tui.auth_configured {
            self.error = Some(AuthError::NotConfigured.to_string());
            return OverlayUpdate::stay();
        }

        self.loading = true;
        self.error = None;
        OverlayUpdate::stay().with_ui_effects(vec![UiEffect::SpawnAuth {
            mode: self.mode,
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }])
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        render_auth_modal(frame, self, area, spinner_frame);
    }
}

fn render_auth_modal(frame: &mut Frame, state: &AuthModalState, area: Rect, spinner_frame: usize) {
    use render_utils::{InputHint, calculate_overlay_area, render_hints, render_overlay_container};

    let popup_width = 48;
    let popup_height = 13;
    let popup = calculate_overlay_area(area, popup_width, popup_height);
    render_overlay_container(frame, popup, state.mode.title(), Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    lines.push(field_label("Email", state.focus == AuthField::Email));
    lines.push(field_value(&state.email, state.focus == AuthField::Email));
    lines.push(field_label("Password", state.focus == AuthField::Password));
    let masked = "*".repeat(state.password.chars().count());
    lines.push(field_value(&masked, state.focus == AuthField::Password));
    lines.push(Line::from(""));

    let submit = if state.loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Span::styled(
            format!("{spinner} Loading..."),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(
            format!("[ {} ]", state.mode.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(submit));
    lines.push(Line::from(Span::styled(
        state.mode.toggle_hint().to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    let hints = [
        InputHint::new("Enter", "submit"),
        InputHint::new("Tab", "field"),
        InputHint::new("Ctrl+T", "mode"),
        InputHint::new("Esc", "close"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}

fn field_label(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(label.to_string(), style))
}

fn field_value(value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::raw(value.to_string()),
        Span::styled(cursor.to_string(), Style::default().fg(Color::Cyan)),
    ])
}
