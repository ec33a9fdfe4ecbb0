//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. The catalog renders
//! unconditionally; only the nav bar and overlay read the session.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::features::{catalog, nav};
use crate::state::AppState;

/// Height of the nav bar (content + divider).
const NAV_HEIGHT: u16 = 2;
/// Height of the expanded menu panel.
const MENU_HEIGHT: u16 = 6;
/// Height of the hero section.
const HERO_HEIGHT: u16 = 5;
/// Height of the category row.
const CATEGORY_HEIGHT: u16 = 3;
/// Height of the key hint footer.
const FOOTER_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let menu_height = if state.menu_open { MENU_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_HEIGHT),
            Constraint::Length(menu_height),
            Constraint::Length(HERO_HEIGHT),
            Constraint::Length(CATEGORY_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    nav::render_nav(frame, chunks[0], state);
    if state.menu_open {
        nav::render_menu_panel(frame, chunks[1]);
    }
    catalog::render_hero(frame, chunks[2]);
    catalog::render_categories(frame, chunks[3]);
    catalog::render_products(frame, chunks[4], &state.catalog);
    nav::render_footer(frame, chunks[5], state);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, state.spinner_frame);
    }
}
