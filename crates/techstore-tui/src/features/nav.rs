//! Navigation bar and collapsible menu panel.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::TuiState;

const NAV_LINKS: &[&str] = &["Home", "Products", "About", "Contact"];

/// Renders the top nav bar: brand, links, and the auth action whose label
/// follows session presence.
pub fn render_nav(frame: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans: Vec<Span<'static>> = vec![
        Span::styled(
            "TechStore",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for link in NAV_LINKS {
        spans.push(Span::styled(*link, Style::default().fg(Color::Gray)));
        spans.push(Span::raw("  "));
    }

    let user = state
        .session
        .as_ref()
        .and_then(|s| s.principal.email.clone());
    if let Some(email) = user {
        spans.push(Span::styled(email, Style::default().fg(Color::Green)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("[{}]", state.auth_action_label()),
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        if state.menu_open { "[✕ menu]" } else { "[☰ menu]" },
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Renders the collapsible menu panel. Only called while the menu is open.
pub fn render_menu_panel(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Menu ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line<'static>> = NAV_LINKS
        .iter()
        .map(|link| Line::from(Span::styled(*link, Style::default().fg(Color::Gray))))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the one-line key hint footer.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &TuiState) {
    let auth_hint = if state.is_signed_in() {
        "s sign out"
    } else {
        "s sign in  u sign up"
    };
    let hint = format!("↑/↓ browse  m menu  {auth_hint}  q quit");
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(hint))).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
