//! Catalog presentation.
//!
//! Pure function of the static product set plus a scroll cursor. The category
//! row and the Add to Cart action render but are not wired to any state
//! change. Nothing here reads the session.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use techstore_core::catalog::{self, Product};

use crate::common::truncate_with_ellipsis;

/// Product grid cursor state.
#[derive(Debug, Default)]
pub struct CatalogState {
    /// Index of the highlighted product.
    pub cursor: usize,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let last = catalog::products().len().saturating_sub(1);
        if self.cursor < last {
            self.cursor += 1;
        }
    }

    pub fn highlighted(&self) -> Option<&'static Product> {
        catalog::products().get(self.cursor)
    }
}

/// Renders the hero section.
pub fn render_hero(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Discover Amazing Tech",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Experience the future with our premium collection",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "[ Shop Now ]",
            Style::default().fg(Color::Cyan),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).centered(),
        area.inner(ratatui::layout::Margin {
            horizontal: 1,
            vertical: 1,
        }),
    );
}

/// Renders the category row. Display only.
pub fn render_categories(frame: &mut Frame, area: Rect) {
    let filters = catalog::category_filters();
    let constraints: Vec<Constraint> = filters
        .iter()
        .map(|_| Constraint::Ratio(1, filters.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (cell, label) in cells.iter().zip(filters) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(*cell);
        frame.render_widget(block, *cell);
        frame.render_widget(
            Paragraph::new(Line::from(Span::raw(*label))).centered(),
            inner,
        );
    }
}

/// Renders the product grid with the cursor highlight.
pub fn render_products(frame: &mut Frame, area: Rect, state: &CatalogState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Featured Products ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let row_height = 2usize;
    let visible_rows = (inner.height as usize / row_height).max(1);

    // Keep the cursor in view.
    let first = state
        .cursor
        .saturating_sub(visible_rows.saturating_sub(1))
        .min(catalog::products().len().saturating_sub(visible_rows));

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (offset, product) in catalog::products().iter().enumerate().skip(first) {
        if lines.len() / row_height >= visible_rows {
            break;
        }
        let selected = offset == state.cursor;
        lines.push(product_title_line(product, selected, inner.width as usize));
        lines.push(product_detail_line(product, selected));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn product_title_line(product: &Product, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "❯ " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let name = truncate_with_ellipsis(product.name, width.saturating_sub(20));
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(name, name_style),
        Span::raw("  "),
        Span::styled(
            product.category.label(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn product_detail_line(product: &Product, selected: bool) -> Line<'static> {
    let cart = if selected { "[ Add to Cart ]" } else { "" };
    Line::from(vec![
        Span::raw("    "),
        Span::styled(product.price_display(), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(cart.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut state = CatalogState::new();
        state.move_up();
        assert_eq!(state.cursor, 0);

        for _ in 0..100 {
            state.move_down();
        }
        assert_eq!(state.cursor, catalog::products().len() - 1);
    }

    #[test]
    fn test_highlighted_follows_cursor() {
        let mut state = CatalogState::new();
        state.move_down();
        let product = state.highlighted().unwrap();
        assert_eq!(product.id, catalog::products()[1].id);
    }
}
