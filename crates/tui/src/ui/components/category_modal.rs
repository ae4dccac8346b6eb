use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let manager = &state.categories;
    let popup = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup);

    let card = Card::new("Manage Categories", &theme).focused(true);
    let inner = card.inner(popup);
    frame.render_widget(card.block(), popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let input = Line::from(vec![
        Span::styled("New label: ", Style::default().fg(theme.dim)),
        Span::styled(manager.input.as_str(), Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.accent)),
    ]);
    frame.render_widget(Paragraph::new(input), rows[0]);

    if let Some(error) = &manager.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error))),
            rows[1],
        );
    }

    let categories = state.ledger.categories();
    if categories.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No presets. Entries fall back to Other.",
                Style::default().fg(theme.dim),
            )),
            rows[2],
        );
        return;
    }

    let items: Vec<ListItem> = categories
        .iter()
        .map(|label| ListItem::new(Line::from(label.to_string())))
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");
    let mut list_state = ListState::default();
    list_state.select(Some(manager.selected.min(categories.len() - 1)));
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
