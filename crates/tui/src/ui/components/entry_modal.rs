use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    app::AppState,
    entry_form::EntryField,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.entry;
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);

    let title = form.title();
    let card = Card::new(&title, &theme).focused(true);
    let inner = card.inner(popup);
    frame.render_widget(card.block(), popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // amount
            Constraint::Min(2),    // categories
            Constraint::Length(1), // error
            Constraint::Length(1), // actions
        ])
        .split(inner);

    let field_style = |field: EntryField| {
        if form.focus == field {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.dim)
        }
    };

    let amount = Line::from(vec![
        Span::styled("Amount  ", field_style(EntryField::Amount)),
        Span::styled(
            format!("{}{}", state.currency.symbol(), form.amount),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(amount), rows[0]);

    let mut category = vec![Span::styled("Category  ", field_style(EntryField::Category))];
    if form.custom_mode {
        category.push(Span::styled(
            format!("[{}]", form.custom),
            Style::default().fg(theme.text),
        ));
    } else {
        for label in state.ledger.categories().iter() {
            let selected = form.selected_category.as_deref() == Some(label);
            let style = if selected {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(theme.text)
            };
            category.push(Span::styled(format!(" {label} "), style));
            category.push(Span::raw(" "));
        }
    }
    category.push(Span::styled(
        format!("  {}", form.toggle_label()),
        Style::default().fg(theme.dim),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(category)).wrap(Wrap { trim: true }),
        rows[1],
    );

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error))),
            rows[2],
        );
    }

    let action_color = match form.kind {
        engine::EntryKind::Lend => theme.positive,
        engine::EntryKind::Borrow => theme.negative,
    };
    let actions = Line::from(vec![
        Span::styled(
            format!(" {} ", form.confirm_label()),
            Style::default()
                .fg(action_color)
                .add_modifier(Modifier::REVERSED),
        ),
        Span::styled("  Esc close", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(actions), rows[3]);
}
