use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::{AppState, InsightState},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let lines = match &state.insight {
        InsightState::Idle => vec![Line::from(Span::styled(
            "Press i for a word from the Hisab Guru.",
            Style::default().fg(theme.dim),
        ))],
        InsightState::Loading => vec![Line::from(Span::styled(
            "Consulting the abacus...",
            Style::default().fg(theme.accent),
        ))],
        InsightState::Ready(insight) => vec![
            Line::from(Span::styled(
                insight.message.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                insight.advice.clone(),
                Style::default().fg(theme.dim),
            )),
        ],
    };

    Card::new("Insight", &theme)
        .focused(matches!(state.insight, InsightState::Loading))
        .render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: true }));
}
