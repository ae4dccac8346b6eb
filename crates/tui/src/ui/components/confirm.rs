use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    app::ConfirmState,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, confirm: Option<&ConfirmState>) {
    let Some(confirm) = confirm else {
        return;
    };
    let theme = Theme::default();
    let popup = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            confirm.person_name.as_str(),
            Style::default().fg(theme.accent),
        )),
        Line::from(confirm.action.prompt()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.negative)),
            Span::raw(" confirm  "),
            Span::styled("any key", Style::default().fg(theme.dim)),
            Span::raw(" cancel"),
        ]),
    ];

    Card::new("Confirm", &theme).focused(true).render_with(
        frame,
        popup,
        Paragraph::new(lines).wrap(Wrap { trim: true }),
    );
}
