pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name input
            Constraint::Min(0),    // People
            Constraint::Length(4), // Totals
            Constraint::Length(5), // Insight
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    screens::ledger::render_header(frame, layout[0], state);
    screens::ledger::render_people(frame, layout[1], state);
    screens::ledger::render_summary(frame, layout[2], state);
    screens::insight::render(frame, layout[3], state);
    render_bottom_bar(frame, layout[4], state, &theme);

    match state.mode {
        Mode::Entry => components::entry_modal::render(frame, area, state),
        Mode::Categories => components::category_modal::render(frame, area, state),
        Mode::Confirm => components::confirm::render(frame, area, state.confirm.as_ref()),
        Mode::List | Mode::AddPerson => {}
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_mode(state.mode);
    let mut parts = components::hints::hints_to_spans(&hints, theme);
    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled(
        "Hisab • Clean Ledger",
        Style::default().fg(theme.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
