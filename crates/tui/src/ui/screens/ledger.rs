use engine::{Currency, PersonRecord, RECENT_ENTRIES};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Ledger, Mode},
    ui::{
        components::{
            card::{Card, StatCard},
            money::{entry_pill, styled_amount_no_sign, styled_balance},
        },
        theme::Theme,
    },
};

/// Title bar, doubling as the name input of the "add person" flow.
pub fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let adding = state.mode == Mode::AddPerson;

    let line = if adding {
        Line::from(vec![
            Span::styled(state.name_input.as_str(), Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(
            "Press n to add a new name",
            Style::default().fg(theme.dim),
        ))
    };

    Card::new("Hisab · Simple Ledger", &theme)
        .focused(adding)
        .render_with(frame, area, Paragraph::new(line));
}

pub fn render_people(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let people = state.ledger.people();
    let card = Card::new("People", &theme).focused(state.mode == Mode::List);

    if people.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled("No records found", Style::default().fg(theme.dim))),
        );
        return;
    }

    let items: Vec<ListItem> = people
        .iter()
        .map(|person| ListItem::new(person_lines(person, state, &theme)))
        .collect();

    let list = List::new(items)
        .block(card.block())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.min(people.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn person_lines(person: &PersonRecord, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut head = vec![Span::styled(
        person.name.clone(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )];
    head.push(Span::raw("  = "));
    match person.balance() {
        Ok(balance) => head.push(styled_balance(balance, state.currency, theme)),
        Err(_) => head.push(Span::styled("overflow", Style::default().fg(theme.error))),
    }
    if let Some(last) = person.entries.last() {
        let local = last.timestamp.with_timezone(&state.timezone);
        head.push(Span::styled(
            format!("  {}", local.format("%d %b %H:%M")),
            Style::default().fg(theme.dim),
        ));
    }

    let mut pills = vec![Span::raw("  ")];
    if person.entries.is_empty() {
        pills.push(Span::styled("New Account", Style::default().fg(theme.dim)));
    } else {
        for entry in person.recent(RECENT_ENTRIES) {
            pills.push(entry_pill(entry, theme));
            pills.push(Span::raw(" "));
        }
        let hidden = person.hidden_count(RECENT_ENTRIES);
        if hidden > 0 {
            pills.push(Span::styled(
                format!("+{hidden}"),
                Style::default().fg(theme.dim),
            ));
        }
    }

    vec![Line::from(head), Line::from(pills)]
}

/// "Cash to Receive" and "Cash to Give" side by side.
pub fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (receive, give) = totals(&state.ledger, state.currency, &theme);

    StatCard::new("Cash to Receive", receive.content, &theme)
        .value_style(receive.style)
        .render(frame, cols[0]);
    StatCard::new("Cash to Give", give.content, &theme)
        .value_style(give.style)
        .render(frame, cols[1]);
}

/// Values of the two total cards. A total that does not fit shows
/// "overflow", like the row balances.
fn totals(ledger: &Ledger, currency: Currency, theme: &Theme) -> (Span<'static>, Span<'static>) {
    match ledger.summary() {
        Ok(summary) => (
            styled_amount_no_sign(summary.receive, currency, theme.positive),
            styled_amount_no_sign(summary.give, currency, theme.negative),
        ),
        Err(_) => {
            let overflow = Span::styled("overflow", Style::default().fg(theme.error));
            (overflow.clone(), overflow)
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{Engine, EntryKind, MemoryStorage, Money, Storage};

    use super::*;

    fn ledger() -> Ledger {
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        Engine::builder().storage(storage).build().unwrap()
    }

    #[test]
    fn totals_split_receive_and_give() {
        let theme = Theme::default();
        let mut ledger = ledger();
        let asha = ledger.add_person("Asha").unwrap();
        let ravi = ledger.add_person("Ravi").unwrap();
        ledger
            .add_entry(asha, EntryKind::Lend, Money::new(1_500_00), "Rent")
            .unwrap();
        ledger
            .add_entry(ravi, EntryKind::Borrow, Money::new(80_50), "Food")
            .unwrap();

        let (receive, give) = totals(&ledger, Currency::Inr, &theme);
        assert_eq!(receive.content, "₹1,500");
        assert_eq!(give.content, "₹80.50");
        assert_eq!(give.style.fg, Some(theme.negative));
    }

    #[test]
    fn overflowing_totals_are_flagged() {
        let theme = Theme::default();
        let mut ledger = ledger();
        let asha = ledger.add_person("Asha").unwrap();
        for _ in 0..2 {
            ledger
                .add_entry(asha, EntryKind::Lend, Money::new(i64::MAX), "Food")
                .unwrap();
        }

        let (receive, give) = totals(&ledger, Currency::Inr, &theme);
        assert_eq!(receive.content, "overflow");
        assert_eq!(give.content, "overflow");
        assert_eq!(receive.style.fg, Some(theme.error));
    }
}
