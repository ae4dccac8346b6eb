use engine::{Currency, Entry, Money};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Balance as shown at the end of each row: green when the person owes the
/// ledger owner (or is even), red otherwise.
#[must_use]
pub fn styled_balance(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else {
        theme.positive
    };

    Span::styled(
        amount.format(currency),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Creates a styled span for a money amount without the sign, for totals
/// whose label already says the direction.
#[must_use]
pub fn styled_amount_no_sign(
    amount: Money,
    currency: Currency,
    color: ratatui::style::Color,
) -> Span<'static> {
    Span::styled(amount.abs().format(currency), Style::default().fg(color))
}

/// A compact `+250 Food` chip for one entry.
#[must_use]
pub fn entry_pill(entry: &Entry, theme: &Theme) -> Span<'static> {
    let (sign, color) = if entry.is_credit() {
        ("+", theme.positive)
    } else {
        ("-", theme.negative)
    };

    Span::styled(
        format!(" {sign}{} {} ", entry.amount.format_magnitude(), entry.category),
        Style::default().fg(color).add_modifier(Modifier::REVERSED),
    )
}
