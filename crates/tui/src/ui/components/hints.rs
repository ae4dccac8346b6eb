use ratatui::{style::Style, text::Span};

use crate::{app::Mode, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for the bottom bar in the given mode.
pub fn for_mode(mode: Mode) -> Vec<KeyHint> {
    match mode {
        Mode::List => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("n", "new person"),
            KeyHint::new("+", "lend"),
            KeyHint::new("-", "borrow"),
            KeyHint::new("c", "clear"),
            KeyHint::new("d", "delete"),
            KeyHint::new("o", "options"),
            KeyHint::new("i", "insight"),
            KeyHint::new("q", "quit"),
        ],
        Mode::AddPerson => vec![KeyHint::new("Enter", "add"), KeyHint::new("Esc", "cancel")],
        Mode::Entry => vec![
            KeyHint::new("←→", "category"),
            KeyHint::new("Tab", "custom"),
            KeyHint::new("↑↓", "field"),
            KeyHint::new("Enter", "confirm"),
            KeyHint::new("Esc", "close"),
        ],
        Mode::Categories => vec![
            KeyHint::new("Enter", "add"),
            KeyHint::new("↑↓", "select"),
            KeyHint::new("Del", "delete"),
            KeyHint::new("Esc", "done"),
        ],
        Mode::Confirm => vec![KeyHint::new("y", "confirm"), KeyHint::new("any", "cancel")],
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
