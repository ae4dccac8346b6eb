//! State of the entry modal: amount input plus preset or custom category.
use engine::{CategorySet, EntryKind, FALLBACK_CATEGORY, Money, PersonRecord, resolve_custom};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Amount,
    Category,
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    pub person_id: Option<Uuid>,
    pub person_name: String,
    pub kind: EntryKind,
    pub amount: String,
    pub selected_category: Option<String>,
    pub custom_mode: bool,
    pub custom: String,
    pub focus: EntryField,
    pub error: Option<String>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            person_id: None,
            person_name: String::new(),
            kind: EntryKind::Lend,
            amount: String::new(),
            selected_category: None,
            custom_mode: false,
            custom: String::new(),
            focus: EntryField::Amount,
            error: None,
        }
    }
}

/// A validated form, ready for the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub person_id: Uuid,
    pub kind: EntryKind,
    pub amount: Money,
    pub category: String,
}

impl EntryForm {
    /// Points the form at `person`. The selected preset survives between
    /// openings as long as it still exists.
    pub fn open(&mut self, person: &PersonRecord, kind: EntryKind, presets: &CategorySet) {
        self.person_id = Some(person.id);
        self.person_name = person.name.clone();
        self.kind = kind;
        self.focus = EntryField::Amount;
        self.error = None;
        let still_there = self
            .selected_category
            .as_deref()
            .is_some_and(|c| presets.contains(c));
        if !still_there {
            self.presets_changed(presets);
        }
    }

    /// Any edit of the preset list selects its first label again.
    pub fn presets_changed(&mut self, presets: &CategorySet) {
        self.selected_category = presets.first().map(str::to_string);
    }

    pub fn title(&self) -> String {
        format!("Entry for {}", self.person_name)
    }

    pub fn confirm_label(&self) -> &'static str {
        match self.kind {
            EntryKind::Lend => "Confirm Lend",
            EntryKind::Borrow => "Confirm Borrow",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.custom_mode {
            "Use Presets"
        } else {
            "Add Custom +"
        }
    }

    pub fn push_char(&mut self, ch: char) {
        match self.focus {
            EntryField::Amount => {
                if ch.is_ascii_digit() || ch == '.' || ch == ',' {
                    self.amount.push(ch);
                    self.error = None;
                }
            }
            EntryField::Category => {
                if self.custom_mode && !ch.is_control() {
                    self.custom.push(ch);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EntryField::Amount => {
                self.amount.pop();
            }
            EntryField::Category => {
                if self.custom_mode {
                    self.custom.pop();
                }
            }
        }
    }

    pub fn toggle_custom(&mut self) {
        self.custom_mode = !self.custom_mode;
        if self.custom_mode {
            self.focus = EntryField::Category;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            EntryField::Amount => EntryField::Category,
            EntryField::Category => EntryField::Amount,
        };
    }

    /// Moves the preset selection, wrapping around.
    pub fn cycle_preset(&mut self, presets: &CategorySet, forward: bool) {
        if presets.is_empty() || self.custom_mode {
            return;
        }
        let labels = presets.as_slice();
        let current = self
            .selected_category
            .as_deref()
            .and_then(|c| labels.iter().position(|l| l == c));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % labels.len(),
            (Some(idx), false) => (idx + labels.len() - 1) % labels.len(),
        };
        self.selected_category = Some(labels[next].clone());
    }

    /// Validates the form. The amount must parse and be greater than zero.
    pub fn submit(&self) -> Result<EntryDraft, String> {
        let person_id = self
            .person_id
            .ok_or_else(|| "No person selected.".to_string())?;
        let amount = self
            .amount
            .parse::<Money>()
            .map_err(|_| "Enter a valid amount.".to_string())?;
        if !amount.is_positive() {
            return Err("Amount must be greater than zero.".to_string());
        }

        let category = if self.custom_mode {
            resolve_custom(&self.custom)
        } else {
            self.selected_category
                .clone()
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
        };

        Ok(EntryDraft {
            person_id,
            kind: self.kind,
            amount,
            category,
        })
    }

    /// Clears the inputs after a successful save.
    pub fn reset(&mut self) {
        self.amount.clear();
        self.custom.clear();
        self.custom_mode = false;
        self.focus = EntryField::Amount;
        self.error = None;
    }
}
