//! A named counterparty and their transaction history.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Entry, Money, ResultEngine};

/// Number of entries the list view shows for each person.
pub const RECENT_ENTRIES: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: Uuid,
    pub name: String,
    /// Insertion order is chronological order.
    pub entries: Vec<Entry>,
}

impl PersonRecord {
    /// Creates an empty record. The name must not be blank.
    pub fn new(name: &str) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName("name cannot be empty".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            entries: Vec::new(),
        })
    }

    /// Net balance: the sum of the entry amounts. Positive means the person
    /// owes the ledger owner.
    pub fn balance(&self) -> ResultEngine<Money> {
        self.entries.iter().try_fold(Money::ZERO, |acc, entry| {
            acc.checked_add(entry.amount)
                .ok_or_else(|| EngineError::InvalidAmount("balance overflow".to_string()))
        })
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[Entry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// How many entries [`PersonRecord::recent`] leaves out.
    pub fn hidden_count(&self, limit: usize) -> usize {
        self.entries.len().saturating_sub(limit)
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryKind;

    fn entry(kind: EntryKind, minor: i64) -> Entry {
        Entry::new(kind, Money::new(minor), "Other").unwrap()
    }

    #[test]
    fn new_trims_and_rejects_blank_names() {
        assert_eq!(PersonRecord::new("  Asha ").unwrap().name, "Asha");
        assert!(matches!(
            PersonRecord::new("   ").unwrap_err(),
            EngineError::InvalidName(_)
        ));
    }

    #[test]
    fn balance_is_sum_of_entries() {
        let mut person = PersonRecord::new("Ravi").unwrap();
        assert_eq!(person.balance().unwrap(), Money::ZERO);

        person.push(entry(EntryKind::Lend, 500_00));
        person.push(entry(EntryKind::Borrow, 120_50));
        person.push(entry(EntryKind::Lend, 10_00));

        assert_eq!(person.balance().unwrap(), Money::new(389_50));
    }

    #[test]
    fn balance_overflow_is_an_error() {
        let mut person = PersonRecord::new("Big").unwrap();
        person.push(entry(EntryKind::Lend, i64::MAX));
        person.push(entry(EntryKind::Lend, 1));
        assert!(person.balance().is_err());
    }

    #[test]
    fn recent_keeps_the_tail_in_order() {
        let mut person = PersonRecord::new("Meera").unwrap();
        for minor in 1..=10 {
            person.push(entry(EntryKind::Lend, minor));
        }

        let recent = person.recent(RECENT_ENTRIES);
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0].amount, Money::new(3));
        assert_eq!(recent[7].amount, Money::new(10));
        assert_eq!(person.hidden_count(RECENT_ENTRIES), 2);

        person.clear();
        assert!(person.recent(RECENT_ENTRIES).is_empty());
        assert_eq!(person.hidden_count(RECENT_ENTRIES), 0);
    }
}
