//! Global totals and the plain-text digest of the ledger.
use crate::{Currency, EngineError, Money, PersonRecord, ResultEngine};

fn overflow() -> EngineError {
    EngineError::InvalidAmount("totals overflow".to_string())
}

/// What the ledger owner should receive and give back overall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Sum of the positive balances.
    pub receive: Money,
    /// Sum of the absolute values of the negative balances.
    pub give: Money,
}

impl Summary {
    pub fn from_people(people: &[PersonRecord]) -> ResultEngine<Self> {
        let mut summary = Summary::default();
        for person in people {
            let balance = person.balance()?;
            if balance.is_positive() {
                summary.receive = summary.receive.checked_add(balance).ok_or_else(overflow)?;
            } else {
                // `give` minus a non-positive balance adds its magnitude.
                summary.give = summary.give.checked_sub(balance).ok_or_else(overflow)?;
            }
        }
        Ok(summary)
    }

    pub fn net(&self) -> Money {
        self.receive - self.give
    }
}

/// One sentence per person describing their net balance, joined by spaces.
///
/// This is the text handed to the insight service. Empty when there are no
/// people.
pub fn describe(people: &[PersonRecord], currency: Currency) -> ResultEngine<String> {
    let mut sentences = Vec::with_capacity(people.len());
    for person in people {
        let balance = person.balance()?;
        let direction = if balance.is_negative() {
            "is owed by me"
        } else {
            "owes me"
        };
        sentences.push(format!(
            "{} has a net balance of {} ({direction}).",
            person.name,
            balance.format(currency)
        ));
    }
    Ok(sentences.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entry, EntryKind};

    fn person(name: &str, amounts: &[(EntryKind, i64)]) -> PersonRecord {
        let mut person = PersonRecord::new(name).unwrap();
        for (kind, minor) in amounts {
            person.push(Entry::new(*kind, Money::new(*minor), "Other").unwrap());
        }
        person
    }

    #[test]
    fn totals_overflow_is_an_error() {
        let people = vec![
            person("Asha", &[(EntryKind::Lend, i64::MAX)]),
            person("Ravi", &[(EntryKind::Lend, 1)]),
        ];
        assert!(matches!(
            Summary::from_people(&people),
            Err(EngineError::InvalidAmount(_))
        ));

        let debtor = person("Meera", &[(EntryKind::Borrow, i64::MAX), (EntryKind::Borrow, 1)]);
        assert_eq!(debtor.balance().unwrap(), Money::new(i64::MIN));
        assert!(Summary::from_people(&[debtor]).is_err());
    }

    #[test]
    fn totals_split_by_sign() {
        let people = vec![
            person("Asha", &[(EntryKind::Lend, 500_00), (EntryKind::Borrow, 100_00)]),
            person("Ravi", &[(EntryKind::Borrow, 250_00)]),
            person("Meera", &[(EntryKind::Lend, 40_00)]),
            person("Zero", &[(EntryKind::Lend, 10_00), (EntryKind::Borrow, 10_00)]),
            person("Empty", &[]),
        ];

        let summary = Summary::from_people(&people).unwrap();
        assert_eq!(summary.receive, Money::new(440_00));
        assert_eq!(summary.give, Money::new(250_00));
        assert_eq!(summary.net(), Money::new(190_00));
    }

    #[test]
    fn empty_ledger_has_zero_totals() {
        assert_eq!(Summary::from_people(&[]).unwrap(), Summary::default());
    }

    #[test]
    fn describe_lists_every_person() {
        let people = vec![
            person("Asha", &[(EntryKind::Lend, 1_500_00)]),
            person("Ravi", &[(EntryKind::Borrow, 80_50)]),
            person("New", &[]),
        ];

        let text = describe(&people, Currency::Inr).unwrap();
        assert_eq!(
            text,
            "Asha has a net balance of ₹1,500 (owes me). \
             Ravi has a net balance of -₹80.50 (is owed by me). \
             New has a net balance of ₹0 (owes me)."
        );
        assert_eq!(describe(&[], Currency::Inr).unwrap(), "");
    }
}
