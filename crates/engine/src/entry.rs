//! The module contains the `Entry` type, one signed transaction against a
//! person's balance.
//!
//! Money lent and money borrowed are both represented by `Entry`: the sign of
//! the amount tells them apart (see [`EntryKind`]).
use core::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Direction of an entry as chosen by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money given to the counterparty: they owe the ledger owner.
    Lend,
    /// Money taken from the counterparty: the ledger owner owes them.
    Borrow,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lend => "lend",
            Self::Borrow => "borrow",
        }
    }

    /// Applies the direction to a positive amount.
    #[must_use]
    pub fn signed(self, amount: Money) -> Money {
        match self {
            Self::Lend => amount,
            Self::Borrow => -amount,
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "lend" | "plus" | "+" => Ok(Self::Lend),
            "borrow" | "minus" | "-" => Ok(Self::Borrow),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

/// An immutable record of one transaction.
///
/// The amount is stored in minor units, the timestamp as milliseconds since
/// the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub amount: Money,
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Builds a new entry stamped with the current time.
    ///
    /// `amount` is the magnitude typed by the user and must be strictly
    /// positive; `kind` decides the sign.
    pub fn new(
        kind: EntryKind,
        amount: Money,
        category: impl Into<String>,
    ) -> ResultEngine<Self> {
        Self::at(kind, amount, category, Utc::now())
    }

    /// Builds an entry at `timestamp`, truncated to the millisecond
    /// precision it is stored with.
    pub fn at(
        kind: EntryKind,
        amount: Money,
        category: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            amount: kind.signed(amount),
            category: category.into(),
            timestamp: timestamp.trunc_subsecs(3),
        })
    }

    /// `true` for money lent (and for zero amounts loaded from older data).
    pub fn is_credit(&self) -> bool {
        !self.amount.is_negative()
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_credit() {
            EntryKind::Lend
        } else {
            EntryKind::Borrow
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_credit() { "+" } else { "-" };
        write!(
            f,
            "{sign}{} {}",
            self.amount.format_magnitude(),
            self.category
        )
    }
}
