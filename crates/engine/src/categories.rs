//! Preset category labels offered by the entry form.
//!
//! Entries copy the label by value, so editing this set never rewrites
//! history.
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Label used when the custom category input is left blank.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Presets installed the first time a ledger is opened.
pub const DEFAULT_CATEGORIES: [&str; 6] = ["Food", "Travel", "Rent", "Shopping", "Bills", "Other"];

/// Ordered set of unique labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl Default for CategorySet {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

impl CategorySet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|c| c == label)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Appends a trimmed label. Blank and duplicate labels are rejected.
    pub fn add(&mut self, label: &str) -> ResultEngine<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(EngineError::InvalidCategory(
                "category cannot be empty".to_string(),
            ));
        }
        if self.contains(label) {
            return Err(EngineError::ExistingKey(label.to_string()));
        }
        self.0.push(label.to_string());
        Ok(())
    }

    /// Removes every occurrence of `label`.
    pub fn remove(&mut self, label: &str) -> ResultEngine<()> {
        let before = self.0.len();
        self.0.retain(|c| c != label);
        if self.0.len() == before {
            return Err(EngineError::KeyNotFound(label.to_string()));
        }
        Ok(())
    }
}

/// Category for free-text input: the trimmed text, or [`FALLBACK_CATEGORY`].
pub fn resolve_custom(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        FALLBACK_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(value: Vec<String>) -> Self {
        let mut set = Self::empty();
        for label in value {
            // Stored blobs may carry duplicates; keep the first occurrence.
            let _ = set.add(&label);
        }
        set
    }
}
