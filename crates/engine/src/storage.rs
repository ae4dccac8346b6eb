//! Key-value persistence for the ledger.
//!
//! The ledger is written as two independent JSON blobs, overwritten
//! wholesale on every change:
//!
//! - [`PEOPLE_KEY`]: array of [`PersonRecord`](crate::PersonRecord)
//! - [`CATEGORIES_KEY`]: array of category labels
//!
//! There is no versioning: a blob that fails to parse is reported as
//! [`EngineError::Json`](crate::EngineError::Json) and never repaired.
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::ResultEngine;

pub const PEOPLE_KEY: &str = "hisab_v3";
pub const CATEGORIES_KEY: &str = "hisab_categories";

/// A string key-value store.
pub trait Storage: std::fmt::Debug {
    fn get(&self, key: &str) -> ResultEngine<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        (**self).set(key, value)
    }
}

/// Reads `key` and deserializes it, `None` when the key was never written.
pub fn load_json<T: DeserializeOwned>(
    storage: &impl Storage,
    key: &str,
) -> ResultEngine<Option<T>> {
    match storage.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> ResultEngine<()> {
    let payload = serde_json::to_string_pretty(value)?;
    storage.set(key, &payload)
}

/// Stores every key as `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn memory_round_trip_and_missing_key() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_json::<Vec<String>>(&storage, CATEGORIES_KEY).unwrap(), None);

        save_json(&mut storage, CATEGORIES_KEY, &["Food", "Gift"]).unwrap();
        let loaded: Option<Vec<String>> = load_json(&storage, CATEGORIES_KEY).unwrap();
        assert_eq!(loaded, Some(vec!["Food".to_string(), "Gift".to_string()]));
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn malformed_blob_is_a_json_error() {
        let mut storage = MemoryStorage::new();
        storage.set(PEOPLE_KEY, "[{not json").unwrap();
        let err = load_json::<Vec<String>>(&storage, PEOPLE_KEY).unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn file_paths_use_the_key() {
        let storage = JsonFileStorage::new("/tmp/hisab");
        assert_eq!(
            storage.path_for(PEOPLE_KEY),
            PathBuf::from("/tmp/hisab/hisab_v3.json")
        );
    }
}
