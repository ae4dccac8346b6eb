//! Personal ledger engine: who owes whom how much.
//!
//! The [`Engine`] owns the list of [`PersonRecord`]s and the [`CategorySet`],
//! and writes them back to a [`Storage`] after every change. Balances and the
//! global [`Summary`] are recomputed from the entries on demand.
use uuid::Uuid;

pub use categories::{CategorySet, DEFAULT_CATEGORIES, FALLBACK_CATEGORY, resolve_custom};
pub use currency::Currency;
pub use entry::{Entry, EntryKind};
pub use error::EngineError;
pub use money::Money;
pub use person::{PersonRecord, RECENT_ENTRIES};
pub use storage::{CATEGORIES_KEY, JsonFileStorage, MemoryStorage, PEOPLE_KEY, Storage};
pub use summary::{Summary, describe};

mod categories;
mod currency;
mod entry;
mod error;
mod money;
mod person;
pub mod storage;
mod summary;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine<S: Storage> {
    people: Vec<PersonRecord>,
    categories: CategorySet,
    storage: S,
}

impl<S: Storage> Engine<S> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder { storage: None }
    }

    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    pub fn person(&self, id: Uuid) -> ResultEngine<&PersonRecord> {
        self.people
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    /// Looks a person up by id, or by name ignoring case.
    ///
    /// A name shared by several people is [`EngineError::Ambiguous`].
    pub fn find_person(&self, query: &str) -> ResultEngine<&PersonRecord> {
        let query = query.trim();
        if let Ok(id) = Uuid::parse_str(query)
            && let Some(person) = self.people.iter().find(|p| p.id == id)
        {
            return Ok(person);
        }

        let needle = query.to_lowercase();
        let mut matches = self
            .people
            .iter()
            .filter(|p| p.name.to_lowercase() == needle);
        let found = matches
            .next()
            .ok_or_else(|| EngineError::KeyNotFound(query.to_string()))?;
        if matches.next().is_some() {
            return Err(EngineError::Ambiguous(query.to_string()));
        }
        Ok(found)
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn balance(&self, id: Uuid) -> ResultEngine<Money> {
        self.person(id)?.balance()
    }

    pub fn summary(&self) -> ResultEngine<Summary> {
        Summary::from_people(&self.people)
    }

    /// Adds a new person with no history and returns its id.
    ///
    /// Names are trimmed and must not be empty; duplicates are allowed.
    pub fn add_person(&mut self, name: &str) -> ResultEngine<Uuid> {
        let person = PersonRecord::new(name)?;
        let id = person.id;
        self.update_people(|people| {
            people.push(person);
            Ok(())
        })?;
        Ok(id)
    }

    /// Deletes a person together with their whole history.
    pub fn delete_person(&mut self, id: Uuid) -> ResultEngine<()> {
        self.update_people(|people| {
            let before = people.len();
            people.retain(|p| p.id != id);
            if people.len() == before {
                return Err(EngineError::KeyNotFound(id.to_string()));
            }
            Ok(())
        })
    }

    /// Drops every entry of a person, keeping the profile.
    pub fn clear_person_entries(&mut self, id: Uuid) -> ResultEngine<()> {
        self.update_people(|people| {
            find_mut(people, id)?.clear();
            Ok(())
        })
    }

    /// Appends a new entry to a person.
    ///
    /// `amount` is the positive magnitude typed by the user, `kind` decides
    /// its sign.
    pub fn add_entry(
        &mut self,
        person_id: Uuid,
        kind: EntryKind,
        amount: Money,
        category: &str,
    ) -> ResultEngine<Uuid> {
        let entry = Entry::new(kind, amount, category)?;
        self.append_entry(person_id, entry)
    }

    /// Appends an already built entry. Used by imports and tests that need a
    /// fixed timestamp.
    pub fn append_entry(&mut self, person_id: Uuid, entry: Entry) -> ResultEngine<Uuid> {
        let id = entry.id;
        self.update_people(|people| {
            find_mut(people, person_id)?.push(entry);
            Ok(())
        })?;
        Ok(id)
    }

    pub fn add_category(&mut self, label: &str) -> ResultEngine<()> {
        self.update_categories(|categories| categories.add(label))
    }

    pub fn remove_category(&mut self, label: &str) -> ResultEngine<()> {
        self.update_categories(|categories| categories.remove(label))
    }

    /// Applies `f` to a copy of the people list and, on success, persists
    /// the copy before making it current.
    fn update_people<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<PersonRecord>) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut people = self.people.clone();
        let out = f(&mut people)?;
        storage::save_json(&mut self.storage, PEOPLE_KEY, &people)?;
        self.people = people;
        Ok(out)
    }

    fn update_categories<T>(
        &mut self,
        f: impl FnOnce(&mut CategorySet) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut categories = self.categories.clone();
        let out = f(&mut categories)?;
        storage::save_json(&mut self.storage, CATEGORIES_KEY, &categories)?;
        self.categories = categories;
        Ok(out)
    }
}

fn find_mut(people: &mut [PersonRecord], id: Uuid) -> ResultEngine<&mut PersonRecord> {
    people
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
}

/// Builder for [`Engine`]: loads the persisted state from the storage.
#[derive(Debug)]
pub struct EngineBuilder<S: Storage> {
    storage: Option<S>,
}

impl<S: Storage> EngineBuilder<S> {
    /// Pass the storage the ledger is read from and written to.
    pub fn storage(mut self, storage: S) -> EngineBuilder<S> {
        self.storage = Some(storage);
        self
    }

    /// Build the `Engine`.
    ///
    /// Missing blobs start empty (people) or with the default presets
    /// (categories). Malformed blobs are an error.
    pub fn build(self) -> ResultEngine<Engine<S>> {
        let storage = self
            .storage
            .ok_or_else(|| EngineError::KeyNotFound("storage".to_string()))?;

        let people: Vec<PersonRecord> =
            storage::load_json(&storage, PEOPLE_KEY)?.unwrap_or_default();
        let categories = storage::load_json::<Vec<String>>(&storage, CATEGORIES_KEY)?
            .map(CategorySet::from)
            .unwrap_or_default();

        Ok(Engine {
            people,
            categories,
            storage,
        })
    }
}
