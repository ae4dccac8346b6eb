use chrono::{TimeZone, Utc};
use uuid::Uuid;

use engine::{
    CATEGORIES_KEY, DEFAULT_CATEGORIES, Engine, EngineError, Entry, EntryKind, JsonFileStorage,
    MemoryStorage, Money, PEOPLE_KEY, Storage,
};

fn engine_in_memory() -> Engine<MemoryStorage> {
    Engine::builder()
        .storage(MemoryStorage::new())
        .build()
        .unwrap()
}

fn engine_with_file_storage() -> (Engine<JsonFileStorage>, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
    let dir = root.join(format!("ledger_{}", Uuid::new_v4()));
    let engine = Engine::builder()
        .storage(JsonFileStorage::new(&dir))
        .build()
        .unwrap();
    (engine, dir)
}

fn reopen(dir: &std::path::Path) -> Engine<JsonFileStorage> {
    Engine::builder()
        .storage(JsonFileStorage::new(dir))
        .build()
        .unwrap()
}

#[test]
fn fresh_ledger_is_empty_with_default_presets() {
    let engine = engine_in_memory();

    assert!(engine.people().is_empty());
    assert_eq!(
        engine.categories().iter().collect::<Vec<_>>(),
        DEFAULT_CATEGORIES.to_vec()
    );
    assert_eq!(engine.summary().unwrap().receive, Money::ZERO);
    assert_eq!(engine.storage().writes(), 0);
}

#[test]
fn balances_and_totals_follow_entries() {
    let mut engine = engine_in_memory();
    let asha = engine.add_person("Asha").unwrap();
    let ravi = engine.add_person("Ravi").unwrap();
    let meera = engine.add_person("Meera").unwrap();

    engine
        .add_entry(asha, EntryKind::Lend, Money::new(500_00), "Food")
        .unwrap();
    engine
        .add_entry(asha, EntryKind::Borrow, Money::new(120_00), "Travel")
        .unwrap();
    engine
        .add_entry(ravi, EntryKind::Borrow, Money::new(300_50), "Rent")
        .unwrap();
    engine
        .add_entry(meera, EntryKind::Lend, Money::new(75_00), "Gift")
        .unwrap();

    assert_eq!(engine.balance(asha).unwrap(), Money::new(380_00));
    assert_eq!(engine.balance(ravi).unwrap(), Money::new(-300_50));

    for person in engine.people() {
        let sum: Money = person.entries.iter().map(|e| e.amount).sum();
        assert_eq!(person.balance().unwrap(), sum);
    }

    let summary = engine.summary().unwrap();
    assert_eq!(summary.receive, Money::new(455_00));
    assert_eq!(summary.give, Money::new(300_50));
}

#[test]
fn entries_keep_insertion_order() {
    let mut engine = engine_in_memory();
    let id = engine.add_person("Asha").unwrap();

    let first = Entry::at(
        EntryKind::Lend,
        Money::new(10_00),
        "Food",
        Utc.timestamp_millis_opt(1_000).unwrap(),
    )
    .unwrap();
    let second = Entry::at(
        EntryKind::Borrow,
        Money::new(5_00),
        "Bills",
        Utc.timestamp_millis_opt(2_000).unwrap(),
    )
    .unwrap();
    let first_id = engine.append_entry(id, first).unwrap();
    let second_id = engine.append_entry(id, second).unwrap();

    let entries = &engine.person(id).unwrap().entries;
    assert_eq!(entries[0].id, first_id);
    assert_eq!(entries[1].id, second_id);
}

#[test]
fn invalid_operations_do_not_write() {
    let mut engine = engine_in_memory();
    let id = engine.add_person("Asha").unwrap();
    let writes = engine.storage().writes();

    assert!(matches!(
        engine.add_person("   ").unwrap_err(),
        EngineError::InvalidName(_)
    ));
    assert!(matches!(
        engine
            .add_entry(id, EntryKind::Lend, Money::ZERO, "Food")
            .unwrap_err(),
        EngineError::InvalidAmount(_)
    ));
    let missing = Uuid::new_v4();
    assert_eq!(
        engine.delete_person(missing).unwrap_err(),
        EngineError::KeyNotFound(missing.to_string())
    );
    assert!(engine.clear_person_entries(missing).is_err());
    assert!(engine.add_category("Food").is_err());
    assert!(engine.remove_category("Cinema").is_err());

    assert_eq!(engine.storage().writes(), writes);
    assert_eq!(engine.people().len(), 1);
}

#[test]
fn clear_keeps_profile_delete_removes_it() {
    let mut engine = engine_in_memory();
    let asha = engine.add_person("Asha").unwrap();
    let ravi = engine.add_person("Ravi").unwrap();
    engine
        .add_entry(asha, EntryKind::Lend, Money::new(42_00), "Food")
        .unwrap();

    engine.clear_person_entries(asha).unwrap();
    let cleared = engine.person(asha).unwrap();
    assert_eq!(cleared.name, "Asha");
    assert!(cleared.entries.is_empty());
    assert_eq!(engine.balance(asha).unwrap(), Money::ZERO);

    engine.delete_person(ravi).unwrap();
    assert!(engine.person(ravi).is_err());
    assert_eq!(engine.people().len(), 1);
}

#[test]
fn removing_a_category_keeps_existing_entries() {
    let mut engine = engine_in_memory();
    let id = engine.add_person("Asha").unwrap();
    engine.add_category("Cinema").unwrap();
    engine
        .add_entry(id, EntryKind::Lend, Money::new(300_00), "Cinema")
        .unwrap();

    engine.remove_category("Cinema").unwrap();

    assert!(!engine.categories().contains("Cinema"));
    assert_eq!(engine.person(id).unwrap().entries[0].category, "Cinema");
}

#[test]
fn find_person_by_id_or_name() {
    let mut engine = engine_in_memory();
    let asha = engine.add_person("Asha").unwrap();
    engine.add_person("Ravi").unwrap();
    engine.add_person("ravi").unwrap();

    assert_eq!(engine.find_person("ASHA").unwrap().id, asha);
    assert_eq!(engine.find_person(&asha.to_string()).unwrap().id, asha);
    assert_eq!(
        engine.find_person("Ravi").unwrap_err(),
        EngineError::Ambiguous("Ravi".to_string())
    );
    assert!(matches!(
        engine.find_person("Nobody").unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
}

#[test]
fn state_survives_reopening_the_file_storage() {
    let (mut engine, dir) = engine_with_file_storage();
    let asha = engine.add_person("Asha").unwrap();
    engine
        .add_entry(asha, EntryKind::Borrow, Money::new(99_99), "Bills")
        .unwrap();
    engine.add_category("Cinema").unwrap();
    engine.remove_category("Rent").unwrap();

    let reopened = reopen(&dir);
    assert_eq!(reopened.people(), engine.people());
    assert_eq!(reopened.categories(), engine.categories());
    assert_eq!(reopened.balance(asha).unwrap(), Money::new(-99_99));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn persisted_blobs_use_the_well_known_keys() {
    let (mut engine, dir) = engine_with_file_storage();
    let asha = engine.add_person("Asha").unwrap();
    engine
        .add_entry(asha, EntryKind::Lend, Money::new(1_00), "Food")
        .unwrap();
    engine.add_category("Cinema").unwrap();

    let storage = JsonFileStorage::new(&dir);
    let people: serde_json::Value =
        serde_json::from_str(&storage.get(PEOPLE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(people[0]["name"], "Asha");
    assert_eq!(people[0]["entries"][0]["amount"], 100);

    let categories: Vec<String> =
        serde_json::from_str(&storage.get(CATEGORIES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(categories.last().map(String::as_str), Some("Cinema"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_storage_fails_to_load() {
    let mut storage = MemoryStorage::new();
    storage.set(PEOPLE_KEY, "{oops").unwrap();

    let err = Engine::builder().storage(storage).build().unwrap_err();
    assert!(matches!(err, EngineError::Json(_)));
}

/// Memory storage whose writes can be switched off from the outside.
#[derive(Debug, Default)]
struct SwitchableStorage {
    inner: MemoryStorage,
    failing: std::rc::Rc<std::cell::Cell<bool>>,
}

impl Storage for SwitchableStorage {
    fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        if self.failing.get() {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.set(key, value)
    }
}

#[test]
fn failed_writes_leave_the_ledger_unchanged() {
    let storage = SwitchableStorage::default();
    let failing = storage.failing.clone();
    let mut engine = Engine::builder().storage(storage).build().unwrap();
    let asha = engine.add_person("Asha").unwrap();
    engine
        .add_entry(asha, EntryKind::Lend, Money::new(10_00), "Food")
        .unwrap();
    let people = engine.people().to_vec();
    let categories = engine.categories().clone();

    failing.set(true);

    let err = engine
        .add_entry(asha, EntryKind::Lend, Money::new(5_00), "Food")
        .unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
    assert!(matches!(engine.add_category("Cinema"), Err(EngineError::Io(_))));
    assert!(matches!(engine.remove_category("Food"), Err(EngineError::Io(_))));
    assert!(matches!(engine.delete_person(asha), Err(EngineError::Io(_))));
    assert!(matches!(engine.clear_person_entries(asha), Err(EngineError::Io(_))));
    assert!(matches!(engine.add_person("Ravi"), Err(EngineError::Io(_))));

    assert_eq!(engine.people(), people.as_slice());
    assert_eq!(engine.categories(), &categories);
    assert_eq!(engine.balance(asha).unwrap(), Money::new(10_00));
}
