use std::{io::Cursor, path::PathBuf};

use engine::{Currency, Engine, EntryKind, JsonFileStorage, Money};
use hisab_cli::{
    args::{Command, ExportArgs},
    commands::{Context, run},
};
use insight::InsightConfig;

fn temp_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_data")
        .join(format!("cli_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn export_writes_every_entry_to_a_file() {
    let dir = temp_dir();
    let mut ledger = Engine::builder()
        .storage(JsonFileStorage::new(&dir))
        .build()
        .unwrap();
    let asha = ledger.add_person("Asha").unwrap();
    let ravi = ledger.add_person("Ravi").unwrap();
    ledger
        .add_entry(asha, EntryKind::Lend, Money::new(250_00), "Food")
        .unwrap();
    ledger
        .add_entry(asha, EntryKind::Borrow, Money::new(80_00), "Rent")
        .unwrap();
    ledger
        .add_entry(ravi, EntryKind::Lend, Money::new(5_50), "Travel, late night")
        .unwrap();

    let output = dir.join("entries.csv");
    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();
    let mut ctx = Context {
        currency: Currency::Inr,
        timezone: chrono_tz::Tz::UTC,
        insight: InsightConfig::default(),
        assume_yes: false,
        input: &mut input,
        out: &mut out,
    };
    run(
        &mut ledger,
        Command::Export(ExportArgs {
            output: Some(output.to_string_lossy().into_owned()),
        }),
        &mut ctx,
    )
    .await
    .unwrap();

    let message = String::from_utf8(out).unwrap();
    assert!(message.starts_with("exported 3 entries to "));

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Asha");
    assert_eq!(&rows[0][4], "250.00");
    assert_eq!(&rows[1][5], "-8000");
    assert_eq!(&rows[2][0], "Ravi");
    assert_eq!(&rows[2][6], "Travel, late night");

    let _ = std::fs::remove_dir_all(&dir);
}
