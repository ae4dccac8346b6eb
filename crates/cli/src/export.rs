use std::io::Write;

use engine::PersonRecord;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct ExportRow<'a> {
    person: &'a str,
    person_id: String,
    entry_id: String,
    timestamp: String,
    amount: String,
    amount_minor: i64,
    category: &'a str,
}

/// Writes one CSV row per entry, people in ledger order. Returns the number
/// of rows written.
pub fn write_csv(people: &[PersonRecord], sink: impl Write) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut rows = 0;
    for person in people {
        for entry in &person.entries {
            writer.serialize(ExportRow {
                person: &person.name,
                person_id: person.id.to_string(),
                entry_id: entry.id.to_string(),
                timestamp: entry.timestamp.to_rfc3339(),
                amount: entry.amount.to_string(),
                amount_minor: entry.amount.into(),
                category: &entry.category,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}
