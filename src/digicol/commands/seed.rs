use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CollectionError, Result};
use crate::model::{CollectionRecord, RecordDraft, StatsEntry};
use crate::store::{RecordStore, StatsStore};

/// The example items added to a fresh collection.
pub fn examples() -> Vec<(RecordDraft, StatsEntry)> {
    vec![
        (
            RecordDraft::new("Aoi", "Personaje", 2020, "Autor X", 8.5),
            StatsEntry::new(85, 70, 1200, 25),
        ),
        (
            RecordDraft::new("Bisho", "Personaje", 2018, "Estudio Y", 9.0),
            StatsEntry::new(92, 85, 5400, 12),
        ),
        (
            RecordDraft::new("Crescent Song", "Canción", 2021, "Banda Z", 7.5),
            StatsEntry::new(60, 65, 2300, 40),
        ),
        (
            RecordDraft::new("Drako Lance", "Arma", 2016, "Forjador K", 8.8),
            StatsEntry::new(98, 55, 800, 5),
        ),
        (
            RecordDraft::new("Eureka", "Libro", 2019, "Escritor Q", 9.2),
            StatsEntry::new(50, 90, 7600, 30),
        ),
    ]
}

/// Append the examples (and their stats) when fewer than `threshold` records parse.
///
/// Uses the regular append/upsert path. The first example gets `next_id()` and the
/// rest follow consecutively.
pub fn run<R: RecordStore, S: StatsStore>(
    records: &mut R,
    stats: &mut S,
    threshold: usize,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let existing = match records.read_all() {
        Ok(loaded) => loaded.value.len(),
        Err(CollectionError::StoreNotFound(_)) => 0,
        Err(e) => return Err(e),
    };
    if existing >= threshold {
        return Ok(result);
    }

    let examples = examples();
    let first_id = records.next_id()?;
    // Every example needs an ID; refuse before writing anything.
    let last_id = first_id
        .checked_add(examples.len() as u64 - 1)
        .ok_or(CollectionError::IdsExhausted(first_id))?;

    result.add_message(CmdMessage::info(format!(
        "Initializing the collection with {} examples...",
        examples.len()
    )));

    let mut added = Vec::new();
    for ((draft, entry), id) in examples.into_iter().zip(first_id..=last_id) {
        let record = CollectionRecord::new(id, draft);
        if let Err(e) = records.append(&record) {
            tracing::error!(id = record.id, error = %e, "example record was not saved");
            result.add_message(CmdMessage::error(format!(
                "Error writing to {}: {}",
                records.location(),
                e
            )));
            continue;
        }
        match stats.upsert(record.id, entry) {
            Ok(warnings) => result.add_warnings(warnings),
            Err(e) => {
                tracing::error!(id = record.id, error = %e, "example stats were not saved");
                result.add_message(CmdMessage::error(format!(
                    "Error writing to {}: {}",
                    stats.location(),
                    e
                )));
            }
        }
        added.push(record);
    }

    tracing::debug!(count = added.len(), first_id, "seeded example records");
    result.add_message(CmdMessage::success("Examples created."));
    Ok(result.with_affected_records(added))
}
