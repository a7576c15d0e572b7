//! Adding an item is two separate writes: the record first, then its stats.
//!
//! The interactive shell collects the stats only after [`record`] has appended the row,
//! so a stats validation failure (or a crash) leaves the record without stats. That
//! state is permanent and every reader handles it. [`run`] keeps the same ordering for
//! the non-interactive path.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CollectionError, Result};
use crate::model::{CollectionRecord, RecordDraft, StatsEntry};
use crate::store::{RecordStore, StatsStore};
use crate::validate::{RawRecord, RawStats};

/// Assign the next ID to `draft` and append it.
///
/// Store failures are reported as messages; on success the new record is the single
/// entry of `affected_records`.
pub fn record<R: RecordStore>(records: &mut R, draft: RecordDraft) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let id = match records.next_id() {
        Ok(id) => id,
        Err(e @ CollectionError::StoreNotFound(_)) => {
            result.add_message(CmdMessage::error(format!("Error: {}", e)));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    let record = CollectionRecord::new(id, draft);
    if let Err(e) = records.append(&record) {
        tracing::error!(id, error = %e, "record was not saved");
        result.add_message(CmdMessage::error(format!(
            "Error writing to {}: {}",
            records.location(),
            e
        )));
        return Ok(result);
    }

    tracing::debug!(id, name = %record.name, "record added");
    Ok(result.with_affected_records(vec![record]))
}

/// Store `entry` for `id`, replacing any previous stats for that ID.
pub fn stats<S: StatsStore>(stats: &mut S, id: u64, entry: StatsEntry) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match stats.upsert(id, entry) {
        Ok(warnings) => {
            result.add_warnings(warnings);
            result.add_message(CmdMessage::success(format!("Stats saved for ID {}.", id)));
        }
        Err(e) => {
            tracing::error!(id, error = %e, "stats were not saved");
            result.add_message(CmdMessage::error(format!(
                "Error writing to {}: {}",
                stats.location(),
                e
            )));
        }
    }

    Ok(result)
}

/// Validate and add a complete item in one call.
///
/// Record validation errors are returned before anything is written. Stats validation
/// errors come back as an error message after the record has been appended.
pub fn run<R: RecordStore, S: StatsStore>(
    records: &mut R,
    stats_store: &mut S,
    raw_record: &RawRecord,
    raw_stats: &RawStats,
) -> Result<CmdResult> {
    let draft = raw_record.parse()?;
    let name = draft.name.clone();

    let mut result = record(records, draft)?;
    let Some(id) = result.added_id() else {
        return Ok(result);
    };

    let entry = match raw_stats.parse() {
        Ok(entry) => entry,
        Err(e) if e.is_validation() => {
            result.add_message(CmdMessage::error(format!("Invalid input: {}", e)));
            result.add_message(CmdMessage::warning(format!(
                "'{}' was saved with ID {} but has no stats.",
                name, id
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    let stats_result = self::stats(stats_store, id, entry)?;
    let stats_failed = stats_result.has_errors();
    result.messages.extend(stats_result.messages);
    if !stats_failed {
        result.add_message(CmdMessage::success(format!(
            "Item '{}' added with ID {}.",
            name, id
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::{InMemoryRecordStore, InMemoryStatsStore};
    use crate::store::StoreWarning;

    fn eureka(rating: &str) -> RawRecord {
        RawRecord {
            name: "Eureka".into(),
            category: "Libro".into(),
            year: "2019".into(),
            creator: "Escritor Q".into(),
            rating: rating.into(),
        }
    }

    fn eureka_stats(rarity: &str) -> RawStats {
        RawStats {
            power: "50".into(),
            popularity: "90".into(),
            views: "7600".into(),
            rarity: rarity.into(),
        }
    }

    #[test]
    fn adds_record_and_stats_under_first_id() {
        let mut fx = StoreFixture::new();
        let result = run(&mut fx.records, &mut fx.stats, &eureka("9.2"), &eureka_stats("30")).unwrap();

        assert_eq!(result.added_id(), Some(1));
        assert!(!result.has_errors());

        let records = fx.records.read_all().unwrap().value;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].rating, 9.2);

        let stats = fx.stats.load_all().unwrap().value;
        assert_eq!(stats[&1], StatsEntry::new(50, 90, 7600, 30));
    }

    #[test]
    fn invalid_rating_writes_nothing() {
        let mut fx = StoreFixture::new();
        let err = run(&mut fx.records, &mut fx.stats, &eureka("10.5"), &eureka_stats("30")).unwrap_err();

        assert!(err.is_validation());
        assert!(fx.records.read_all().unwrap().value.is_empty());
        assert!(fx.stats.load_all().unwrap().value.is_empty());
    }

    #[test]
    fn invalid_rarity_keeps_record_without_stats() {
        let mut fx = StoreFixture::new();
        let result = run(&mut fx.records, &mut fx.stats, &eureka("9.2"), &eureka_stats("0")).unwrap();

        assert_eq!(result.added_id(), Some(1));
        assert!(result.has_errors());
        assert_eq!(fx.records.read_all().unwrap().value.len(), 1);
        assert!(fx.stats.load_all().unwrap().value.is_empty());
    }

    #[test]
    fn ids_continue_from_last_record() {
        let mut fx = StoreFixture::new().with_named(&["Aoi", "Bisho"]);
        let draft = RecordDraft::new("Crescent Song", "Canción", 2021, "Banda Z", 7.5);

        let result = record(&mut fx.records, draft).unwrap();
        assert_eq!(result.added_id(), Some(3));
    }

    #[test]
    fn missing_record_store_is_reported() {
        let mut records = InMemoryRecordStore::new();
        let draft = RecordDraft::new("Aoi", "Personaje", 2020, "Autor X", 8.5);

        let result = record(&mut records, draft).unwrap();
        assert_eq!(result.added_id(), None);
        assert!(result.has_errors());
    }

    #[test]
    fn failed_append_is_reported_not_raised() {
        let mut records = InMemoryRecordStore::with_records(Vec::new()).failing_writes();
        let draft = RecordDraft::new("Aoi", "Personaje", 2020, "Autor X", 8.5);

        let result = record(&mut records, draft).unwrap();
        assert_eq!(result.added_id(), None);
        assert!(result.has_errors());
    }

    #[test]
    fn stats_for_unknown_id_are_accepted() {
        let mut store = InMemoryStatsStore::with_entries(Default::default());
        let result = stats(&mut store, 99, StatsEntry::new(1, 1, 1, 1)).unwrap();

        assert!(!result.has_errors());
        assert!(store.load_all().unwrap().value.contains_key(&99));
    }

    #[test]
    fn stats_into_missing_store_notes_it_and_saves() {
        let mut store = InMemoryStatsStore::new();
        let result = stats(&mut store, 1, StatsEntry::new(1, 1, 1, 1)).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0]
            .content
            .contains(&StoreWarning::MissingStore(store.location()).to_string()));
        assert_eq!(store.load_all().unwrap().value.len(), 1);
    }

    #[test]
    fn failed_stats_save_is_reported() {
        let mut store = InMemoryStatsStore::with_entries(Default::default()).failing_writes();
        let result = stats(&mut store, 1, StatsEntry::new(1, 1, 1, 1)).unwrap();
        assert!(result.has_errors());
    }
}
