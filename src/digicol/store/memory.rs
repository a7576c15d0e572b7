use super::{Loaded, RecordStore, StatsStore};
use crate::error::{id_after, CollectionError, Result};
use crate::model::{CollectionRecord, StatsMap};

const RECORDS_LOCATION: &str = "memory://records";
const STATS_LOCATION: &str = "memory://stats";

/// In-memory record store for testing and development.
/// Does NOT persist data. Starts out absent, like a fresh data directory.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Option<Vec<CollectionRecord>>,
    fail_writes: bool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An initialized store holding `records`.
    pub fn with_records(records: Vec<CollectionRecord>) -> Self {
        Self {
            records: Some(records),
            fail_writes: false,
        }
    }

    /// Make every subsequent append fail with an I/O error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl RecordStore for InMemoryRecordStore {
    fn location(&self) -> String {
        RECORDS_LOCATION.to_string()
    }

    fn ensure_initialized(&mut self) -> Result<bool> {
        if self.records.is_some() {
            return Ok(false);
        }
        self.records = Some(Vec::new());
        Ok(true)
    }

    fn next_id(&self) -> Result<u64> {
        let records = self
            .records
            .as_ref()
            .ok_or_else(|| CollectionError::StoreNotFound(self.location()))?;
        records.last().map_or(Ok(1), |r| id_after(r.id))
    }

    fn append(&mut self, record: &CollectionRecord) -> Result<()> {
        if self.fail_writes {
            return Err(CollectionError::Io(std::io::Error::other("write refused")));
        }
        self.records
            .get_or_insert_with(Vec::new)
            .push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Loaded<Vec<CollectionRecord>>> {
        self.records
            .clone()
            .map(Loaded::clean)
            .ok_or_else(|| CollectionError::StoreNotFound(self.location()))
    }
}

/// In-memory stats store for testing and development.
#[derive(Default)]
pub struct InMemoryStatsStore {
    entries: Option<StatsMap>,
    fail_writes: bool,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: StatsMap) -> Self {
        Self {
            entries: Some(entries),
            fail_writes: false,
        }
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl StatsStore for InMemoryStatsStore {
    fn location(&self) -> String {
        STATS_LOCATION.to_string()
    }

    fn ensure_initialized(&mut self) -> Result<bool> {
        if self.entries.is_some() {
            return Ok(false);
        }
        self.entries = Some(StatsMap::new());
        Ok(true)
    }

    fn load_all(&self) -> Result<Loaded<StatsMap>> {
        self.entries
            .clone()
            .map(Loaded::clean)
            .ok_or_else(|| CollectionError::StoreNotFound(self.location()))
    }

    fn save_all(&mut self, entries: &StatsMap) -> Result<()> {
        if self.fail_writes {
            return Err(CollectionError::Io(std::io::Error::other("write refused")));
        }
        self.entries = Some(entries.clone());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::StatsEntry;

    pub fn record(id: u64, name: &str) -> CollectionRecord {
        CollectionRecord {
            id,
            name: name.to_string(),
            category: "Personaje".to_string(),
            year: 2020,
            creator: "Autor X".to_string(),
            rating: 8.0,
        }
    }

    pub struct StoreFixture {
        pub records: InMemoryRecordStore,
        pub stats: InMemoryStatsStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// Both stores initialized and empty.
        pub fn new() -> Self {
            Self {
                records: InMemoryRecordStore::with_records(Vec::new()),
                stats: InMemoryStatsStore::with_entries(StatsMap::new()),
            }
        }

        /// Records named `names`, IDs from 1, each with stats whose power equals its ID.
        pub fn with_named(mut self, names: &[&str]) -> Self {
            for (i, name) in names.iter().enumerate() {
                let id = i as u64 + 1;
                self.records.append(&record(id, name)).unwrap();
                self.stats
                    .upsert(id, StatsEntry::new(id as i64, 50, 100, 10))
                    .unwrap();
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn next_id_follows_last_record() {
        let store = InMemoryRecordStore::with_records(vec![record(7, "A"), record(3, "B")]);
        assert_eq!(store.next_id().unwrap(), 4);
    }

    #[test]
    fn next_id_after_largest_possible_id_is_an_error() {
        let store = InMemoryRecordStore::with_records(vec![record(u64::MAX, "Last")]);
        assert!(matches!(
            store.next_id(),
            Err(CollectionError::IdsExhausted(u64::MAX))
        ));
    }
}
