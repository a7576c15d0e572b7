//! # Storage Layer
//!
//! The collection lives in two independent stores joined only by the record ID:
//!
//! - [`RecordStore`]: append-only log of [`CollectionRecord`]s plus ID generation
//! - [`StatsStore`]: whole-file mapping of ID to [`StatsEntry`]
//!
//! ## Implementations
//!
//! - [`records::TextRecordStore`]: pipe-delimited text file with a header row
//! - [`stats::BinaryStatsStore`]: bitcode-encoded mapping, rewritten on every save
//! - [`memory::InMemoryRecordStore`] / [`memory::InMemoryStatsStore`]: no persistence,
//!   used by command tests
//!
//! ## Storage Format
//!
//! ```text
//! <data-dir>/
//! ├── collection.txt     # id|nombre|categoria|anio|creador|calificacion
//! ├── stats.bin          # magic + version + bitcode(BTreeMap<u64, StatsEntry>)
//! └── config.json        # optional, see config.rs
//! ```
//!
//! ## Consistency
//!
//! There is no transaction spanning both stores. Callers write the record first and the
//! stats second; a failure in between leaves a record without stats, which every reader
//! must accept. Stats entries whose ID has no record (orphans) are kept forever.
//!
//! Read paths never fail because of bad content: malformed rows and unreadable stats
//! come back as [`StoreWarning`]s next to whatever could be recovered.

use crate::error::{CollectionError, Field, Result};
use crate::model::{CollectionRecord, StatsEntry, StatsMap};
use crate::validate;
use std::fmt;

pub mod memory;
pub mod records;
pub mod stats;

/// A non-fatal problem found while reading a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWarning {
    /// A data line in the record store could not be parsed and was skipped.
    MalformedLine {
        line: u64,
        content: String,
        reason: String,
    },
    /// A store file was absent on a read path that treats absence as empty.
    MissingStore(String),
    /// The stats store decoded to something that is not an ID mapping.
    UnexpectedStatsData(String),
    /// The stats store could not be read or decoded.
    UnreadableStats(String),
}

impl fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreWarning::MalformedLine {
                line,
                content,
                reason,
            } => write!(
                f,
                "Warning: skipped malformed line {} ({}): {}",
                line, reason, content
            ),
            StoreWarning::MissingStore(location) => {
                write!(f, "Store {} not found", location)
            }
            StoreWarning::UnexpectedStatsData(location) => write!(
                f,
                "Warning: unexpected data in {}; treating it as empty",
                location
            ),
            StoreWarning::UnreadableStats(detail) => {
                write!(f, "Error reading stats: {}", detail)
            }
        }
    }
}

/// A read result together with the warnings raised while producing it.
#[derive(Debug, Clone, Default)]
pub struct Loaded<T> {
    pub value: T,
    pub warnings: Vec<StoreWarning>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: StoreWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Durable, append-only log of collection records.
pub trait RecordStore {
    /// Human-readable location, used in messages.
    fn location(&self) -> String;

    /// Create the backing store (with its header) if absent.
    /// Returns `true` when something was created.
    fn ensure_initialized(&mut self) -> Result<bool>;

    /// The ID the next appended record should get.
    /// Fails with [`CollectionError::StoreNotFound`] if the store is absent.
    fn next_id(&self) -> Result<u64>;

    /// Append one record. On error the store is left unchanged.
    fn append(&mut self, record: &CollectionRecord) -> Result<()>;

    /// Every parsable record in file order. Malformed rows are skipped with a warning.
    /// Fails only with [`CollectionError::StoreNotFound`] or an I/O error.
    fn read_all(&self) -> Result<Loaded<Vec<CollectionRecord>>>;

    /// Case-insensitive substring match on the record name.
    ///
    /// Blank queries fail with [`CollectionError::EmptyInput`] before the store is read.
    /// A missing store yields an empty result with a [`StoreWarning::MissingStore`].
    fn search_by_name(&self, query: &str) -> Result<Loaded<Vec<CollectionRecord>>> {
        let needle = validate::non_empty(Field::Query, query)?.to_lowercase();

        let loaded = match self.read_all() {
            Ok(loaded) => loaded,
            Err(CollectionError::StoreNotFound(location)) => {
                let empty = Loaded::clean(Vec::new());
                return Ok(empty.with_warning(StoreWarning::MissingStore(location)));
            }
            Err(e) => return Err(e),
        };

        Ok(loaded.map(|records| {
            records
                .into_iter()
                .filter(|r| r.name.to_lowercase().contains(&needle))
                .collect()
        }))
    }
}

/// Whole-file mapping of record ID to stats.
pub trait StatsStore {
    fn location(&self) -> String;

    /// Create the backing store holding an empty mapping if absent.
    fn ensure_initialized(&mut self) -> Result<bool>;

    /// The full mapping. Empty or unreadable content yields an empty mapping plus a
    /// warning; only a missing store is an error ([`CollectionError::StoreNotFound`]).
    fn load_all(&self) -> Result<Loaded<StatsMap>>;

    /// Overwrite the whole store with `entries`.
    fn save_all(&mut self, entries: &StatsMap) -> Result<()>;

    /// Set the stats for `id`, keeping every other entry.
    ///
    /// A missing store is treated as an empty mapping (with a notice) and recreated by
    /// the save. The ID does not need to exist in the record store.
    fn upsert(&mut self, id: u64, entry: StatsEntry) -> Result<Vec<StoreWarning>> {
        let mut loaded = match self.load_all() {
            Ok(loaded) => loaded,
            Err(CollectionError::StoreNotFound(location)) => {
                tracing::info!(%location, "stats store missing, creating a new one");
                Loaded::clean(StatsMap::new())
                    .with_warning(StoreWarning::MissingStore(location))
            }
            Err(e) => return Err(e),
        };
        loaded.value.insert(id, entry);
        self.save_all(&loaded.value)?;
        Ok(loaded.warnings)
    }
}
