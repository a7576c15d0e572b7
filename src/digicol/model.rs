use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One item of the collection, as stored in a single row of the record store.
///
/// Records are created only through the add flow and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRecord {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub year: i32,
    pub creator: String,
    pub rating: f64,
}

impl CollectionRecord {
    pub fn new(id: u64, draft: RecordDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            year: draft.year,
            creator: draft.creator,
            rating: draft.rating,
        }
    }
}

/// A validated record that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub category: String,
    pub year: i32,
    pub creator: String,
    pub rating: f64,
}

impl RecordDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        year: i32,
        creator: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            year,
            creator: creator.into(),
            rating,
        }
    }
}

/// Numeric attributes kept in the stats store, keyed by record ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub power: i64,
    pub popularity: i64,
    pub views: i64,
    pub rarity: i64,
}

impl StatsEntry {
    pub fn new(power: i64, popularity: i64, views: i64, rarity: i64) -> Self {
        Self {
            power,
            popularity,
            views,
            rarity,
        }
    }

    /// Label/value pairs in display order.
    pub fn fields(&self) -> [(&'static str, i64); 4] {
        [
            ("power", self.power),
            ("popularity", self.popularity),
            ("views", self.views),
            ("rarity", self.rarity),
        ]
    }
}

/// The whole content of the stats store. Ordered so saves are deterministic.
pub type StatsMap = BTreeMap<u64, StatsEntry>;
