//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every UI (the one-shot subcommands and the interactive menu alike).
//!
//! It owns the two stores and hands them to the right command. It does no I/O on
//! stdout/stderr and holds no business logic; commands return [`CmdResult`]s that the
//! caller renders.
//!
//! `CollectionApi<R, S>` is generic over both stores:
//! - Production: `CollectionApi<TextRecordStore, BinaryStatsStore>`
//! - Testing: `CollectionApi<InMemoryRecordStore, InMemoryStatsStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{RecordDraft, StatsEntry};
use crate::store::{RecordStore, StatsStore};
use crate::validate::{self, RawRecord, RawStats};

pub struct CollectionApi<R: RecordStore, S: StatsStore> {
    records: R,
    stats: S,
    paths: commands::CollectionPaths,
}

impl<R: RecordStore, S: StatsStore> CollectionApi<R, S> {
    pub fn new(records: R, stats: S, paths: commands::CollectionPaths) -> Self {
        Self {
            records,
            stats,
            paths,
        }
    }

    /// Create missing store files. Errors here should end the process.
    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.records, &mut self.stats)
    }

    pub fn seed(&mut self, threshold: usize) -> Result<commands::CmdResult> {
        commands::seed::run(&mut self.records, &mut self.stats, threshold)
    }

    /// First half of the add flow: append the record and return its ID in the result.
    pub fn add_record(&mut self, draft: RecordDraft) -> Result<commands::CmdResult> {
        commands::add::record(&mut self.records, draft)
    }

    /// Second half of the add flow.
    pub fn add_stats(&mut self, id: u64, entry: StatsEntry) -> Result<commands::CmdResult> {
        commands::add::stats(&mut self.stats, id, entry)
    }

    pub fn add_item(
        &mut self,
        raw_record: &RawRecord,
        raw_stats: &RawStats,
    ) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.records, &mut self.stats, raw_record, raw_stats)
    }

    pub fn list_records(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.records)
    }

    pub fn search_records(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.records, query)
    }

    pub fn stats_by_name(&self, query: &str) -> Result<commands::CmdResult> {
        commands::stats::by_name(&self.records, &self.stats, query)
    }

    /// `raw_id` is user input; it is validated here.
    pub fn stats_by_id(&self, raw_id: &str) -> Result<commands::CmdResult> {
        let id = validate::record_id(raw_id)?;
        commands::stats::by_id(&self.records, &self.stats, id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, CollectionPaths, MessageLevel, StatsRow};
