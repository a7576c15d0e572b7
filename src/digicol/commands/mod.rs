use crate::config::CollectionConfig;
use crate::model::{CollectionRecord, StatsEntry};
use crate::store::StoreWarning;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod init;
pub mod list;
pub mod search;
pub mod seed;
pub mod stats;

#[derive(Debug, Clone)]
pub struct CollectionPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

impl From<StoreWarning> for CmdMessage {
    fn from(warning: StoreWarning) -> Self {
        CmdMessage::warning(warning.to_string())
    }
}

/// Stats lookup outcome for one ID. `name` is `None` when no record has that ID.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub id: u64,
    pub name: Option<String>,
    pub stats: Option<StatsEntry>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<CollectionRecord>,
    pub listed_records: Vec<CollectionRecord>,
    pub stats_rows: Vec<StatsRow>,
    pub config: Option<CollectionConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_warnings(&mut self, warnings: Vec<StoreWarning>) {
        self.messages.extend(warnings.into_iter().map(CmdMessage::from));
    }

    pub fn with_affected_records(mut self, records: Vec<CollectionRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<CollectionRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_stats_rows(mut self, rows: Vec<StatsRow>) -> Self {
        self.stats_rows = rows;
        self
    }

    pub fn with_config(mut self, config: CollectionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The ID of the record this command appended, if any.
    pub fn added_id(&self) -> Option<u64> {
        self.affected_records.first().map(|r| r.id)
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
