use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StatsStore};

/// Create both stores if they are absent. Any failure here is fatal for the caller.
pub fn run<R: RecordStore, S: StatsStore>(records: &mut R, stats: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if records.ensure_initialized()? {
        result.add_message(CmdMessage::info(format!(
            "Created record store at {}",
            records.location()
        )));
    }
    if stats.ensure_initialized()? {
        result.add_message(CmdMessage::info(format!(
            "Created stats store at {}",
            stats.location()
        )));
    }

    Ok(result)
}
