use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CollectionError, Result};
use crate::store::RecordStore;

/// Every readable record in file order. A missing store reads as empty.
pub fn run<R: RecordStore>(records: &R) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let loaded = match records.read_all() {
        Ok(loaded) => loaded,
        Err(e @ CollectionError::StoreNotFound(_)) => {
            result.add_message(CmdMessage::warning(e.to_string()));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    result.add_warnings(loaded.warnings);
    if loaded.value.is_empty() {
        result.add_message(CmdMessage::info("The collection is empty."));
    }
    Ok(result.with_listed_records(loaded.value))
}
