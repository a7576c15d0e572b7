use crate::commands::{CmdMessage, CmdResult, StatsRow};
use crate::error::{CollectionError, Result};
use crate::model::StatsMap;
use crate::store::{RecordStore, StatsStore};

/// Load the stats mapping, or report why there is none. `None` means stop.
fn load_stats<S: StatsStore>(stats: &S, result: &mut CmdResult) -> Result<Option<StatsMap>> {
    match stats.load_all() {
        Ok(loaded) => {
            result.add_warnings(loaded.warnings);
            Ok(Some(loaded.value))
        }
        Err(e @ CollectionError::StoreNotFound(_)) => {
            result.add_message(CmdMessage::error(e.to_string()));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Stats for every record whose name matches `query`. Records without stats get a row
/// with `stats: None`.
pub fn by_name<R: RecordStore, S: StatsStore>(
    records: &R,
    stats: &S,
    query: &str,
) -> Result<CmdResult> {
    let matches = records.search_by_name(query)?;

    let mut result = CmdResult::default();
    let Some(entries) = load_stats(stats, &mut result)? else {
        return Ok(result);
    };
    result.add_warnings(matches.warnings);

    if matches.value.is_empty() {
        result.add_message(CmdMessage::info("No items found with that name."));
        return Ok(result);
    }

    let rows = matches
        .value
        .into_iter()
        .map(|record| StatsRow {
            id: record.id,
            stats: entries.get(&record.id).copied(),
            name: Some(record.name),
        })
        .collect();
    Ok(result.with_stats_rows(rows))
}

/// Stats stored under `id`. The record name is attached when a record with that ID
/// exists; stats without a record (orphans) are still shown.
pub fn by_id<R: RecordStore, S: StatsStore>(records: &R, stats: &S, id: u64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(entries) = load_stats(stats, &mut result)? else {
        return Ok(result);
    };

    let name = match records.read_all() {
        Ok(loaded) => loaded
            .value
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.name),
        Err(CollectionError::StoreNotFound(_)) => None,
        Err(e) => return Err(e),
    };

    let row = StatsRow {
        id,
        name,
        stats: entries.get(&id).copied(),
    };
    Ok(result.with_stats_rows(vec![row]))
}
