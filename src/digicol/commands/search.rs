use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

/// Records whose name contains `query`, ignoring case.
/// A blank query is an input error; nothing is read in that case.
pub fn run<R: RecordStore>(records: &R, query: &str) -> Result<CmdResult> {
    let loaded = records.search_by_name(query)?;

    let mut result = CmdResult::default();
    result.add_warnings(loaded.warnings);
    if loaded.value.is_empty() {
        result.add_message(CmdMessage::info("No matches found."));
    }
    Ok(result.with_listed_records(loaded.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn matches_substrings_case_insensitively() {
        let fx = StoreFixture::new().with_named(&["Aoi", "Drako Lance", "Crescent Song"]);

        let result = run(&fx.records, "an").unwrap();
        let names: Vec<_> = result.listed_records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Drako Lance"]);

        let upper = run(&fx.records, "AOI").unwrap();
        let lower = run(&fx.records, "aoi").unwrap();
        assert_eq!(upper.listed_records, lower.listed_records);
        assert_eq!(upper.listed_records.len(), 1);
    }

    #[test]
    fn no_match_is_reported() {
        let fx = StoreFixture::new().with_named(&["Aoi"]);
        let result = run(&fx.records, "zzz").unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn blank_query_is_rejected() {
        let fx = StoreFixture::new().with_named(&["Aoi"]);
        assert!(matches!(
            run(&fx.records, " \t "),
            Err(CollectionError::EmptyInput(_))
        ));
    }
}
