//! # Data Directory Resolution
//!
//! Both store files and `config.json` live in one data directory, chosen as follows:
//!
//! 1. `data_override` (the `--data-dir` flag) is used as given.
//! 2. `global` (the `--global` flag) selects the OS data directory for the user
//!    (via the `directories` crate), e.g. `~/.local/share/digicol/`.
//! 3. Otherwise the current working directory, so `collection.txt` and `stats.bin`
//!    sit next to wherever the program was started.
//!
//! The config in that directory then names the two store files.

use crate::api::CollectionApi;
use crate::commands::CollectionPaths;
use crate::config::CollectionConfig;
use crate::error::{CollectionError, Result};
use crate::store::records::TextRecordStore;
use crate::store::stats::BinaryStatsStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub type FileApi = CollectionApi<TextRecordStore, BinaryStatsStore>;

pub struct CollectionContext {
    pub api: FileApi,
    pub config: CollectionConfig,
}

pub fn resolve_data_dir(cwd: &Path, data_override: Option<&Path>, global: bool) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            cwd.join(dir)
        });
    }

    if global {
        let proj_dirs = ProjectDirs::from("com", "digicol", "digicol").ok_or_else(|| {
            CollectionError::Config("Could not determine the user data directory".to_string())
        })?;
        return Ok(proj_dirs.data_dir().to_path_buf());
    }

    Ok(cwd.to_path_buf())
}

/// Build the API over the file stores for the resolved data directory.
///
/// Nothing is created on disk here; see [`CollectionApi::init`].
pub fn initialize(cwd: &Path, data_override: Option<&Path>, global: bool) -> Result<CollectionContext> {
    let data_dir = resolve_data_dir(cwd, data_override, global)?;

    let config = CollectionConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(dir = %data_dir.display(), error = %e, "ignoring unreadable config");
        CollectionConfig::default()
    });

    let records = TextRecordStore::new(config.records_path(&data_dir));
    let stats = BinaryStatsStore::new(config.stats_path(&data_dir));
    let api = CollectionApi::new(records, stats, CollectionPaths { data_dir });

    Ok(CollectionContext { api, config })
}
