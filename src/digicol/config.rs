use crate::error::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RECORDS_FILE: &str = "collection.txt";
const DEFAULT_STATS_FILE: &str = "stats.bin";
const DEFAULT_SEED_THRESHOLD: usize = 5;

/// Configuration for a data directory, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Record store file name, relative to the data directory
    #[serde(default = "default_records_file")]
    pub records_file: String,

    /// Stats store file name, relative to the data directory
    #[serde(default = "default_stats_file")]
    pub stats_file: String,

    /// Add the example items on startup when the collection is small
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,

    /// Seed when fewer than this many records parse
    #[serde(default = "default_seed_threshold")]
    pub seed_threshold: usize,
}

fn default_records_file() -> String {
    DEFAULT_RECORDS_FILE.to_string()
}

fn default_stats_file() -> String {
    DEFAULT_STATS_FILE.to_string()
}

fn default_seed_examples() -> bool {
    true
}

fn default_seed_threshold() -> usize {
    DEFAULT_SEED_THRESHOLD
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            records_file: default_records_file(),
            stats_file: default_stats_file(),
            seed_examples: default_seed_examples(),
            seed_threshold: default_seed_threshold(),
        }
    }
}

/// Keys accepted by the `config` command.
pub const CONFIG_KEYS: &[&str] = &[
    "records-file",
    "stats-file",
    "seed-examples",
    "seed-threshold",
];

impl CollectionConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CollectionConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn records_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.records_file)
    }

    pub fn stats_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.stats_file)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "records-file" => Ok(self.records_file.clone()),
            "stats-file" => Ok(self.stats_file.clone()),
            "seed-examples" => Ok(self.seed_examples.to_string()),
            "seed-threshold" => Ok(self.seed_threshold.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "records-file" => self.records_file = file_name(key, value)?,
            "stats-file" => self.stats_file = file_name(key, value)?,
            "seed-examples" => {
                self.seed_examples = value.parse().map_err(|_| {
                    CollectionError::Config(format!("{} must be true or false", key))
                })?
            }
            "seed-threshold" => {
                self.seed_threshold = value.parse().map_err(|_| {
                    CollectionError::Config(format!("{} must be a non-negative integer", key))
                })?
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// `(key, value)` pairs for display, in [`CONFIG_KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|v| (*key, v)))
            .collect()
    }
}

fn file_name(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(CollectionError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn unknown_key(key: &str) -> CollectionError {
    CollectionError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CollectionConfig::default();
        assert_eq!(config.records_file, "collection.txt");
        assert_eq!(config.stats_file, "stats.bin");
        assert!(config.seed_examples);
        assert_eq!(config.seed_threshold, 5);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = CollectionConfig::load(dir.path()).unwrap();
        assert_eq!(config, CollectionConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");

        let mut config = CollectionConfig::default();
        config.set("stats-file", "numbers.bin").unwrap();
        config.set("seed-examples", "false").unwrap();
        config.save(&nested).unwrap();

        let loaded = CollectionConfig::load(&nested).unwrap();
        assert_eq!(loaded.stats_file, "numbers.bin");
        assert!(!loaded.seed_examples);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"seed_threshold": 2}"#).unwrap();

        let config = CollectionConfig::load(dir.path()).unwrap();
        assert_eq!(config.seed_threshold, 2);
        assert_eq!(config.records_file, "collection.txt");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CollectionConfig::default();
        assert!(config.set("seed-examples", "maybe").is_err());
        assert!(config.set("records-file", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, CollectionConfig::default());
    }
}
