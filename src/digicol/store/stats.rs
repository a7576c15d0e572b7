use super::{Loaded, StatsStore, StoreWarning};
use crate::error::{CollectionError, Result};
use crate::model::StatsMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"DCST";
const FORMAT_VERSION: u8 = 1;
const PREAMBLE_LEN: usize = MAGIC.len() + 1;

/// Stats store backed by a single binary file.
///
/// Layout: `MAGIC`, one version byte, then the bitcode encoding of the whole
/// [`StatsMap`]. The file is read whole and rewritten whole; there is no locking.
pub struct BinaryStatsStore {
    path: PathBuf,
}

impl BinaryStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn encode(entries: &StatsMap) -> Result<Vec<u8>> {
    let body = bitcode::serialize(entries)?;
    let mut bytes = Vec::with_capacity(PREAMBLE_LEN + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

enum Decoded {
    Entries(StatsMap),
    Unexpected,
    Corrupt(bitcode::Error),
}

fn decode(bytes: &[u8]) -> Decoded {
    if bytes.len() < PREAMBLE_LEN
        || &bytes[..MAGIC.len()] != MAGIC
        || bytes[MAGIC.len()] != FORMAT_VERSION
    {
        return Decoded::Unexpected;
    }
    match bitcode::deserialize(&bytes[PREAMBLE_LEN..]) {
        Ok(entries) => Decoded::Entries(entries),
        Err(e) => Decoded::Corrupt(e),
    }
}

impl StatsStore for BinaryStatsStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_initialized(&mut self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, encode(&StatsMap::new())?)?;
        tracing::debug!(path = %self.path.display(), "created stats store");
        Ok(true)
    }

    fn load_all(&self) -> Result<Loaded<StatsMap>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CollectionError::StoreNotFound(self.location()))
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read stats store");
                let warning = StoreWarning::UnreadableStats(format!("{}: {}", self.location(), e));
                return Ok(Loaded::clean(StatsMap::new()).with_warning(warning));
            }
        };

        if bytes.is_empty() {
            return Ok(Loaded::clean(StatsMap::new()));
        }

        match decode(&bytes) {
            Decoded::Entries(entries) => Ok(Loaded::clean(entries)),
            Decoded::Unexpected => {
                tracing::warn!(path = %self.path.display(), "unexpected stats data, using empty mapping");
                Ok(Loaded::clean(StatsMap::new())
                    .with_warning(StoreWarning::UnexpectedStatsData(self.location())))
            }
            Decoded::Corrupt(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "stats store does not decode");
                let warning = StoreWarning::UnreadableStats(format!("{}: {}", self.location(), e));
                Ok(Loaded::clean(StatsMap::new()).with_warning(warning))
            }
        }
    }

    fn save_all(&mut self, entries: &StatsMap) -> Result<()> {
        let bytes = encode(entries)?;
        fs::write(&self.path, bytes).inspect_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "cannot write stats store")
        })?;
        tracing::debug!(entries = entries.len(), "saved stats store");
        Ok(())
    }
}
