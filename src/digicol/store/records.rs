use super::{Loaded, RecordStore, StoreWarning};
use crate::error::{id_after, CollectionError, Result};
use crate::model::CollectionRecord;
use csv::StringRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str = "id|nombre|categoria|anio|creador|calificacion";
const DELIMITER: u8 = b'|';
const FIELD_COUNT: usize = 6;
/// Label of the name column; its presence marks the header row.
const NAME_LABEL: &str = "nombre";

/// Record store backed by a pipe-delimited text file.
///
/// The file starts with [`HEADER`] and holds one record per line:
///
/// ```text
/// id|nombre|categoria|anio|creador|calificacion
/// 1|Aoi|Personaje|2020|Autor X|8.5
/// ```
///
/// Fields are written verbatim; a `|` inside a field shifts every field after it.
pub struct TextRecordStore {
    path: PathBuf,
}

impl TextRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn not_found(&self) -> CollectionError {
        CollectionError::StoreNotFound(self.location())
    }

    fn read_text(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(self.not_found()),
            Err(e) => Err(CollectionError::Io(e)),
        }
    }
}

/// Whether a row is the header. Heuristic: the joined fields mention the name label.
///
/// A headerless file whose first row contains "nombre" is misread as having a header.
pub fn is_header_row<'a, I>(fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .collect::<String>()
        .to_lowercase()
        .contains(NAME_LABEL)
}

/// Ratings always carry a decimal part on disk (`9.0`, never `9`).
pub fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract() == 0.0 {
        format!("{:.1}", rating)
    } else {
        rating.to_string()
    }
}

pub fn format_line(record: &CollectionRecord) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        record.id,
        record.name,
        record.category,
        record.year,
        record.creator,
        format_rating(record.rating)
    )
}

fn parse_row(row: &StringRecord) -> std::result::Result<CollectionRecord, String> {
    if row.len() < FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            row.len()
        ));
    }

    let id = row[0]
        .trim()
        .parse()
        .map_err(|_| format!("invalid id '{}'", &row[0]))?;
    let year = row[3]
        .trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", &row[3]))?;
    let rating = row[5]
        .trim()
        .parse()
        .map_err(|_| format!("invalid rating '{}'", &row[5]))?;

    Ok(CollectionRecord {
        id,
        name: row[1].to_string(),
        category: row[2].to_string(),
        year,
        creator: row[4].to_string(),
        rating,
    })
}

fn leading_id(line: &str) -> Option<u64> {
    line.split('|').next()?.trim().parse().ok()
}

impl RecordStore for TextRecordStore {
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
        fs::write(&self.path, format!("{}\n", HEADER))?;
        tracing::debug!(path = %self.path.display(), "created record store");
        Ok(true)
    }

    fn next_id(&self) -> Result<u64> {
        let text = self.read_text()?;
        let mut lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.first().is_some_and(|first| is_header_row(first.split('|'))) {
            lines.remove(0);
        }

        let Some(last) = lines.last() else {
            return Ok(1);
        };

        if let Some(id) = leading_id(last) {
            return id_after(id);
        }

        // Trailing line is damaged: fall back to the highest parsable ID.
        tracing::debug!(line = %last, "last record has no parsable id, scanning all lines");
        lines
            .iter()
            .filter_map(|line| leading_id(line))
            .max()
            .map_or(Ok(1), id_after)
    }

    fn append(&mut self, record: &CollectionRecord) -> Result<()> {
        let line = format!("{}\n", format_line(record));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .inspect_err(|e| {
                tracing::error!(path = %self.path.display(), error = %e, "cannot open record store")
            })?;
        file.write_all(line.as_bytes()).inspect_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "cannot append record")
        })?;
        tracing::debug!(id = record.id, "appended record");
        Ok(())
    }

    fn read_all(&self) -> Result<Loaded<Vec<CollectionRecord>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(self.not_found()),
            Err(e) => return Err(CollectionError::Io(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file);

        let mut loaded = Loaded::clean(Vec::new());

        for (idx, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(CollectionError::Io(e.into())),
                Err(e) => {
                    let line = e.position().map_or(idx as u64 + 1, |p| p.line());
                    tracing::debug!(line, error = %e, "skipping unreadable line");
                    loaded.warnings.push(StoreWarning::MalformedLine {
                        line,
                        content: String::new(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if idx == 0 && is_header_row(row.iter()) {
                continue;
            }

            match parse_row(&row) {
                Ok(record) => loaded.value.push(record),
                Err(reason) => {
                    let line = row.position().map_or(idx as u64 + 1, |p| p.line());
                    let content = row.iter().collect::<Vec<_>>().join("|");
                    tracing::debug!(line, %reason, "skipping malformed line");
                    loaded.warnings.push(StoreWarning::MalformedLine {
                        line,
                        content,
                        reason,
                    });
                }
            }
        }

        Ok(loaded)
    }
}
