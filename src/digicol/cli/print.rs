use colored::Colorize;
use digicol::api::{CmdMessage, CmdResult, MessageLevel, StatsRow};
use digicol::config::CollectionConfig;
use digicol::model::CollectionRecord;
use digicol::store::records::format_rating;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub(super) fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

pub(super) fn write_records<W: Write>(out: &mut W, records: &[CollectionRecord]) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let name_width = column_width(records.iter().map(|r| r.name.as_str()));
    let category_width = column_width(records.iter().map(|r| r.category.as_str()));
    let creator_width = column_width(records.iter().map(|r| r.creator.as_str()));
    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);

    for record in records {
        writeln!(
            out,
            "{} | {} | {} | {} | {} | {}",
            format!("{:>width$}", record.id, width = id_width).yellow(),
            pad_to_width(&record.name, name_width).bold(),
            pad_to_width(&record.category, category_width),
            record.year,
            pad_to_width(&record.creator, creator_width),
            format_rating(record.rating).cyan()
        )?;
    }
    Ok(())
}

pub(super) fn write_stats_rows<W: Write>(out: &mut W, rows: &[StatsRow]) -> io::Result<()> {
    for row in rows {
        match &row.name {
            Some(name) => writeln!(out, "{} - {}", format!("ID {}", row.id).yellow(), name.bold())?,
            None => writeln!(
                out,
                "{} {}",
                format!("ID {}", row.id).yellow(),
                "(no matching record)".dimmed()
            )?,
        }

        match &row.stats {
            Some(stats) => {
                for (label, value) in stats.fields() {
                    writeln!(out, "  {}: {}", label, value)?;
                }
            }
            None => writeln!(out, "  {}", "No stats for this ID.".dimmed())?,
        }
    }
    Ok(())
}

pub(super) fn write_config<W: Write>(out: &mut W, config: &CollectionConfig) -> io::Result<()> {
    for (key, value) in config.entries() {
        writeln!(out, "{} = {}", key, value)?;
    }
    Ok(())
}

/// Everything a command produced: data first, then messages.
pub(super) fn write_result<W: Write>(out: &mut W, result: &CmdResult) -> io::Result<()> {
    write_records(out, &result.listed_records)?;
    write_stats_rows(out, &result.stats_rows)?;
    if let Some(config) = &result.config {
        write_config(out, config)?;
    }
    write_messages(out, &result.messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicol::model::StatsEntry;

    fn render(result: &CmdResult) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_result(&mut out, result).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn record(id: u64, name: &str, rating: f64) -> CollectionRecord {
        CollectionRecord {
            id,
            name: name.into(),
            category: "Canción".into(),
            year: 2021,
            creator: "Banda Z".into(),
            rating,
        }
    }

    #[test]
    fn records_are_aligned_by_display_width() {
        let result = CmdResult::default()
            .with_listed_records(vec![record(1, "Aoi", 9.0), record(10, "Crescent Song", 7.5)]);

        let text = render(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " 1 | Aoi           | Canción | 2021 | Banda Z | 9.0");
        assert_eq!(lines[1], "10 | Crescent Song | Canción | 2021 | Banda Z | 7.5");
    }

    #[test]
    fn stats_rows_show_missing_pieces() {
        let result = CmdResult::default().with_stats_rows(vec![
            StatsRow {
                id: 1,
                name: Some("Aoi".into()),
                stats: None,
            },
            StatsRow {
                id: 9,
                name: None,
                stats: Some(StatsEntry::new(1, 2, 3, 4)),
            },
        ]);

        let text = render(&result);
        assert!(text.contains("ID 1 - Aoi\n  No stats for this ID."));
        assert!(text.contains("ID 9 (no matching record)\n  power: 1\n"));
        assert!(text.contains("  rarity: 4"));
    }
}
