//! The interactive menu.
//!
//! Every action catches its own failures: validation errors print "Invalid input",
//! anything else prints "Unexpected error", and the loop goes on. Only option 5, end of
//! input, Ctrl-C, or a broken terminal ends the loop.

use super::print::{write_messages, write_result};
use colored::Colorize;
use digicol::api::{CmdMessage, CollectionApi};
use digicol::error::{CollectionError, Field, Result};
use digicol::model::{RecordDraft, StatsEntry};
use digicol::store::{RecordStore, StatsStore};
use digicol::validate;
use std::io::{self, BufRead, Write};

/// Why an action stopped early.
enum Interrupt {
    /// Input closed; leave the menu.
    Eof,
    Io(io::Error),
    Collection(CollectionError),
}

impl From<io::Error> for Interrupt {
    fn from(e: io::Error) -> Self {
        Interrupt::Io(e)
    }
}

impl From<CollectionError> for Interrupt {
    fn from(e: CollectionError) -> Self {
        Interrupt::Collection(e)
    }
}

type Step<T> = std::result::Result<T, Interrupt>;

const INPUT_CLOSED: &str = "\nInput closed. Exiting...";
const INTERRUPTED: &str = "\nInterrupted. Exiting...";

/// Make Ctrl-C leave the menu with a message and a zero exit status.
pub fn exit_on_interrupt() {
    let installed = ctrlc::set_handler(|| {
        let mut out = io::stdout();
        let _ = write_messages(&mut out, &[CmdMessage::info(INTERRUPTED)]);
        let _ = out.flush();
        std::process::exit(0);
    });
    if let Err(e) = installed {
        tracing::warn!(error = %e, "cannot install interrupt handler");
    }
}

struct Shell<'a, R: RecordStore, S: StatsStore, I, O> {
    api: &'a mut CollectionApi<R, S>,
    input: I,
    out: O,
}

pub fn run<R, S, I, O>(api: &mut CollectionApi<R, S>, input: I, out: O) -> io::Result<()>
where
    R: RecordStore,
    S: StatsStore,
    I: BufRead,
    O: Write,
{
    Shell { api, input, out }.run()
}

impl<R, S, I, O> Shell<'_, R, S, I, O>
where
    R: RecordStore,
    S: StatsStore,
    I: BufRead,
    O: Write,
{
    fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.read_line("Select an option [1-5]: ") {
                Ok(choice) => choice,
                Err(Interrupt::Io(e)) => return Err(e),
                Err(_) => return self.say(CmdMessage::info(INPUT_CLOSED)),
            };

            let step = match choice.trim() {
                "1" => self.add_item(),
                "2" => self.show_collection(),
                "3" => self.search(),
                "4" => self.show_stats(),
                "5" => return self.say(CmdMessage::info("Exiting. Goodbye!")),
                _ => self
                    .say(CmdMessage::warning("Invalid option. Try again."))
                    .map_err(Interrupt::Io),
            };

            match step {
                Ok(()) => {}
                Err(Interrupt::Eof) => {
                    return self.say(CmdMessage::info(INPUT_CLOSED))
                }
                Err(Interrupt::Io(e)) => return Err(e),
                Err(Interrupt::Collection(e)) if e.is_validation() => {
                    self.say(CmdMessage::error(format!("Invalid input: {}", e)))?
                }
                Err(Interrupt::Collection(e)) => {
                    tracing::error!(error = %e, "menu action failed");
                    self.say(CmdMessage::error(format!("Unexpected error: {}", e)))?
                }
            }
            writeln!(self.out)?;
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "===== MY DIGITAL COLLECTION =====".bold())?;
        writeln!(self.out, "1. Add item")?;
        writeln!(self.out, "2. Show full collection")?;
        writeln!(self.out, "3. Search item by name")?;
        writeln!(self.out, "4. Show item stats")?;
        writeln!(self.out, "5. Exit")
    }

    fn say(&mut self, message: CmdMessage) -> io::Result<()> {
        write_messages(&mut self.out, &[message])
    }

    /// Prompt and read one line without its line ending.
    fn read_line(&mut self, prompt: &str) -> Step<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::Eof);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn ask<T>(&mut self, prompt: &str, parse: impl FnOnce(&str) -> Result<T>) -> Step<T> {
        let line = self.read_line(prompt)?;
        Ok(parse(&line)?)
    }

    fn add_item(&mut self) -> Step<()> {
        let name = self.ask("Name: ", |s| validate::non_empty(Field::Name, s))?;
        let category = self.ask("Category: ", |s| validate::non_empty(Field::Category, s))?;
        let year = self.ask("Year (e.g. 2021): ", validate::year)?;
        let creator = self.ask("Creator: ", |s| validate::non_empty(Field::Creator, s))?;
        let rating = self.ask("Rating (0.0 - 10.0): ", validate::rating)?;

        let draft = RecordDraft::new(name.clone(), category, year, creator, rating);
        let added = self.api.add_record(draft)?;
        write_result(&mut self.out, &added)?;
        let Some(id) = added.added_id() else {
            return Ok(());
        };

        writeln!(self.out, "\nNow add the numeric stats (stored in the binary file):")?;
        let entry = match self.ask_stats() {
            Ok(entry) => entry,
            Err(Interrupt::Collection(e)) if e.is_validation() => {
                self.say(CmdMessage::error(format!("Invalid input: {}", e)))?;
                self.say(CmdMessage::warning(format!(
                    "'{}' was saved with ID {} but has no stats.",
                    name, id
                )))?;
                return Ok(());
            }
            Err(other) => return Err(other),
        };

        let saved = self.api.add_stats(id, entry)?;
        write_result(&mut self.out, &saved)?;
        if !saved.has_errors() {
            self.say(CmdMessage::success(format!(
                "Item '{}' added with ID {}.",
                name, id
            )))?;
        }
        Ok(())
    }

    fn ask_stats(&mut self) -> Step<StatsEntry> {
        let power = self.ask("Power level (integer): ", |s| validate::integer(Field::Power, s))?;
        let popularity = self.ask("Popularity (0-100): ", |s| {
            validate::integer(Field::Popularity, s)
        })?;
        let views = self.ask("Number of views (integer): ", |s| {
            validate::integer(Field::Views, s)
        })?;
        let rarity = self.ask("Rarity (1-100): ", validate::rarity)?;
        Ok(StatsEntry::new(power, popularity, views, rarity))
    }

    fn show_collection(&mut self) -> Step<()> {
        let result = self.api.list_records()?;
        if !result.listed_records.is_empty() {
            writeln!(self.out, "\n{}", "===== FULL COLLECTION =====".bold())?;
        }
        write_result(&mut self.out, &result)?;
        Ok(())
    }

    fn search(&mut self) -> Step<()> {
        let query = self.ask("Search by name: ", |s| validate::non_empty(Field::Query, s))?;
        let result = self.api.search_records(&query)?;
        write_result(&mut self.out, &result)?;
        Ok(())
    }

    fn show_stats(&mut self) -> Step<()> {
        let choice = self.read_line("Search by (1) name or (2) ID? [1/2]: ")?;
        let result = match choice.trim() {
            "1" => {
                let query = self.ask("Name: ", |s| validate::non_empty(Field::Query, s))?;
                self.api.stats_by_name(&query)?
            }
            "2" => {
                let raw_id = self.read_line("ID: ")?;
                self.api.stats_by_id(&raw_id)?
            }
            _ => {
                self.say(CmdMessage::warning("Invalid option."))?;
                return Ok(());
            }
        };
        write_result(&mut self.out, &result)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicol::api::CollectionPaths;
    use digicol::store::memory::{InMemoryRecordStore, InMemoryStatsStore};
    use std::path::PathBuf;

    type MemoryApi = CollectionApi<InMemoryRecordStore, InMemoryStatsStore>;

    fn api() -> MemoryApi {
        let paths = CollectionPaths {
            data_dir: PathBuf::from("/unused"),
        };
        let mut api = CollectionApi::new(InMemoryRecordStore::new(), InMemoryStatsStore::new(), paths);
        api.init().unwrap();
        api
    }

    fn session(api: &mut MemoryApi, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run(api, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_then_show_stats_by_id() {
        let mut api = api();
        let script = "1\nEureka\nLibro\n2019\nEscritor Q\n9.2\n50\n90\n7600\n30\n4\n2\n1\n5\n";
        let output = session(&mut api, script);

        assert!(output.contains("Item 'Eureka' added with ID 1."));
        assert!(output.contains("ID 1 - Eureka"));
        assert!(output.contains("views: 7600"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn bad_rating_aborts_before_writing() {
        let mut api = api();
        let output = session(&mut api, "1\nEureka\nLibro\n2019\nEscritor Q\n10.5\n2\n5\n");

        assert!(output.contains("Invalid input: Invalid rating"));
        assert!(output.contains("The collection is empty."));
        assert!(api.records().read_all().unwrap().value.is_empty());
    }

    #[test]
    fn bad_rarity_keeps_record_without_stats() {
        let mut api = api();
        let output = session(&mut api, "1\nAoi\nPersonaje\n2020\nAutor X\n8.5\n85\n70\n1200\n101\n5\n");

        assert!(output.contains("'Aoi' was saved with ID 1 but has no stats."));
        assert_eq!(api.records().read_all().unwrap().value.len(), 1);
        assert!(api.stats().load_all().unwrap().value.is_empty());
    }

    #[test]
    fn blank_search_is_reported_and_loop_continues() {
        let mut api = api();
        api.seed(5).unwrap();
        let output = session(&mut api, "3\n   \n3\nDRAKO\n5\n");

        assert!(output.contains("Invalid input: Empty input is not allowed"));
        assert!(output.contains("Drako Lance"));
    }

    #[test]
    fn invalid_options_do_not_stop_the_menu() {
        let mut api = api();
        let output = session(&mut api, "9\n4\n3\n5\n");

        assert!(output.contains("Invalid option. Try again."));
        assert!(output.contains("Invalid option.\n"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let mut api = api();
        let output = session(&mut api, "1\nHalf");
        assert!(output.contains("Input closed. Exiting..."));
        assert!(api.records().read_all().unwrap().value.is_empty());
    }
}
