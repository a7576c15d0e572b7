//! Thin binary: all CLI behavior lives in `cli/`, this file only maps the outcome to
//! an exit status.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
