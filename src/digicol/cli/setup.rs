use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "digicol", bin_name = "digicol", version)]
#[command(about = "Menu-driven manager for a personal digital collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the collection files (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use the per-user data directory instead of the current directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Add an item and its stats without prompting
    #[command(alias = "a")]
    Add {
        name: String,
        category: String,
        /// Year (e.g. 2021)
        year: String,
        creator: String,
        /// Rating between 0.0 and 10.0
        rating: String,
        /// Power level (integer)
        power: String,
        /// Popularity (0-100)
        popularity: String,
        /// Number of views (integer)
        views: String,
        /// Rarity (1-100)
        rarity: String,
    },

    /// Show the whole collection
    #[command(alias = "ls")]
    List,

    /// Search items by name (case-insensitive)
    Search { term: String },

    /// Show the stats of items, by name or by ID
    Stats {
        /// Record ID
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<String>,

        /// Name or part of a name
        #[arg(long)]
        name: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (records-file, stats-file, seed-examples, seed-threshold)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the store files if they are missing
    Init,
}
