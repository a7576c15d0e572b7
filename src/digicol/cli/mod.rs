//! # CLI Layer
//!
//! One UI client for the collection: the only place that knows about stdin, stdout,
//! stderr, and exit codes.
//!
//! ## Startup
//!
//! Every invocation goes through the same sequence before dispatching:
//!
//! 1. Parse arguments ([`setup`]) and install the stderr log subscriber.
//! 2. Resolve the data directory and build the API ([`digicol::init`]).
//! 3. Create missing store files. Failure here is fatal: the process exits with 1.
//! 4. Seed the example items when enabled and the collection is small. Failure here is
//!    logged and ignored.
//!
//! ## Modes
//!
//! With no subcommand (or `menu`) the interactive menu runs ([`shell`]). The other
//! subcommands perform one operation and render its [`digicol::api::CmdResult`]
//! ([`print`]).

mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
