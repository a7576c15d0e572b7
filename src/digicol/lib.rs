//! # Digicol Architecture
//!
//! Digicol keeps a personal "digital collection" (characters, songs, items, books) in two
//! flat files that are joined by an integer record ID:
//!
//! - a **record store**: an append-only, pipe-delimited text log with one row per item
//! - a **stats store**: a binary side file holding a mapping from ID to numeric stats
//!
//! The two files are independent resources. Nothing makes a write to both of them atomic;
//! a record may exist without stats, and stats may outlive (or predate) their record.
//! Every read path tolerates both situations.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Argument parsing, interactive menu, colored output       │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Sequences the two stores                                 │
//! │  - Turns non-fatal store failures into messages             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore / StatsStore traits                          │
//! │  - Text + binary files (production), in-memory (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw user input goes through [`validate`] before it reaches any command.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage traits and implementations
//! - [`model`]: Core data types (`CollectionRecord`, `StatsEntry`)
//! - [`validate`]: Field parsers for interactive input
//! - [`config`]: Per-data-directory configuration
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod validate;
