//! clipstore - clipboard entries in `SQLite`
//!
//! This crate creates the `entries` table (id, content, encrypted flag,
//! optional key) and provides a small store and command-line interface on
//! top of it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use self::core::{Entry, Payload};
pub use error::ClipstoreError;
pub use storage::{EntryStore, InitMode, InitOutcome};
