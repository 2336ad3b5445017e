//! Storage layer for clipstore.
//!
//! This module provides SQLite-based persistence for:
//! - The `entries` schema (initializer and column checks)
//! - Clipboard entries (insert, fetch, list, update, delete, reveal)

mod database;
mod entries;
pub mod schema;

pub use database::Database;
pub use entries::EntryStore;
pub use schema::{ColumnInfo, InitMode, InitOutcome};
