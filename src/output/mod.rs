//! Output formatting for clipstore.
//!
//! This module provides formatters for displaying entries and schema
//! information in various formats. Stored keys are never rendered, and the
//! content of encrypted entries is withheld everywhere except `reveal`.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::Entry;
use crate::error::ClipstoreError;
use crate::storage::{ColumnInfo, InitOutcome};

pub use json::*;
pub use pretty::*;

/// Format a list of entries based on output format
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_entries(
    entries: &[Entry],
    total: usize,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_entries_pretty(entries, total)),
        OutputFormat::Json => format_entries_json(entries, total),
    }
}

/// Format a single entry based on output format
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_entry(entry: &Entry, format: OutputFormat) -> Result<String, ClipstoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_entry_pretty(entry)),
        OutputFormat::Json => format_entry_json(entry),
    }
}

/// Format the columns of the entries table based on output format
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_columns(columns: &[ColumnInfo], format: OutputFormat) -> Result<String, ClipstoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_columns_pretty(columns)),
        OutputFormat::Json => format_columns_json(columns),
    }
}

/// Format the result of `init`. Pretty output is empty on success.
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_init(outcome: InitOutcome, format: OutputFormat) -> Result<String, ClipstoreError> {
    match format {
        OutputFormat::Pretty => Ok(String::new()),
        OutputFormat::Json => format_init_json(outcome),
    }
}
