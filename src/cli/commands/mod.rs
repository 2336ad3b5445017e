//! Command implementations for clipstore.
//!
//! Each command returns the text to print on stdout; an empty string
//! prints nothing.

mod completions;

use std::io::Read;
use std::path::Path;

use serde_json::json;
use uuid::Uuid;

pub use completions::completions;

use crate::cli::args::{AddArgs, InitArgs, ListArgs, OutputFormat, UpdateArgs};
use crate::config::StorageConfig;
use crate::core::Payload;
use crate::error::ClipstoreError;
use crate::output::{format_columns, format_entries, format_entry, format_init, to_json};
use crate::storage::schema::{describe, initialize};
use crate::storage::{Database, EntryStore, InitMode};

/// Execute init command
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the table already
/// exists (without `--if-not-exists`) or is incompatible.
pub fn init(
    path: &Path,
    storage: &StorageConfig,
    args: &InitArgs,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let mode = if args.if_not_exists {
        InitMode::IfNotExists
    } else {
        InitMode::Strict
    };

    let db = Database::open_at(path, storage)?;
    let outcome = initialize(db.connection(), mode)?;
    format_init(outcome, format)
}

/// Execute schema command
///
/// Reads the table definition through a read-only connection, so neither
/// the database file nor the table is created.
///
/// # Errors
///
/// Returns an error if the database does not exist, cannot be opened, or
/// cannot be queried.
pub fn schema(
    path: &Path,
    storage: &StorageConfig,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let db = Database::open_read_only(path, storage)?;
    let columns = describe(db.connection())?;
    format_columns(&columns, format)
}

/// Execute add command
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the entry cannot be stored.
pub fn add(
    store: &EntryStore,
    args: AddArgs,
    stdin: impl Read,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let content = read_content(args.content, stdin)?;
    let id = args.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let entry = store.insert(&id, Payload::new(content, args.key))?;

    match format {
        OutputFormat::Json => format_entry(&entry, format),
        OutputFormat::Pretty => Ok(format!("Stored entry: {}", entry.id)),
    }
}

/// Execute get command
///
/// # Errors
///
/// Returns `ClipstoreError::NotFound` if no entry has this id.
pub fn get(store: &EntryStore, id: &str, format: OutputFormat) -> Result<String, ClipstoreError> {
    let entry = store
        .get(id)?
        .ok_or_else(|| ClipstoreError::NotFound(format!("Entry with ID: {id}")))?;
    format_entry(&entry, format)
}

/// Execute reveal command
///
/// Pretty output is the raw content, so it can be piped back to a clipboard.
///
/// # Errors
///
/// Returns an error if the entry is missing, not encrypted, or the key
/// does not match.
pub fn reveal(
    store: &EntryStore,
    id: &str,
    key: &str,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let content = store.reveal(id, key)?;
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "content": content })),
        OutputFormat::Pretty => Ok(content),
    }
}

/// Execute list command
///
/// # Errors
///
/// Returns an error if the entries cannot be read.
pub fn list(
    store: &EntryStore,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let entries = store.list(args.limit, args.offset)?;
    let total = store.count()?;
    format_entries(&entries, total, format)
}

/// Execute update command
///
/// # Errors
///
/// Returns `ClipstoreError::NotFound` if no entry has this id.
pub fn update(
    store: &EntryStore,
    args: UpdateArgs,
    stdin: impl Read,
    format: OutputFormat,
) -> Result<String, ClipstoreError> {
    let content = read_content(args.content, stdin)?;
    let entry = store.update(&args.id, Payload::new(content, args.key))?;

    match format {
        OutputFormat::Json => format_entry(&entry, format),
        OutputFormat::Pretty => Ok(format!("Updated entry: {}", entry.id)),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns `ClipstoreError::NotFound` if no entry has this id.
pub fn delete(store: &EntryStore, id: &str, format: OutputFormat) -> Result<String, ClipstoreError> {
    store.delete(id)?;
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "deleted": true })),
        OutputFormat::Pretty => Ok(format!("Deleted entry: {id}")),
    }
}

/// Content from the argument, or all of `stdin` when it is missing or `-`.
///
/// Stdin is stored verbatim, trailing newline included.
fn read_content(arg: Option<String>, mut stdin: impl Read) -> Result<String, ClipstoreError> {
    match arg {
        Some(content) if content != "-" => Ok(content),
        _ => {
            let mut content = String::new();
            stdin.read_to_string(&mut content)?;
            Ok(content)
        }
    }
}
