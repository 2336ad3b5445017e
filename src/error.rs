//! Error types for clipstore.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the schema initializer, the entry store and the CLI.
#[derive(Debug, Error)]
pub enum ClipstoreError {
    /// The database file could not be created or opened.
    #[error("Failed to open database {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The `entries` table already exists, or exists with another shape.
    #[error("Schema conflict: {0}")]
    SchemaConflict(String),

    /// The `entries` table does not exist and auto-init is disabled.
    #[error("Schema missing: {0}")]
    SchemaMissing(String),

    /// Any other database engine failure.
    #[error("Database error: {0}")]
    Database(String),

    /// An entry with this id is already stored.
    #[error("Entry already exists: {0}")]
    DuplicateId(String),

    /// A non-primary-key constraint was violated.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// No entry with this id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entry is stored in plain form and has no key.
    #[error("Entry {0} is not encrypted")]
    NotEncrypted(String),

    /// The supplied key does not match the stored key.
    #[error("Key does not match entry {0}")]
    KeyMismatch(String),

    /// The row's `encrypted` flag and `key` column disagree.
    #[error("Inconsistent entry {id}: {reason}")]
    InconsistentEntry { id: String, reason: String },

    /// Rejected input (empty id, empty key, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
