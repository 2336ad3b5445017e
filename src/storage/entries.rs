//! Entry storage.
//!
//! Row-level operations on the `entries` table. Writes take a [`Payload`]
//! so the `encrypted` flag and the key column always agree.

use std::path::Path;

use rusqlite::{ffi, params, ErrorCode, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::schema::{self, InitMode};
use super::Database;
use crate::config::StorageConfig;
use crate::core::{keys_match, Entry, Payload};
use crate::error::ClipstoreError;

/// Storage for clipboard entries.
pub struct EntryStore {
    db: Database,
}

impl EntryStore {
    /// Open the store at `path`.
    ///
    /// With `storage.auto_init` set the `entries` table is created when
    /// missing; otherwise a missing table is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema is
    /// missing or incompatible.
    pub fn open(path: &Path, storage: &StorageConfig) -> Result<Self, ClipstoreError> {
        let db = Database::open_at(path, storage)?;
        let conn = db.connection();

        if storage.auto_init {
            schema::initialize(conn, InitMode::IfNotExists)?;
        } else if schema::table_exists(conn)? {
            schema::verify(conn)?;
        } else {
            return Err(ClipstoreError::SchemaMissing(format!(
                "table {} does not exist in {}; run `clipstore init` first",
                schema::TABLE,
                path.display()
            )));
        }

        Ok(Self { db })
    }

    /// Create a store over an in-memory database with the schema applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, ClipstoreError> {
        let db = Database::open_in_memory()?;
        schema::initialize(db.connection(), InitMode::Strict)?;
        Ok(Self { db })
    }

    #[cfg(test)]
    pub(crate) const fn database(&self) -> &Database {
        &self.db
    }

    /// Store a new entry.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::DuplicateId` if the id is taken and
    /// `ClipstoreError::InvalidInput` for an empty id or key.
    pub fn insert(&self, id: &str, payload: Payload) -> Result<Entry, ClipstoreError> {
        validate(id, &payload)?;
        let entry = Entry::new(id, payload);

        self.db
            .connection()
            .execute(
                "INSERT INTO entries (id, content, encrypted, key) VALUES (?1, ?2, ?3, ?4)",
                params![entry.id, entry.content, entry.encrypted, entry.key],
            )
            .map_err(|e| classify_write_error(e, id))?;

        info!(id, encrypted = entry.encrypted, "stored entry");
        Ok(entry)
    }

    /// Get an entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: &str) -> Result<Option<Entry>, ClipstoreError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, content, encrypted, key FROM entries WHERE id = ?1")
            .map_err(|e| ClipstoreError::Database(format!("Failed to prepare query: {e}")))?;

        let entry = stmt
            .query_row([id], row_to_entry)
            .optional()
            .map_err(|e| ClipstoreError::Database(format!("Failed to query entry: {e}")))?;

        Ok(entry)
    }

    /// List entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, limit: Option<usize>, offset: usize) -> Result<Vec<Entry>, ClipstoreError> {
        let conn = self.db.connection();

        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit
            .and_then(|l| i64::try_from(l).ok())
            .unwrap_or(-1);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut stmt = conn
            .prepare(
                r"SELECT id, content, encrypted, key
                  FROM entries
                  ORDER BY rowid ASC
                  LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| ClipstoreError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params![limit, offset], row_to_entry)
            .map_err(|e| ClipstoreError::Database(format!("Failed to query entries: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| ClipstoreError::Database(e.to_string()))?);
        }

        Ok(entries)
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<usize, ClipstoreError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .map_err(|e| ClipstoreError::Database(format!("Failed to count entries: {e}")))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Replace the payload of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::NotFound` if no entry has this id.
    pub fn update(&self, id: &str, payload: Payload) -> Result<Entry, ClipstoreError> {
        validate(id, &payload)?;
        let entry = Entry::new(id, payload);

        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE entries SET content = ?1, encrypted = ?2, key = ?3 WHERE id = ?4",
                params![entry.content, entry.encrypted, entry.key, entry.id],
            )
            .map_err(|e| classify_write_error(e, id))?;

        if changed == 0 {
            return Err(ClipstoreError::NotFound(format!("Entry with ID: {id}")));
        }

        info!(id, encrypted = entry.encrypted, "updated entry");
        Ok(entry)
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::NotFound` if no entry has this id.
    pub fn delete(&self, id: &str) -> Result<(), ClipstoreError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM entries WHERE id = ?1", [id])
            .map_err(|e| ClipstoreError::Database(format!("Failed to delete entry: {e}")))?;

        if changed == 0 {
            return Err(ClipstoreError::NotFound(format!("Entry with ID: {id}")));
        }

        info!(id, "deleted entry");
        Ok(())
    }

    /// Return the content of an encrypted entry if `key` matches.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::NotFound`, `ClipstoreError::NotEncrypted`,
    /// `ClipstoreError::KeyMismatch`, or `ClipstoreError::InconsistentEntry`
    /// for a row whose flag and key disagree.
    pub fn reveal(&self, id: &str, key: &str) -> Result<String, ClipstoreError> {
        let entry = self
            .get(id)?
            .ok_or_else(|| ClipstoreError::NotFound(format!("Entry with ID: {id}")))?;

        match entry.payload()? {
            Payload::Plain { .. } => Err(ClipstoreError::NotEncrypted(id.to_string())),
            Payload::Encrypted { content, key: stored } => {
                if keys_match(key, &stored) {
                    debug!(id, "key accepted");
                    Ok(content)
                } else {
                    warn!(id, "key rejected");
                    Err(ClipstoreError::KeyMismatch(id.to_string()))
                }
            }
        }
    }
}

/// Reject ids and keys the schema would accept but the store does not.
fn validate(id: &str, payload: &Payload) -> Result<(), ClipstoreError> {
    if id.trim().is_empty() {
        return Err(ClipstoreError::InvalidInput("entry id must not be empty".to_string()));
    }
    if payload.key().is_some_and(str::is_empty) {
        return Err(ClipstoreError::InvalidInput(
            "key of an encrypted entry must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Map constraint failures on `entries` to typed errors.
fn classify_write_error(err: rusqlite::Error, id: &str) -> ClipstoreError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        if failure.code == ErrorCode::ConstraintViolation {
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY {
                return ClipstoreError::DuplicateId(id.to_string());
            }
            let detail = message.clone().unwrap_or_else(|| failure.to_string());
            return ClipstoreError::Constraint(format!("entry {id}: {detail}"));
        }
    }
    ClipstoreError::Database(format!("Failed to write entry {id}: {err}"))
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        content: row.get(1)?,
        encrypted: row.get(2)?,
        key: row.get(3)?,
    })
}
