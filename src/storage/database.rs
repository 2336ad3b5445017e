//! `SQLite` database connection.
//!
//! The database lives at `db/clipboard.db` by default and holds the single
//! `entries` table. Opening a [`Database`] never touches the schema; see
//! [`super::schema`] for that.

use std::path::Path;
use std::time::Duration;

use rusqlite::{ffi, Connection, DatabaseName, ErrorCode, OpenFlags};
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::ClipstoreError;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file if necessary. The parent directory is only
    /// created when `storage.create_parent_dirs` is set.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::Open` if the file cannot be created, is not
    /// a database, or is not writable, and `ClipstoreError::Io` if the
    /// parent directory cannot be created.
    pub fn open_at(path: &Path, storage: &StorageConfig) -> Result<Self, ClipstoreError> {
        if storage.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let db = Self::open_with(path, flags, storage)?;

        // SQLite falls back to read-only when the file is not writable.
        let read_only = db
            .conn
            .is_readonly(DatabaseName::Main)
            .map_err(|e| ClipstoreError::Database(format!("Failed to query open mode: {e}")))?;
        if read_only {
            return Err(ClipstoreError::Open {
                path: path.to_path_buf(),
                source: rusqlite::Error::SqliteFailure(
                    ffi::Error::new(ffi::SQLITE_READONLY),
                    Some("database file is not writable".to_string()),
                ),
            });
        }

        debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Open an existing database without creating or writing anything.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::Open` if the file does not exist or is not
    /// a database.
    pub fn open_read_only(path: &Path, storage: &StorageConfig) -> Result<Self, ClipstoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let db = Self::open_with(path, flags, storage)?;
        debug!(path = %path.display(), "opened database read-only");
        Ok(db)
    }

    fn open_with(
        path: &Path,
        flags: OpenFlags,
        storage: &StorageConfig,
    ) -> Result<Self, ClipstoreError> {
        let open_error = |source| ClipstoreError::Open {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(open_error)?;

        conn.busy_timeout(Duration::from_millis(storage.busy_timeout_ms))
            .map_err(|e| ClipstoreError::Database(format!("Failed to set busy timeout: {e}")))?;

        // Opening is lazy; reading the header surfaces junk or unreadable files.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| {
                if is_open_failure(&e) {
                    open_error(e)
                } else {
                    ClipstoreError::Database(format!("Failed to read database header: {e}"))
                }
            })?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, ClipstoreError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            ClipstoreError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn is_open_failure(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::NotADatabase | ErrorCode::CannotOpen | ErrorCode::PermissionDenied)
    )
}
