//! Schema initializer for the `entries` table.
//!
//! The table is created by a single DDL statement. [`InitMode::Strict`]
//! runs it as-is, so a second run fails because the table already exists.
//! [`InitMode::IfNotExists`] adds the existence guard and then checks that
//! the table it found has the expected columns.

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ClipstoreError;

/// Name of the single table.
pub const TABLE: &str = "entries";

const CREATE_ENTRIES: &str = "
    CREATE TABLE entries(
        id TEXT PRIMARY KEY NOT NULL,
        content TEXT NOT NULL,
        encrypted INTEGER NOT NULL,
        key TEXT
    )
";

const CREATE_ENTRIES_IF_NOT_EXISTS: &str = "
    CREATE TABLE IF NOT EXISTS entries(
        id TEXT PRIMARY KEY NOT NULL,
        content TEXT NOT NULL,
        encrypted INTEGER NOT NULL,
        key TEXT
    )
";

/// How to treat an `entries` table that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMode {
    /// Run the DDL without a guard; an existing table is a conflict.
    #[default]
    Strict,
    /// Leave a compatible existing table alone.
    IfNotExists,
}

/// What the initializer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitOutcome {
    Created,
    AlreadyPresent,
}

/// One column of the `entries` table, as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnInfo {
    fn new(name: &str, decl_type: &str, not_null: bool, primary_key: bool) -> Self {
        Self {
            name: name.to_string(),
            decl_type: decl_type.to_string(),
            not_null,
            primary_key,
        }
    }
}

/// The columns `entries` must have, in order.
#[must_use]
pub fn expected_columns() -> Vec<ColumnInfo> {
    vec![
        ColumnInfo::new("id", "TEXT", true, true),
        ColumnInfo::new("content", "TEXT", true, false),
        ColumnInfo::new("encrypted", "INTEGER", true, false),
        ColumnInfo::new("key", "TEXT", false, false),
    ]
}

/// Ensure the `entries` table exists.
///
/// # Errors
///
/// Returns `ClipstoreError::SchemaConflict` if the table already exists in
/// strict mode, or exists with a different definition in guarded mode.
/// Other engine failures are returned as `ClipstoreError::Database`.
pub fn initialize(conn: &Connection, mode: InitMode) -> Result<InitOutcome, ClipstoreError> {
    match mode {
        InitMode::Strict => {
            if let Err(e) = conn.execute_batch(CREATE_ENTRIES) {
                // A failed lookup must not hide the DDL error.
                if table_exists(conn).unwrap_or(false) {
                    warn!(table = TABLE, "table already exists");
                    return Err(ClipstoreError::SchemaConflict(format!(
                        "table {TABLE} already exists"
                    )));
                }
                return Err(ClipstoreError::Database(format!(
                    "Failed to create table {TABLE}: {e}"
                )));
            }
            info!(table = TABLE, "created table");
            Ok(InitOutcome::Created)
        }
        InitMode::IfNotExists => {
            let existed = table_exists(conn)?;
            conn.execute_batch(CREATE_ENTRIES_IF_NOT_EXISTS)
                .map_err(|e| {
                    ClipstoreError::Database(format!("Failed to create table {TABLE}: {e}"))
                })?;
            if existed {
                verify(conn)?;
                debug!(table = TABLE, "table already present");
                Ok(InitOutcome::AlreadyPresent)
            } else {
                info!(table = TABLE, "created table");
                Ok(InitOutcome::Created)
            }
        }
    }
}

/// Whether the `entries` table exists.
///
/// # Errors
///
/// Returns an error if `sqlite_master` cannot be queried.
pub fn table_exists(conn: &Connection) -> Result<bool, ClipstoreError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![TABLE],
            |row| row.get(0),
        )
        .map_err(|e| ClipstoreError::Database(format!("Failed to look up table {TABLE}: {e}")))?;
    Ok(count > 0)
}

/// List the columns of the `entries` table in declaration order.
///
/// Returns an empty list when the table does not exist.
///
/// # Errors
///
/// Returns an error if the pragma fails.
pub fn describe(conn: &Connection) -> Result<Vec<ColumnInfo>, ClipstoreError> {
    let mut stmt = conn
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(|e| ClipstoreError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map(params![TABLE], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                decl_type: row.get::<_, String>(1)?.to_uppercase(),
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? > 0,
            })
        })
        .map_err(|e| ClipstoreError::Database(format!("Failed to describe {TABLE}: {e}")))?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row.map_err(|e| ClipstoreError::Database(e.to_string()))?);
    }
    Ok(columns)
}

/// Check that the existing table matches [`expected_columns`].
///
/// # Errors
///
/// Returns `ClipstoreError::SchemaConflict` naming the first difference.
pub fn verify(conn: &Connection) -> Result<(), ClipstoreError> {
    let actual = describe(conn)?;
    let expected = expected_columns();

    if actual.len() != expected.len() {
        return Err(ClipstoreError::SchemaConflict(format!(
            "table {TABLE} has {} columns, expected {}",
            actual.len(),
            expected.len()
        )));
    }

    for (position, (have, want)) in actual.iter().zip(&expected).enumerate() {
        if have != want {
            return Err(ClipstoreError::SchemaConflict(format!(
                "table {TABLE} column {} is {} {}{}, expected {} {}{}",
                position + 1,
                have.name,
                have.decl_type,
                if have.not_null { " NOT NULL" } else { "" },
                want.name,
                want.decl_type,
                if want.not_null { " NOT NULL" } else { "" },
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();

        let outcome = initialize(&conn, InitMode::Strict).unwrap();

        assert_eq!(outcome, InitOutcome::Created);
        assert_eq!(table_names(&conn), vec!["entries".to_string()]);
        assert_eq!(describe(&conn).unwrap(), expected_columns());
    }

    #[test]
    fn test_column_shape() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, InitMode::Strict).unwrap();

        let columns = describe(&conn).unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["id", "content", "encrypted", "key"]);
        assert!(columns[0].primary_key && columns[0].not_null);
        assert!(columns[1].not_null);
        assert_eq!(columns[2].decl_type, "INTEGER");
        assert!(!columns[3].not_null);
    }

    #[test]
    fn test_strict_rerun_conflicts() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, InitMode::Strict).unwrap();

        let result = initialize(&conn, InitMode::Strict);

        assert!(matches!(result, Err(ClipstoreError::SchemaConflict(_))));
    }

    #[test]
    fn test_strict_reports_ddl_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("clipboard.db");
        std::fs::write(&db_path, b"").unwrap();
        let conn = Connection::open_with_flags(&db_path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)
            .unwrap();

        let err = initialize(&conn, InitMode::Strict).unwrap_err();

        assert!(matches!(err, ClipstoreError::Database(_)));
        assert!(err.to_string().contains("Failed to create table entries"));
        assert!(err.to_string().contains("readonly"));
    }

    #[test]
    fn test_guarded_rerun_is_noop() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, InitMode::Strict).unwrap();
        conn.execute(
            "INSERT INTO entries (id, content, encrypted, key) VALUES ('a1', 'hello', 0, NULL)",
            [],
        )
        .unwrap();

        let outcome = initialize(&conn, InitMode::IfNotExists).unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyPresent);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(describe(&conn).unwrap(), expected_columns());
    }

    #[test]
    fn test_guarded_on_fresh_database_creates() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(
            initialize(&conn, InitMode::IfNotExists).unwrap(),
            InitOutcome::Created
        );
        assert!(table_exists(&conn).unwrap());
    }

    #[test]
    fn test_guarded_rejects_incompatible_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE entries (id TEXT PRIMARY KEY, content TEXT, password TEXT)",
        )
        .unwrap();

        let result = initialize(&conn, InitMode::IfNotExists);

        assert!(matches!(result, Err(ClipstoreError::SchemaConflict(_))));
    }

    #[test]
    fn test_verify_reports_nullability_difference() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE entries (id TEXT PRIMARY KEY NOT NULL, content TEXT,
                                   encrypted INTEGER NOT NULL, key TEXT)",
        )
        .unwrap();

        let err = verify(&conn).unwrap_err();

        assert!(err.to_string().contains("column 2"));
    }

    #[test]
    fn test_describe_missing_table() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(!table_exists(&conn).unwrap());
        assert!(describe(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_no_version_recorded() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, InitMode::Strict).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 0);
    }
}
