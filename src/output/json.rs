//! JSON output formatting for clipstore.

use serde::Serialize;
use serde_json::json;

use crate::core::Entry;
use crate::error::ClipstoreError;
use crate::storage::{schema, ColumnInfo, InitOutcome};

/// What JSON output shows of an entry.
#[derive(Serialize)]
struct EntryView<'a> {
    id: &'a str,
    encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

impl<'a> From<&'a Entry> for EntryView<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: &entry.id,
            encrypted: entry.encrypted,
            content: (!entry.encrypted).then_some(entry.content.as_str()),
        }
    }
}

/// Format entries as JSON
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_entries_json(entries: &[Entry], total: usize) -> Result<String, ClipstoreError> {
    let items: Vec<EntryView<'_>> = entries.iter().map(EntryView::from).collect();
    let output = json!({
        "count": items.len(),
        "total": total,
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single entry as JSON
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_entry_json(entry: &Entry) -> Result<String, ClipstoreError> {
    Ok(serde_json::to_string_pretty(&EntryView::from(entry))?)
}

/// Format table columns as JSON
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_columns_json(columns: &[ColumnInfo]) -> Result<String, ClipstoreError> {
    let output = json!({
        "table": schema::TABLE,
        "columns": columns
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an init outcome as JSON
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn format_init_json(outcome: InitOutcome) -> Result<String, ClipstoreError> {
    let output = json!({
        "table": schema::TABLE,
        "outcome": outcome
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `ClipstoreError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ClipstoreError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Payload;

    fn plain(id: &str, content: &str) -> Entry {
        Entry::new(id, Payload::new(content, None))
    }

    fn secret(id: &str, content: &str) -> Entry {
        Entry::new(id, Payload::new(content, Some("hunter2".to_string())))
    }

    #[test]
    fn test_format_entries_json_empty_list() {
        let result = format_entries_json(&[], 0).unwrap();

        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"total\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_entries_json_mixed() {
        let entries = vec![plain("a1", "hello"), secret("b2", "classified")];
        let result = format_entries_json(&entries, 5).unwrap();

        assert!(result.contains("\"count\": 2"));
        assert!(result.contains("\"total\": 5"));
        assert!(result.contains("\"content\": \"hello\""));
        assert!(result.contains("\"id\": \"b2\""));
        assert!(!result.contains("classified"));
        assert!(!result.contains("hunter2"));
    }

    #[test]
    fn test_format_entry_json_plain() {
        let value: serde_json::Value =
            serde_json::from_str(&format_entry_json(&plain("a1", "hello")).unwrap()).unwrap();

        assert_eq!(value["id"], "a1");
        assert_eq!(value["encrypted"], false);
        assert_eq!(value["content"], "hello");
    }

    #[test]
    fn test_format_entry_json_encrypted_withholds_content() {
        let value: serde_json::Value =
            serde_json::from_str(&format_entry_json(&secret("b2", "classified")).unwrap())
                .unwrap();

        assert_eq!(value["encrypted"], true);
        assert!(value.get("content").is_none());
        assert!(value.get("key").is_none());
    }

    #[test]
    fn test_format_columns_json() {
        let result = format_columns_json(&schema::expected_columns()).unwrap();

        assert!(result.contains("\"table\": \"entries\""));
        assert!(result.contains("\"name\": \"encrypted\""));
        assert!(result.contains("\"decl_type\": \"INTEGER\""));
    }

    #[test]
    fn test_format_init_json() {
        let result = format_init_json(InitOutcome::AlreadyPresent).unwrap();

        assert!(result.contains("\"outcome\": \"already_present\""));
    }
}
