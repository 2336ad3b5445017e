use colored::Colorize;

use crate::core::Entry;
use crate::storage::ColumnInfo;

/// Longest content preview shown in lists, in characters.
const PREVIEW_CHARS: usize = 60;

/// One-line preview of plain content.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(PREVIEW_CHARS).collect();
    if line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}

/// Format a list of entries as a pretty table
pub fn format_entries_pretty(entries: &[Entry], total: usize) -> String {
    if entries.is_empty() {
        return format!("Entries (0 of {total})\n  No entries");
    }

    let mut output = format!("Entries ({} of {total})\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    let width = entries.iter().map(|e| e.id.chars().count()).max().unwrap_or(0);

    for entry in entries {
        let id = format!("{:<width$}", entry.id);
        let line = if entry.encrypted {
            format!("{}  {}", id.bold(), "[encrypted]".yellow())
        } else {
            format!("{}  {}", id.bold(), preview(&entry.content))
        };
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single entry as pretty output
pub fn format_entry_pretty(entry: &Entry) -> String {
    let mut output = format!("{}\n", entry.id.bold());

    if entry.encrypted {
        output.push_str(&format!("  {}: {}\n", "Encrypted".dimmed(), "yes".yellow()));
        output.push_str(&format!(
            "  {}: {}\n",
            "Content".dimmed(),
            "(withheld, use `clipstore reveal`)".dimmed()
        ));
    } else {
        output.push_str(&format!("  {}: no\n", "Encrypted".dimmed()));
        output.push_str(&format!("  {}:\n", "Content".dimmed()));
        for line in entry.content.lines() {
            output.push_str(&format!("    {line}\n"));
        }
    }

    output
}

/// Format the columns of the entries table
pub fn format_columns_pretty(columns: &[ColumnInfo]) -> String {
    if columns.is_empty() {
        return "entries\n  (table does not exist)".to_string();
    }

    let mut output = format!("{}\n", "entries".bold());
    for column in columns {
        let mut line = format!("  {:<10} {}", column.name, column.decl_type.cyan());
        if column.primary_key {
            line.push_str(&format!(" {}", "PRIMARY KEY".green()));
        }
        if column.not_null {
            line.push_str(" NOT NULL");
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Payload;
    use crate::storage::schema;

    #[test]
    fn test_format_entries_pretty_empty() {
        let output = format_entries_pretty(&[], 0);

        assert!(output.contains("No entries"));
    }

    #[test]
    fn test_format_entries_pretty_hides_encrypted_content() {
        colored::control::set_override(false);
        let entries = vec![
            Entry::new("a1", Payload::new("hello", None)),
            Entry::new("b2", Payload::new("classified", Some("k".to_string()))),
        ];

        let output = format_entries_pretty(&entries, 2);

        assert!(output.contains("Entries (2 of 2)"));
        assert!(output.contains("a1  hello"));
        assert!(output.contains("[encrypted]"));
        assert!(!output.contains("classified"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(100);

        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 1);
        assert_eq!(preview("first\nsecond"), "first…");
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_format_entry_pretty_multiline() {
        let entry = Entry::new("m1", Payload::new("line one\nline two", None));

        let output = format_entry_pretty(&entry);

        assert!(output.contains("    line one\n"));
        assert!(output.contains("    line two\n"));
    }

    #[test]
    fn test_format_columns_pretty() {
        colored::control::set_override(false);
        let output = format_columns_pretty(&schema::expected_columns());

        assert!(output.contains("id         TEXT PRIMARY KEY NOT NULL"));
        assert!(output.contains("key        TEXT\n"));
    }
}
