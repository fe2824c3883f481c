//! Message templates keyed by diagnostic code
//!
//! Tables use the layout of TypeScript's `diagnosticMessages.json`: the
//! message text is the key and the value carries the code. A table of
//! common messages ships with the crate; the compiler's full table can be
//! loaded from disk with [`load_table`].

use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Code -> message template
pub type MessageTable = BTreeMap<u32, String>;

#[derive(Debug, Deserialize)]
struct MessageEntry {
    code: u32,
}

lazy_static! {
    static ref BUNDLED: MessageTable =
        parse_table(include_str!("messages.json")).unwrap_or_default();
}

/// Templates shipped with the crate
pub fn bundled() -> &'static MessageTable {
    &BUNDLED
}

/// Parse a table in `diagnosticMessages.json` layout.
///
/// When two messages share a code, the first in key order wins.
pub fn parse_table(json: &str) -> Result<MessageTable, serde_json::Error> {
    let entries: BTreeMap<String, MessageEntry> = serde_json::from_str(json)?;

    let mut table = MessageTable::new();
    for (message, entry) in entries {
        table.entry(entry.code).or_insert(message);
    }
    Ok(table)
}

/// Load a table from disk
pub fn load_table(path: &Path) -> Result<MessageTable, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    let table = parse_table(&content).map_err(|e| ConfigError::Messages {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), count = table.len(), "Loaded message table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_table_parses() {
        let table = bundled();
        assert!(table.len() >= 40);
        assert_eq!(
            table.get(&2322).map(String::as_str),
            Some("Type '{0}' is not assignable to type '{1}'.")
        );
        assert_eq!(table.get(&1005).map(String::as_str), Some("'{0}' expected."));
    }

    #[test]
    fn test_parse_table_ignores_extra_fields() {
        let table = parse_table(
            r#"{"Custom message.": {"category": "Error", "code": 90001, "reportsUnnecessary": true}}"#,
        )
        .unwrap();
        assert_eq!(table.get(&90001).map(String::as_str), Some("Custom message."));
    }

    #[test]
    fn test_load_table_reports_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Messages { .. }));
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/nonexistent/messages.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
