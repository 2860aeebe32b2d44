//! Worker model.
//!
//! A `Worker` is an immutable snapshot of one member's roster data for the
//! duration of a single operation. It is assembled by the roster adapter
//! from the member list and the management sheet.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A worker eligible for attendance reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique display name; the roster key.
    pub name: String,
    /// The worker's chat mention handle (e.g. `[To:123] Alice`).
    pub chat_handle: String,
    /// The id of the worker's own timesheet spreadsheet.
    pub sheet_id: String,
    /// A browser link to the worker's timesheet spreadsheet.
    pub sheet_url: String,
    /// Running count of cell-broadcast entries the worker has filled in.
    pub entry_count: u32,
    /// Whether the worker has opted into notifications.
    pub notification_eligible: bool,
    /// The full roster row, kept so message grouping can read the
    /// configured sort-key column without re-querying the sheet.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Worker {
    /// Reads a named column from the worker's roster row.
    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_worker() -> Worker {
        let mut attributes = HashMap::new();
        attributes.insert("team".to_string(), "A".to_string());
        Worker {
            name: "alice".to_string(),
            chat_handle: "[To:1] alice".to_string(),
            sheet_id: "sheet-1".to_string(),
            sheet_url: "https://example.test/sheet-1".to_string(),
            entry_count: 3,
            notification_eligible: true,
            attributes,
        }
    }

    #[test]
    fn test_attribute_returns_column_value() {
        let worker = make_worker();
        assert_eq!(worker.attribute("team"), Some("A"));
    }

    #[test]
    fn test_attribute_missing_column_is_none() {
        let worker = make_worker();
        assert_eq!(worker.attribute("region"), None);
    }

    #[test]
    fn test_worker_serialization_round_trip() {
        let worker = make_worker();
        let json = serde_json::to_string(&worker).unwrap();
        let deserialized: Worker = serde_json::from_str(&json).unwrap();
        assert_eq!(worker, deserialized);
    }
}
