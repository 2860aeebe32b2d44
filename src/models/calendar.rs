//! Calendar entry model.
//!
//! One calendar row describes one business day: the day's canonical date
//! label plus one column per worker holding either an `HH:MM-HH:MM` shift
//! string or the holiday sentinel.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the calendar declares for one worker on one business day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftAssignment<'a> {
    /// The worker is scheduled; the payload is the raw `HH:MM-HH:MM` text.
    Working(&'a str),
    /// The worker is off: holiday sentinel, blank cell, or no column at all.
    Off,
}

/// A read-only snapshot of one calendar row.
///
/// Fetched once per top-level operation and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// The day's canonical `YYYYMMDD` label (also the timesheet tab name).
    pub date_label: String,
    /// Worker name -> raw calendar cell text.
    pub shifts: HashMap<String, String>,
}

impl CalendarEntry {
    /// Resolves the calendar cell for one worker.
    ///
    /// A missing column is treated the same as a holiday cell: the worker
    /// is simply not scheduled that day.
    pub fn shift_for(&self, worker_name: &str, holiday_marker: &str) -> ShiftAssignment<'_> {
        match self.shifts.get(worker_name) {
            Some(text) if text.is_empty() || text == holiday_marker => ShiftAssignment::Off,
            Some(text) => ShiftAssignment::Working(text),
            None => ShiftAssignment::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry() -> CalendarEntry {
        let mut shifts = HashMap::new();
        shifts.insert("alice".to_string(), "09:00-18:00".to_string());
        shifts.insert("bob".to_string(), "holiday".to_string());
        shifts.insert("carol".to_string(), String::new());
        CalendarEntry {
            date_label: "20240115".to_string(),
            shifts,
        }
    }

    #[test]
    fn test_scheduled_worker_gets_shift_text() {
        let entry = make_entry();
        assert_eq!(
            entry.shift_for("alice", "holiday"),
            ShiftAssignment::Working("09:00-18:00")
        );
    }

    #[test]
    fn test_holiday_cell_is_off() {
        let entry = make_entry();
        assert_eq!(entry.shift_for("bob", "holiday"), ShiftAssignment::Off);
    }

    #[test]
    fn test_blank_cell_is_off() {
        let entry = make_entry();
        assert_eq!(entry.shift_for("carol", "holiday"), ShiftAssignment::Off);
    }

    #[test]
    fn test_missing_column_is_off() {
        let entry = make_entry();
        assert_eq!(entry.shift_for("dave", "holiday"), ShiftAssignment::Off);
    }
}
