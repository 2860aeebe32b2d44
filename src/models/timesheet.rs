//! Timesheet models.
//!
//! A worker's timesheet for one day is an ordered sequence of fixed-length
//! slot rows, sorted ascending by time. The row locator depends on that
//! ordering. Column positions (start/end/plan/result) are configuration;
//! the reader resolves them once, so rows here are already typed.

use serde::{Deserialize, Serialize};

/// One reporting slot in a worker's timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRow {
    /// The slot's start time cell, `HH:MM`.
    pub start_time: String,
    /// The slot's end time cell, `HH:MM`.
    pub end_time: String,
    /// The worker's planned-work cell for the slot.
    pub plan: String,
    /// The worker's work-result cell for the slot.
    pub result: String,
}

impl TimesheetRow {
    /// The slot's own window as `HH:MM-HH:MM` range text.
    pub fn range_text(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

/// A worker's full timesheet for one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    /// The day's `YYYYMMDD` label (the tab the rows were read from).
    pub date_label: String,
    /// Slot rows in ascending time order.
    pub rows: Vec<TimesheetRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_text_joins_start_and_end() {
        let row = TimesheetRow {
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            plan: String::new(),
            result: String::new(),
        };
        assert_eq!(row.range_text(), "09:00-10:00");
    }
}
