//! Timesheet reading.
//!
//! Each worker owns one spreadsheet with one tab per business day, named
//! by the day's date label. The slot table occupies a fixed band of rows;
//! the start/end/plan/result column positions come from settings and are
//! resolved here, once, into typed rows.

use crate::error::EngineResult;
use crate::models::{Timesheet, TimesheetRow, Worker};
use crate::settings::Settings;

use super::store::TabularStore;

/// Reads a worker's day tab into a typed [`Timesheet`].
#[derive(Debug)]
pub struct TimesheetReader<'a, S> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: TabularStore> TimesheetReader<'a, S> {
    /// Creates a reader over the given store and settings.
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Loads the worker's slot rows for the given day.
    ///
    /// Rows whose start or end time cell is blank are dropped: they are
    /// the unfilled tail of the timesheet template, not real slots.
    pub fn load(&self, worker: &Worker, date_label: &str) -> EngineResult<Timesheet> {
        let grid = self.store.read_grid(
            date_label,
            Some(&worker.sheet_id),
            self.settings.timesheet_start_row,
            self.settings.timesheet_row_count,
        )?;

        let cell = |row: &Vec<String>, column: usize| -> String {
            row.get(column - 1).cloned().unwrap_or_default()
        };

        let rows = grid
            .iter()
            .map(|row| TimesheetRow {
                start_time: cell(row, self.settings.start_time_column),
                end_time: cell(row, self.settings.end_time_column),
                plan: cell(row, self.settings.plan_column),
                result: cell(row, self.settings.result_column),
            })
            .filter(|row| !row.start_time.is_empty() && !row.end_time.is_empty())
            .collect();

        Ok(Timesheet {
            date_label: date_label.to_string(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{CachedStore, MemoryStore};

    fn store() -> CachedStore<MemoryStore> {
        let mut source = MemoryStore::new();
        source.insert(
            "20240115",
            Some("sheet-alice"),
            vec![
                vec!["slot table".into()], // banner row above the band
                vec![
                    "09:00".into(),
                    "10:00".into(),
                    "plan A".into(),
                    "did A".into(),
                ],
                vec!["10:00".into(), "11:00".into(), "plan B".into(), "".into()],
                vec!["".into(), "".into(), "".into(), "".into()], // template tail
            ],
        );
        CachedStore::new(source)
    }

    #[test]
    fn test_loads_typed_rows_and_drops_template_tail() {
        let settings = crate::test_support::settings();
        let store = store();
        let reader = TimesheetReader::new(&store, &settings);
        let worker = crate::test_support::worker("alice", "A");

        let timesheet = reader.load(&worker, "20240115").unwrap();
        assert_eq!(timesheet.rows.len(), 2);
        assert_eq!(timesheet.rows[0].result, "did A");
        assert_eq!(timesheet.rows[1].plan, "plan B");
        assert_eq!(timesheet.rows[1].result, "");
    }

    #[test]
    fn test_missing_day_tab_is_an_error() {
        let settings = crate::test_support::settings();
        let store = store();
        let reader = TimesheetReader::new(&store, &settings);
        let worker = crate::test_support::worker("bob", "B");

        assert!(reader.load(&worker, "20240115").is_err());
    }
}
