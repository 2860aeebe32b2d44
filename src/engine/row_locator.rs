//! Timesheet row location.
//!
//! The heart of the reconciliation logic: given the calendar-declared
//! shift window, a worker's ordered slot rows, and "now", find the row
//! representing the current reporting slot or the one before it, while
//! trimming slots the worker was never scheduled to work.

use crate::error::EngineResult;
use crate::models::{Timesheet, TimesheetRow};

use super::time_window::{parse_window, ShiftWindow};

/// Which slot to return relative to the row matching "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOffset {
    /// The row whose own window contains "now".
    Current,
    /// The row immediately preceding the current one in sheet order.
    Previous,
}

impl SlotOffset {
    fn apply(self, index: usize) -> Option<usize> {
        match self {
            SlotOffset::Current => Some(index),
            SlotOffset::Previous => index.checked_sub(1),
        }
    }
}

/// The result of a slot lookup.
///
/// Every miss variant is caller-visible "skip this worker"; they are kept
/// distinct so logs can say why a worker dropped out of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLookup<'a> {
    /// The requested slot row.
    Found(&'a TimesheetRow),
    /// "Now" falls outside every row's own window (before opening or
    /// after closing).
    NoCurrentSlot,
    /// The offset walked off the edge of the sheet: there is no row
    /// before the first slot.
    NoAdjacentSlot,
    /// The worker's declared shift had not yet begun by the target slot.
    NotYetWorking,
    /// The worker's declared shift had already ended by the target slot.
    AlreadyFinished,
}

impl<'a> RowLookup<'a> {
    /// Collapses the lookup to the located row, if any.
    pub fn row(&self) -> Option<&'a TimesheetRow> {
        match self {
            RowLookup::Found(row) => Some(row),
            _ => None,
        }
    }
}

/// Locates the timesheet row for the current or previous reporting slot.
///
/// Scans `timesheet.rows` in order for the unique row whose own window
/// contains `now_ms` (both ends inclusive, a convention inherited from the
/// source system), applies `slot_offset`, and then trims slots outside the
/// worker's declared shift: a target slot ending before the shift began
/// means the worker was not yet working, and a target slot starting at or
/// after the shift's end means they had already finished. Both trims are
/// misses, not errors — they keep early leavers and late starters out of
/// the error reports.
///
/// # Errors
///
/// Returns a parse error when a row's own time cells are malformed. The
/// caller evaluates workers independently, so this halts only the affected
/// worker.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::{locate, parse_window, RowLookup, SlotOffset};
/// use attendance_engine::models::{Timesheet, TimesheetRow};
///
/// let shift = parse_window("20240115", "09:00-18:00").unwrap();
/// let timesheet = Timesheet {
///     date_label: "20240115".to_string(),
///     rows: vec![TimesheetRow {
///         start_time: "09:00".to_string(),
///         end_time: "10:00".to_string(),
///         plan: "write report".to_string(),
///         result: String::new(),
///     }],
/// };
/// let now = parse_window("20240115", "09:05-09:05").unwrap().start_ms;
///
/// let lookup = locate(&shift, &timesheet, now, SlotOffset::Current).unwrap();
/// assert!(matches!(lookup, RowLookup::Found(_)));
/// ```
pub fn locate<'a>(
    shift: &ShiftWindow,
    timesheet: &'a Timesheet,
    now_ms: i64,
    slot_offset: SlotOffset,
) -> EngineResult<RowLookup<'a>> {
    for (index, row) in timesheet.rows.iter().enumerate() {
        let row_window = parse_window(&timesheet.date_label, &row.range_text())?;
        if !row_window.contains(now_ms) {
            continue;
        }

        let target = match slot_offset.apply(index) {
            Some(target) if target < timesheet.rows.len() => target,
            _ => return Ok(RowLookup::NoAdjacentSlot),
        };

        let target_row = &timesheet.rows[target];
        let target_window = parse_window(&timesheet.date_label, &target_row.range_text())?;

        if shift.start_ms > target_window.end_ms {
            return Ok(RowLookup::NotYetWorking);
        }
        if shift.end_ms <= target_window.start_ms {
            return Ok(RowLookup::AlreadyFinished);
        }

        return Ok(RowLookup::Found(target_row));
    }

    Ok(RowLookup::NoCurrentSlot)
}

/// Finds the first slot row of the worker's declared shift.
///
/// Returns the first row whose own window ends at or after the shift's
/// start; used for plan validation, not for "now".
pub fn find_shift_start_row<'a>(
    shift: &ShiftWindow,
    timesheet: &'a Timesheet,
) -> EngineResult<Option<&'a TimesheetRow>> {
    for row in &timesheet.rows {
        let row_window = parse_window(&timesheet.date_label, &row.range_text())?;
        if row_window.end_ms >= shift.start_ms {
            return Ok(Some(row));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::time_window::epoch_ms;
    use chrono::NaiveDate;

    const DAY: &str = "20240115";

    fn at(hour: u32, minute: u32) -> i64 {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        epoch_ms(date.and_hms_opt(hour, minute, 0).unwrap())
    }

    fn row(start: &str, end: &str, result: &str) -> TimesheetRow {
        TimesheetRow {
            start_time: start.to_string(),
            end_time: end.to_string(),
            plan: String::new(),
            result: result.to_string(),
        }
    }

    /// Hourly slots from 09:00 to 18:00.
    fn hourly_sheet() -> Timesheet {
        let rows = (9..18)
            .map(|h| row(&format!("{h:02}:00"), &format!("{:02}:00", h + 1), ""))
            .collect();
        Timesheet {
            date_label: DAY.to_string(),
            rows,
        }
    }

    fn shift(range: &str) -> ShiftWindow {
        parse_window(DAY, range).unwrap()
    }

    #[test]
    fn test_current_slot_matches_containing_row() {
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("09:00-18:00"), &timesheet, at(11, 5), SlotOffset::Current)
            .unwrap();
        assert_eq!(lookup.row().unwrap().start_time, "11:00");
    }

    #[test]
    fn test_previous_slot_is_one_row_back() {
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("09:00-18:00"), &timesheet, at(11, 5), SlotOffset::Previous)
            .unwrap();
        assert_eq!(lookup.row().unwrap().start_time, "10:00");
    }

    #[test]
    fn test_now_outside_every_slot_is_no_current_slot() {
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("09:00-18:00"), &timesheet, at(8, 30), SlotOffset::Current)
            .unwrap();
        assert_eq!(lookup, RowLookup::NoCurrentSlot);
        assert!(lookup.row().is_none());
    }

    #[test]
    fn test_previous_of_first_row_is_no_adjacent_slot() {
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("09:00-18:00"), &timesheet, at(9, 5), SlotOffset::Previous)
            .unwrap();
        assert_eq!(lookup, RowLookup::NoAdjacentSlot);
    }

    #[test]
    fn test_slot_before_shift_start_is_not_yet_working() {
        // Shift starts at 13:00; at 11:05 the previous slot (10:00-11:00)
        // ended before the shift began.
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("13:00-18:00"), &timesheet, at(11, 5), SlotOffset::Previous)
            .unwrap();
        assert_eq!(lookup, RowLookup::NotYetWorking);
    }

    #[test]
    fn test_slot_after_shift_end_is_already_finished() {
        // Shift ended at 12:00; at 14:05 the current slot starts at 14:00,
        // after the shift was over. Early leavers must not be flagged.
        let timesheet = hourly_sheet();
        let lookup = locate(&shift("09:00-12:00"), &timesheet, at(14, 5), SlotOffset::Current)
            .unwrap();
        assert_eq!(lookup, RowLookup::AlreadyFinished);
    }

    #[test]
    fn test_slot_boundary_instants_are_inclusive() {
        let timesheet = hourly_sheet();
        // Exactly 11:00 belongs to both 10:00-11:00 and 11:00-12:00; the
        // scan returns the earlier row, per the source convention.
        let lookup = locate(&shift("09:00-18:00"), &timesheet, at(11, 0), SlotOffset::Current)
            .unwrap();
        assert_eq!(lookup.row().unwrap().start_time, "10:00");
    }

    #[test]
    fn test_locate_is_a_pure_function_of_its_inputs() {
        let timesheet = hourly_sheet();
        let window = shift("09:00-18:00");
        let first = locate(&window, &timesheet, at(11, 5), SlotOffset::Previous).unwrap();
        let second = locate(&window, &timesheet, at(11, 5), SlotOffset::Previous).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_row_cells_surface_a_parse_error() {
        let timesheet = Timesheet {
            date_label: DAY.to_string(),
            rows: vec![row("nine", "ten", "")],
        };
        assert!(locate(&shift("09:00-18:00"), &timesheet, at(9, 5), SlotOffset::Current).is_err());
    }

    #[test]
    fn test_empty_timesheet_is_no_current_slot() {
        let timesheet = Timesheet {
            date_label: DAY.to_string(),
            rows: vec![],
        };
        let lookup =
            locate(&shift("09:00-18:00"), &timesheet, at(9, 5), SlotOffset::Current).unwrap();
        assert_eq!(lookup, RowLookup::NoCurrentSlot);
    }

    #[test]
    fn test_shift_start_row_is_first_row_ending_after_shift_start() {
        let timesheet = hourly_sheet();
        let found = find_shift_start_row(&shift("13:00-18:00"), &timesheet)
            .unwrap()
            .unwrap();
        // 12:00-13:00 ends exactly at the shift start, so it matches first.
        assert_eq!(found.start_time, "12:00");
    }

    #[test]
    fn test_shift_start_row_missing_when_sheet_ends_too_early() {
        let timesheet = Timesheet {
            date_label: DAY.to_string(),
            rows: vec![row("09:00", "10:00", "")],
        };
        let found = find_shift_start_row(&shift("13:00-18:00"), &timesheet).unwrap();
        assert!(found.is_none());
    }
}
