//! Calendar resolution.

use chrono::NaiveDate;
use tracing::info;

use crate::error::EngineResult;
use crate::models::CalendarEntry;
use crate::settings::{Settings, CALENDAR_SHEET};

use super::store::TabularStore;

/// Which calendar row to resolve relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOffset {
    /// Today's row.
    Today,
    /// The row immediately following today's: the next business day.
    NextBusinessDay,
}

/// Resolves calendar rows for the engine.
///
/// The calendar sheet holds one row per business day, keyed by the
/// `YYYYMMDD` date label. A day with no row is not a business day, and
/// every caller treats that as "skip all work for this invocation".
#[derive(Debug)]
pub struct ShiftCalendar<'a, S> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: TabularStore> ShiftCalendar<'a, S> {
    /// Creates a calendar over the given store and settings.
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Resolves the calendar entry for today or the next business day.
    ///
    /// `Ok(None)` when today's date label has no calendar row (weekend,
    /// company holiday, or sheet exhausted) or when `NextBusinessDay` runs
    /// past the end of the sheet.
    pub fn resolve(&self, today: NaiveDate, day: DayOffset) -> EngineResult<Option<CalendarEntry>> {
        let label = today.format("%Y%m%d").to_string();
        let row_offset = match day {
            DayOffset::Today => 0,
            DayOffset::NextBusinessDay => 1,
        };

        let record = self.store.find(
            CALENDAR_SHEET,
            &self.settings.calendar_key_column,
            &label,
            row_offset,
            Some(&self.settings.member_sheet_id),
        )?;

        let Some(record) = record else {
            info!(label, ?day, "no calendar row; not a business day");
            return Ok(None);
        };

        let date_label = record.get(&self.settings.calendar_key_column)?.to_string();
        Ok(Some(CalendarEntry {
            date_label,
            shifts: record.to_map(),
        }))
    }
}
