//! Shift window parsing.
//!
//! Turns a `YYYYMMDD` date label and an `HH:MM-HH:MM` range string into a
//! wall-clock interval in epoch milliseconds. Both the calendar's declared
//! shift and each timesheet row's own slot window go through this one
//! conversion.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A wall-clock interval in epoch milliseconds.
///
/// Invariant: `start_ms <= end_ms`; [`parse_window`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Start instant, inclusive.
    pub start_ms: i64,
    /// End instant. Slot matching treats this as inclusive as well; that
    /// is a boundary convention inherited from the source system.
    pub end_ms: i64,
}

impl ShiftWindow {
    /// The window length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_ms - self.start_ms) / 60_000
    }

    /// Whether `instant_ms` falls within the window, both ends inclusive.
    pub fn contains(&self, instant_ms: i64) -> bool {
        self.start_ms <= instant_ms && instant_ms <= self.end_ms
    }
}

/// Converts a chrono datetime to epoch milliseconds.
///
/// Naive local datetimes are mapped as if UTC; every instant in the engine
/// goes through this same mapping, so comparisons stay consistent.
pub(crate) fn epoch_ms(datetime: NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp_millis()
}

/// Parses a date label and an `HH:MM-HH:MM` range into a [`ShiftWindow`].
///
/// # Arguments
///
/// * `date_label` - 8-digit `YYYYMMDD` string
/// * `range_text` - e.g. `"09:00-18:00"`
///
/// # Errors
///
/// [`EngineError::InvalidDateLabel`] when the label is not 8 digits or not
/// a real date; [`EngineError::InvalidTimeRange`] when the range is missing
/// its `-`, a field is non-numeric or out of range, or the end precedes the
/// start.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::parse_window;
///
/// let window = parse_window("20240115", "09:00-18:00").unwrap();
/// assert_eq!(window.duration_minutes(), 540);
/// ```
pub fn parse_window(date_label: &str, range_text: &str) -> EngineResult<ShiftWindow> {
    let date = parse_date_label(date_label)?;

    let (start_text, end_text) =
        range_text
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidTimeRange {
                text: range_text.to_string(),
                message: "missing '-' separator".to_string(),
            })?;

    let start = date.and_time(parse_clock(range_text, start_text)?);
    let end = date.and_time(parse_clock(range_text, end_text)?);

    if end < start {
        return Err(EngineError::InvalidTimeRange {
            text: range_text.to_string(),
            message: "end precedes start".to_string(),
        });
    }

    Ok(ShiftWindow {
        start_ms: epoch_ms(start),
        end_ms: epoch_ms(end),
    })
}

/// Parses an 8-digit `YYYYMMDD` label into a date.
fn parse_date_label(date_label: &str) -> EngineResult<NaiveDate> {
    if date_label.len() != 8 || !date_label.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidDateLabel {
            label: date_label.to_string(),
        });
    }

    NaiveDate::parse_from_str(date_label, "%Y%m%d").map_err(|_| EngineError::InvalidDateLabel {
        label: date_label.to_string(),
    })
}

/// Parses one `HH:MM` field of a range.
fn parse_clock(range_text: &str, clock_text: &str) -> EngineResult<chrono::NaiveTime> {
    let invalid = || EngineError::InvalidTimeRange {
        text: range_text.to_string(),
        message: format!("bad time field '{clock_text}'"),
    };

    let (hour_text, minute_text) = clock_text.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour_text.parse().map_err(|_| invalid())?;
    let minute: u32 = minute_text.parse().map_err(|_| invalid())?;

    chrono::NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
