//! Core reconciliation logic.
//!
//! Everything in this module is pure: given a calendar-declared shift
//! window, a worker's ordered slot rows, and a wall-clock instant, it
//! determines which row is "now", which is the previous reporting slot,
//! and how the worker's entries classify. No I/O happens here.

mod grouping;
mod plan;
mod report;
mod row_locator;
mod time_window;

pub use grouping::{group_by_attribute, ReportPartitions};
pub use plan::classify_plan;
pub use report::classify_report;
pub use row_locator::{find_shift_start_row, locate, RowLookup, SlotOffset};
pub use time_window::{parse_window, ShiftWindow};

pub(crate) use time_window::epoch_ms;
