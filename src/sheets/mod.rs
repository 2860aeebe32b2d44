//! Spreadsheet boundary: the tabular store traits, the explicit read
//! cache, and the adapters that turn raw sheet grids into model values.

mod cache;
mod calendar;
mod drive;
mod memory;
mod roster;
mod store;
mod timesheet;

pub use cache::CachedStore;
pub use calendar::{DayOffset, ShiftCalendar};
pub use drive::DriveStore;
pub use memory::MemoryStore;
pub use roster::{
    WorkerRoster, CHAT_HANDLE_COLUMN, ENTRY_COUNT_COLUMN, NAME_COLUMN, NOTIFY_COLUMN,
    SHEET_ID_COLUMN, SHEET_URL_COLUMN,
};
pub use store::{Record, SheetSource, TabularStore};
pub use timesheet::TimesheetReader;
