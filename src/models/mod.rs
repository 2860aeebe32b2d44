//! Value types shared by the engine and its boundary adapters.

mod calendar;
mod outcome;
mod timesheet;
mod worker;

pub use calendar::{CalendarEntry, ShiftAssignment};
pub use outcome::{PlanOutcome, ReportOutcome};
pub use timesheet::{Timesheet, TimesheetRow};
pub use worker::Worker;
