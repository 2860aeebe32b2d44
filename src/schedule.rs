//! Scheduling boundary.
//!
//! The engine never registers triggers with the host directly; it asks a
//! [`Scheduler`] to run a named [`Operation`] at a wall-clock time or on a
//! daily cadence. The host is trusted not to re-invoke an operation while
//! a previous instance of the same operation is still running, and caps
//! near-term pending instances of a recurring operation at two.

use chrono::NaiveDateTime;

use crate::error::EngineResult;

/// Every operation the scheduler or menu can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full report check: errors plus the success broadcast.
    ReportCheck,
    /// Error-only report re-check; never broadcasts successes.
    ReportErrorCheckOnly,
    /// Ask workers to fill in the slot that just elapsed.
    RequestReportWrite,
    /// Validate today's plan cells.
    CheckTodayPlan,
    /// Validate the next business day's plan cells.
    CheckNextDayPlan,
    /// Ask workers to fill in the next business day's plans.
    RequestNextDayPlan,
    /// Morning meeting call for workers currently on shift.
    MorningMeeting,
    /// End-of-work summary.
    EndOfWorkReport,
    /// Targeted cell broadcast.
    CellReport,
    /// Create today's timesheet tabs.
    CreateTodayTemplate,
    /// Create the next business day's timesheet tabs.
    CreateNextDayTemplate,
    /// Reload timesheet file ids/links into the management sheet.
    ReloadRosterIds,
    /// Reset all triggers for the coming day (reschedules itself daily).
    InitTriggers,
    /// Cancel every pending trigger; a manual menu action.
    PurgeTriggers,
}

impl Operation {
    /// Stable name used in trigger registrations and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ReportCheck => "report_check",
            Operation::ReportErrorCheckOnly => "report_error_check_only",
            Operation::RequestReportWrite => "request_report_write",
            Operation::CheckTodayPlan => "check_today_plan",
            Operation::CheckNextDayPlan => "check_next_day_plan",
            Operation::RequestNextDayPlan => "request_next_day_plan",
            Operation::MorningMeeting => "morning_meeting",
            Operation::EndOfWorkReport => "end_of_work_report",
            Operation::CellReport => "cell_report",
            Operation::CreateTodayTemplate => "create_today_template",
            Operation::CreateNextDayTemplate => "create_next_day_template",
            Operation::ReloadRosterIds => "reload_roster_ids",
            Operation::InitTriggers => "init_triggers",
            Operation::PurgeTriggers => "purge_triggers",
        }
    }
}

/// Registers and cancels named triggers with the host scheduler.
pub trait Scheduler {
    /// Schedules `operation` once, at `at`.
    fn schedule_at(&self, operation: Operation, at: NaiveDateTime) -> EngineResult<()>;

    /// Schedules `operation` every day at the given hour.
    fn schedule_daily(&self, operation: Operation, hour: u32) -> EngineResult<()>;

    /// Cancels every pending trigger for `operation`.
    fn cancel(&self, operation: Operation) -> EngineResult<()>;

    /// Cancels every pending trigger.
    fn cancel_all(&self) -> EngineResult<()>;
}

/// Wall-clock source; the pure engine takes instants, the ops layer takes
/// a clock.
pub trait Clock {
    /// The current local datetime.
    fn now(&self) -> NaiveDateTime;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
