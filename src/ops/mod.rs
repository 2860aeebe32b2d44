//! Top-level operations.
//!
//! Each public method here is one menu- or trigger-invocable action. They
//! all follow the same shape: resolve today's calendar row (no row means
//! "not a business day" and the whole invocation is a logged no-op), pull
//! the eligible roster, run the pure engine per worker, and hand the
//! partitioned results to the notifier. One worker's bad data never
//! aborts the rest of the roster.

mod cell_report;
mod meetings;
mod plan;
mod report;
mod templates;
mod triggers;

use chrono::NaiveDate;
use tracing::info;

use crate::error::EngineResult;
use crate::models::CalendarEntry;
use crate::notify::Notifier;
use crate::schedule::{Clock, Operation, Scheduler};
use crate::settings::Settings;
use crate::sheets::{DayOffset, DriveStore, ShiftCalendar, TabularStore};

/// The operation surface, wired to its collaborators.
pub struct Operations<'a, S, D, N, Sch, C> {
    store: &'a S,
    drive: &'a D,
    notifier: &'a N,
    scheduler: &'a Sch,
    clock: &'a C,
    settings: Settings,
}

impl<'a, S, D, N, Sch, C> Operations<'a, S, D, N, Sch, C>
where
    S: TabularStore,
    D: DriveStore,
    N: Notifier,
    Sch: Scheduler,
    C: Clock,
{
    /// Wires up the operation surface, loading settings once.
    pub fn new(
        store: &'a S,
        drive: &'a D,
        notifier: &'a N,
        scheduler: &'a Sch,
        clock: &'a C,
    ) -> EngineResult<Self> {
        let settings = Settings::load(store)?;
        Ok(Self {
            store,
            drive,
            notifier,
            scheduler,
            clock,
            settings,
        })
    }

    /// The loaded settings, for callers that need to inspect them.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Routes a named operation to its method; the menu/CLI entry point.
    pub fn dispatch(&self, operation: Operation) -> EngineResult<()> {
        info!(operation = operation.name(), "dispatch");
        match operation {
            Operation::ReportCheck => self.report_check(),
            Operation::ReportErrorCheckOnly => self.report_error_check_only(),
            Operation::RequestReportWrite => self.request_report_write(),
            Operation::CheckTodayPlan => self.check_today_plan(),
            Operation::CheckNextDayPlan => self.check_next_day_plan(),
            Operation::RequestNextDayPlan => self.request_next_day_plan(),
            Operation::MorningMeeting => self.morning_meeting(),
            Operation::EndOfWorkReport => self.end_of_work_report(),
            Operation::CellReport => self.target_cell_report(),
            Operation::CreateTodayTemplate => self.create_today_template(),
            Operation::CreateNextDayTemplate => self.create_next_day_template(),
            Operation::ReloadRosterIds => self.reload_roster_ids(),
            Operation::InitTriggers => self.init_triggers(),
            Operation::PurgeTriggers => self.purge_triggers(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Resolves a calendar row relative to today.
    fn resolve_calendar(&self, day: DayOffset) -> EngineResult<Option<CalendarEntry>> {
        ShiftCalendar::new(self.store, &self.settings).resolve(self.today(), day)
    }

    /// The business-day gate every operation starts with.
    ///
    /// `Ok(None)` means today has no calendar row; the caller logs nothing
    /// further and returns successfully without doing any work.
    fn business_day(&self) -> EngineResult<Option<CalendarEntry>> {
        let entry = self.resolve_calendar(DayOffset::Today)?;
        if entry.is_none() {
            info!("not a business day; skipping");
        }
        Ok(entry)
    }
}
