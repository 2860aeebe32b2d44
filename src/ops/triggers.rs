//! Trigger registration.
//!
//! The host grants a limited trigger quota, so report check times are
//! capped at two request/check pairs per refresh, and only times still in
//! the future are registered. The daily self-reset at hour zero re-runs
//! the whole registration for the new day.

use chrono::Duration;
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::notify::Notifier;
use crate::schedule::{Clock, Operation, Scheduler};
use crate::sheets::{DriveStore, TabularStore};

use super::Operations;

/// Host trigger quota allows at most this many pending request/check pairs.
const MAX_REPORT_PAIRS: usize = 2;

impl<S, D, N, Sch, C> Operations<'_, S, D, N, Sch, C>
where
    S: TabularStore,
    D: DriveStore,
    N: Notifier,
    Sch: Scheduler,
    C: Clock,
{
    /// Registers the next report request/check pairs.
    ///
    /// Walks the configured check times in order, skipping those already
    /// past, and schedules the request at the time itself and the check
    /// after the configured delay. Stops at the pair cap; the check that
    /// fires from each pair re-runs this registration, so later times get
    /// their turn.
    pub fn set_report_trigger(&self) -> EngineResult<()> {
        let now = self.clock.now();
        let mut pairs = 0;

        for time in &self.settings.report_check_times {
            if pairs >= MAX_REPORT_PAIRS {
                break;
            }
            let request_at = now.date().and_time(*time);
            if request_at < now {
                continue;
            }

            self.scheduler
                .schedule_at(Operation::RequestReportWrite, request_at)?;
            self.scheduler.schedule_at(
                Operation::ReportCheck,
                request_at + Duration::minutes(self.settings.report_check_delay_minutes),
            )?;
            pairs += 1;
        }

        if pairs == 0 {
            info!("no report check times remain today");
        }
        Ok(())
    }

    /// Resets every trigger for the coming day.
    ///
    /// Cancels everything, reschedules the daily self-reset, registers the
    /// report pairs, and registers each configured one-shot operation
    /// whose time is set and still ahead of now.
    pub fn init_triggers(&self) -> EngineResult<()> {
        self.scheduler.cancel_all()?;
        self.scheduler.schedule_daily(Operation::InitTriggers, 0)?;
        self.set_report_trigger()?;

        let now = self.clock.now();
        let one_shots = [
            (self.settings.end_of_work_time, Operation::EndOfWorkReport),
            (
                self.settings.template_create_time,
                Operation::CreateNextDayTemplate,
            ),
            (self.settings.check_today_plan_time, Operation::CheckTodayPlan),
            (
                self.settings.check_next_plan_time,
                Operation::CheckNextDayPlan,
            ),
            (
                self.settings.request_next_plan_time,
                Operation::RequestNextDayPlan,
            ),
            (self.settings.cell_report_time, Operation::CellReport),
            (self.settings.morning_time, Operation::MorningMeeting),
        ];

        for (time, operation) in one_shots {
            let Some(time) = time else {
                continue;
            };
            let at = now.date().and_time(time);
            if at < now {
                warn!(operation = operation.name(), %at, "time already past; not scheduled");
                continue;
            }
            self.scheduler.schedule_at(operation, at)?;
        }

        Ok(())
    }

    /// Cancels every pending trigger.
    pub fn purge_triggers(&self) -> EngineResult<()> {
        self.scheduler.cancel_all()
    }
}
