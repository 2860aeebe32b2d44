//! Plan validation operations.

use tracing::warn;

use crate::engine::{classify_plan, find_shift_start_row, parse_window};
use crate::error::EngineResult;
use crate::models::{PlanOutcome, ShiftAssignment};
use crate::notify::{template_keys, AddressStyle, MessageComposer, Notifier};
use crate::schedule::{Clock, Scheduler};
use crate::sheets::{DayOffset, DriveStore, TabularStore, TimesheetReader, WorkerRoster};

use super::Operations;

impl<S, D, N, Sch, C> Operations<'_, S, D, N, Sch, C>
where
    S: TabularStore,
    D: DriveStore,
    N: Notifier,
    Sch: Scheduler,
    C: Clock,
{
    /// Validates today's plan cells and reports blank or unreadable ones.
    pub fn check_today_plan(&self) -> EngineResult<()> {
        self.check_plans(DayOffset::Today)
    }

    /// Validates the next business day's plan cells.
    pub fn check_next_day_plan(&self) -> EngineResult<()> {
        self.check_plans(DayOffset::NextBusinessDay)
    }

    fn check_plans(&self, day: DayOffset) -> EngineResult<()> {
        if self.business_day()?.is_none() {
            return Ok(());
        }
        let Some(target) = self.resolve_calendar(day)? else {
            return Ok(());
        };

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&target)?;
        let reader = TimesheetReader::new(self.store, &self.settings);

        let mut flagged = Vec::new();
        for worker in &workers {
            let ShiftAssignment::Working(range_text) =
                target.shift_for(&worker.name, &self.settings.holiday_marker)
            else {
                continue;
            };

            let outcome = parse_window(&target.date_label, range_text).and_then(|shift| {
                let timesheet = reader.load(worker, &target.date_label)?;
                let start_row = find_shift_start_row(&shift, &timesheet)?;
                Ok(classify_plan(worker, start_row))
            });

            match outcome {
                Ok(PlanOutcome::Valid) => {}
                Ok(PlanOutcome::Blank(worker) | PlanOutcome::Unreadable(worker)) => {
                    flagged.push(worker);
                }
                Err(error) => {
                    warn!(worker = %worker.name, %error, "plan check failed; skipping");
                }
            }
        }

        if flagged.is_empty() {
            return Ok(());
        }

        MessageComposer::new(self.store, &self.settings).send_worker_list(
            self.notifier,
            &flagged,
            template_keys::PLAN_ERROR,
            &self.settings.worker_room_id,
            AddressStyle::Mention,
        )
    }

    /// Asks everyone on the next business day's roster to fill in their
    /// plans for that day.
    pub fn request_next_day_plan(&self) -> EngineResult<()> {
        if self.business_day()?.is_none() {
            return Ok(());
        }
        let Some(target) = self.resolve_calendar(DayOffset::NextBusinessDay)? else {
            return Ok(());
        };

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&target)?;
        if workers.is_empty() {
            return Ok(());
        }

        MessageComposer::new(self.store, &self.settings).send_worker_list(
            self.notifier,
            &workers,
            template_keys::PLAN_REQUEST,
            &self.settings.worker_room_id,
            AddressStyle::Mention,
        )
    }
}
