//! Report-cycle operations.

use chrono::Duration;
use tracing::{info, warn};

use crate::engine::{
    classify_report, epoch_ms, locate, parse_window, ReportPartitions, SlotOffset,
};
use crate::error::EngineResult;
use crate::models::{CalendarEntry, ReportOutcome, ShiftAssignment, Worker};
use crate::notify::{template_keys, AddressStyle, MessageComposer, Notifier};
use crate::schedule::{Clock, Operation, Scheduler};
use crate::sheets::{DriveStore, TabularStore, TimesheetReader, WorkerRoster};

use super::Operations;

impl<S, D, N, Sch, C> Operations<'_, S, D, N, Sch, C>
where
    S: TabularStore,
    D: DriveStore,
    N: Notifier,
    Sch: Scheduler,
    C: Clock,
{
    /// Full report cycle: refreshes the report triggers, evaluates every
    /// eligible worker, and broadcasts violations, omissions, and the
    /// success congratulation. When any error was found and retry is
    /// enabled, schedules one error-only re-check after the configured
    /// delay.
    pub fn report_check(&self) -> EngineResult<()> {
        self.run_report(true)
    }

    /// Error-only re-check: same evaluation, but never refreshes triggers,
    /// never congratulates, and never schedules another retry. Keeps a
    /// failed cycle from retrying forever.
    pub fn report_error_check_only(&self) -> EngineResult<()> {
        self.run_report(false)
    }

    fn run_report(&self, owns_success_broadcast: bool) -> EngineResult<()> {
        let Some(calendar) = self.business_day()? else {
            return Ok(());
        };

        if owns_success_broadcast {
            self.scheduler.cancel(Operation::RequestReportWrite)?;
            self.scheduler.cancel(Operation::ReportCheck)?;
            self.scheduler.cancel(Operation::ReportErrorCheckOnly)?;
            self.set_report_trigger()?;
        }

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&calendar)?;
        let now_ms = epoch_ms(self.clock.now());

        let mut outcomes = Vec::with_capacity(workers.len());
        for worker in &workers {
            match self.evaluate_worker(worker, &calendar, now_ms) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    warn!(worker = %worker.name, %error, "report evaluation failed; skipping");
                }
            }
        }

        let partitions = ReportPartitions::collect(outcomes);
        let composer = MessageComposer::new(self.store, &self.settings);
        let room = &self.settings.worker_room_id;

        if !partitions.violations.is_empty() {
            composer.send_worker_list(
                self.notifier,
                &partitions.violations,
                template_keys::REPORT_VIOLATION,
                room,
                AddressStyle::Mention,
            )?;
        }
        if !partitions.omissions.is_empty() {
            composer.send_worker_list(
                self.notifier,
                &partitions.omissions,
                template_keys::REPORT_ERROR,
                room,
                AddressStyle::Mention,
            )?;
        }
        if owns_success_broadcast && !partitions.success.is_empty() {
            composer.send_worker_list(
                self.notifier,
                &partitions.success,
                template_keys::REPORT_SUCCESS,
                room,
                AddressStyle::Mention,
            )?;
        }

        if partitions.has_errors() && owns_success_broadcast && self.settings.retry_enabled {
            let at = self.clock.now() + Duration::minutes(self.settings.report_retry_minutes);
            info!(%at, "errors found; scheduling one re-check");
            self.scheduler
                .schedule_at(Operation::ReportErrorCheckOnly, at)?;
        }

        Ok(())
    }

    /// Evaluates one worker: locate the previous and current slots within
    /// their declared shift, then classify.
    fn evaluate_worker(
        &self,
        worker: &Worker,
        calendar: &CalendarEntry,
        now_ms: i64,
    ) -> EngineResult<ReportOutcome> {
        let ShiftAssignment::Working(range_text) =
            calendar.shift_for(&worker.name, &self.settings.holiday_marker)
        else {
            // The roster already filtered unscheduled workers; a raced
            // calendar edit still must not flag anyone.
            return Ok(ReportOutcome::NotApplicable);
        };

        let shift = parse_window(&calendar.date_label, range_text)?;
        let timesheet =
            TimesheetReader::new(self.store, &self.settings).load(worker, &calendar.date_label)?;

        let previous = locate(&shift, &timesheet, now_ms, SlotOffset::Previous)?;
        let current = locate(&shift, &timesheet, now_ms, SlotOffset::Current)?;
        Ok(classify_report(worker, previous.row(), current.row()))
    }

    /// Asks every worker whose previous slot exists to fill it in now.
    pub fn request_report_write(&self) -> EngineResult<()> {
        let Some(calendar) = self.business_day()? else {
            return Ok(());
        };

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&calendar)?;
        let now_ms = epoch_ms(self.clock.now());
        let reader = TimesheetReader::new(self.store, &self.settings);

        let mut applicable = Vec::new();
        for worker in workers {
            let ShiftAssignment::Working(range_text) =
                calendar.shift_for(&worker.name, &self.settings.holiday_marker)
            else {
                continue;
            };
            let located = parse_window(&calendar.date_label, range_text)
                .and_then(|shift| {
                    let timesheet = reader.load(&worker, &calendar.date_label)?;
                    Ok(locate(&shift, &timesheet, now_ms, SlotOffset::Previous)?
                        .row()
                        .is_some())
                });
            match located {
                Ok(true) => applicable.push(worker),
                Ok(false) => {}
                Err(error) => {
                    warn!(worker = %worker.name, %error, "request lookup failed; skipping");
                }
            }
        }

        if applicable.is_empty() {
            info!("no worker has an elapsed slot; nothing to request");
            return Ok(());
        }

        MessageComposer::new(self.store, &self.settings).send_worker_list(
            self.notifier,
            &applicable,
            template_keys::REPORT_REQUEST,
            &self.settings.worker_room_id,
            AddressStyle::Mention,
        )
    }
}
