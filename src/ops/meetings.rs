//! Morning meeting and end-of-work operations.

use tracing::{info, warn};

use crate::engine::{epoch_ms, locate, parse_window, SlotOffset};
use crate::error::EngineResult;
use crate::models::ShiftAssignment;
use crate::notify::{template_keys, AddressStyle, MessageComposer, Notifier};
use crate::schedule::{Clock, Scheduler};
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
    /// Calls workers who are on shift right now to the morning meeting.
    pub fn morning_meeting(&self) -> EngineResult<()> {
        let Some(calendar) = self.business_day()? else {
            return Ok(());
        };

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&calendar)?;
        let now_ms = epoch_ms(self.clock.now());
        let reader = TimesheetReader::new(self.store, &self.settings);

        let mut on_shift = Vec::new();
        for worker in workers {
            let ShiftAssignment::Working(range_text) =
                calendar.shift_for(&worker.name, &self.settings.holiday_marker)
            else {
                continue;
            };
            let located = parse_window(&calendar.date_label, range_text).and_then(|shift| {
                let timesheet = reader.load(&worker, &calendar.date_label)?;
                Ok(locate(&shift, &timesheet, now_ms, SlotOffset::Current)?
                    .row()
                    .is_some())
            });
            match located {
                Ok(true) => on_shift.push(worker),
                Ok(false) => {}
                Err(error) => {
                    warn!(worker = %worker.name, %error, "morning lookup failed; skipping");
                }
            }
        }

        if on_shift.is_empty() {
            info!("nobody is on shift; no morning call");
            return Ok(());
        }

        MessageComposer::new(self.store, &self.settings).send_worker_list(
            self.notifier,
            &on_shift,
            template_keys::MORNING,
            &self.settings.morning_room_id,
            AddressStyle::Mention,
        )
    }

    /// Sends the end-of-work summary for every eligible worker.
    ///
    /// Plain names, not mentions: nobody needs to act on the summary, so
    /// it must not ping the whole roster.
    pub fn end_of_work_report(&self) -> EngineResult<()> {
        let Some(calendar) = self.business_day()? else {
            return Ok(());
        };

        let workers = WorkerRoster::new(self.store, &self.settings).eligible_workers(&calendar)?;

        MessageComposer::new(self.store, &self.settings).send_worker_list(
            self.notifier,
            &workers,
            template_keys::END_OF_WORK,
            &self.settings.end_of_work_room_id,
            AddressStyle::Name,
        )
    }
}
