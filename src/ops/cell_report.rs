//! Targeted cell broadcast.
//!
//! Reads a configured set of cells out of every worker's day tab and
//! broadcasts their contents to the cell-report room, maintaining a
//! per-worker entry count in the management sheet along the way. The
//! count columns are written first, then the cache is invalidated so the
//! broadcast body is composed from the refreshed counts.

use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{CalendarEntry, Worker};
use crate::notify::{template_keys, MessageComposer, Notifier};
use crate::schedule::{Clock, Scheduler};
use crate::settings::{CountMode, MANAGEMENT_SHEET};
use crate::sheets::{
    DriveStore, TabularStore, WorkerRoster, ENTRY_COUNT_COLUMN, NAME_COLUMN,
};

use super::Operations;

impl<S, D, N, Sch, C> Operations<'_, S, D, N, Sch, C>
where
    S: TabularStore,
    D: DriveStore,
    N: Notifier,
    Sch: Scheduler,
    C: Clock,
{
    /// Runs the cell broadcast for today.
    pub fn target_cell_report(&self) -> EngineResult<()> {
        let Some(calendar) = self.business_day()? else {
            return Ok(());
        };
        if self.settings.cell_report.targets.is_empty() {
            info!("no cell targets configured; nothing to broadcast");
            return Ok(());
        }

        let roster = WorkerRoster::new(self.store, &self.settings);
        let workers = roster.eligible_workers(&calendar)?;

        for worker in &workers {
            if let Err(error) = self.update_entry_count(worker, &calendar) {
                warn!(worker = %worker.name, %error, "entry count update failed; skipping");
            }
        }

        // The writes above went past the cache; drop it so the body below
        // sees the refreshed counts.
        self.store.invalidate();
        let workers = roster.eligible_workers(&calendar)?;

        let mut body = String::new();
        for worker in &workers {
            if let Err(error) = self.push_worker_block(&mut body, worker, &calendar) {
                warn!(worker = %worker.name, %error, "cell read failed; skipping");
            }
        }

        if body.is_empty() {
            info!("no readable cells; nothing to broadcast");
            return Ok(());
        }

        MessageComposer::new(self.store, &self.settings).send_body(
            self.notifier,
            &body,
            template_keys::CELL_REPORT,
            &self.settings.cell_report_room_id,
        )
    }

    /// Reads the configured target cells from one worker's day tab.
    fn target_cell_values(&self, worker: &Worker, date_label: &str) -> EngineResult<Vec<String>> {
        self.settings
            .cell_report
            .targets
            .iter()
            .map(|target| {
                let rows =
                    self.store
                        .read_grid(date_label, Some(&worker.sheet_id), target.row, 1)?;
                Ok(rows
                    .first()
                    .and_then(|row| row.get(target.column - 1))
                    .cloned()
                    .unwrap_or_default())
            })
            .collect()
    }

    /// A cell counts as blank when empty or on the invalid-text list.
    fn is_blank_entry(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || self
                .settings
                .cell_report
                .invalid_texts
                .iter()
                .any(|text| text == trimmed)
    }

    /// Recomputes and writes one worker's entry count.
    ///
    /// The write goes to the default spreadsheet and is NOT visible
    /// through the cache until the caller invalidates.
    fn update_entry_count(&self, worker: &Worker, calendar: &CalendarEntry) -> EngineResult<()> {
        if self.settings.cell_report.count_mode == CountMode::Off {
            return Ok(());
        }

        let values = self.target_cell_values(worker, &calendar.date_label)?;
        let mut count = worker.entry_count;
        for value in &values {
            match (self.settings.cell_report.count_mode, self.is_blank_entry(value)) {
                (CountMode::Cumulative, false) | (CountMode::Reset, false) => count += 1,
                (CountMode::Reset, true) => count = 0,
                _ => {}
            }
        }

        let Some(row) = self
            .store
            .row_number(MANAGEMENT_SHEET, NAME_COLUMN, &worker.name)?
        else {
            warn!(worker = %worker.name, "no management row for entry count");
            return Ok(());
        };
        let column = self.store.column_number(MANAGEMENT_SHEET, ENTRY_COUNT_COLUMN)?;
        self.store
            .write(MANAGEMENT_SHEET, row, column, &count.to_string())
    }

    /// Appends one worker's block to the broadcast body: their name (with
    /// the entry count when counting is on), their timesheet link, then
    /// each target's title and cell content.
    fn push_worker_block(
        &self,
        body: &mut String,
        worker: &Worker,
        calendar: &CalendarEntry,
    ) -> EngineResult<()> {
        let values = self.target_cell_values(worker, &calendar.date_label)?;

        if self.settings.cell_report.count_mode == CountMode::Off {
            body.push_str(&format!("{}\n", worker.name));
        } else {
            body.push_str(&format!(
                "{} (entries: {})\n",
                worker.name, worker.entry_count
            ));
        }
        body.push_str(&format!("{}\n", worker.sheet_url));

        for (target, value) in self.settings.cell_report.targets.iter().zip(&values) {
            body.push_str(&format!("{}\n", target.title));
            if self.is_blank_entry(value) {
                body.push_str("None noted.\n");
            } else {
                body.push_str(&format!("{}\n", value.trim()));
            }
        }
        body.push('\n');
        Ok(())
    }
}
