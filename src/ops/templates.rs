//! Timesheet file maintenance: day-tab creation and roster id reload.

use tracing::{info, warn};

use crate::error::EngineResult;
use crate::notify::Notifier;
use crate::schedule::{Clock, Scheduler};
use crate::settings::{MANAGEMENT_SHEET, MEMBER_SHEET, TEMPLATE_SHEET};
use crate::sheets::{
    DayOffset, DriveStore, TabularStore, NAME_COLUMN, SHEET_ID_COLUMN, SHEET_URL_COLUMN,
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
    /// Creates today's timesheet tab in every worker file.
    pub fn create_today_template(&self) -> EngineResult<()> {
        self.create_template(DayOffset::Today)
    }

    /// Creates the next business day's timesheet tab in every worker file.
    pub fn create_next_day_template(&self) -> EngineResult<()> {
        self.create_template(DayOffset::NextBusinessDay)
    }

    fn create_template(&self, day: DayOffset) -> EngineResult<()> {
        if self.business_day()?.is_none() {
            return Ok(());
        }
        let Some(target) = self.resolve_calendar(day)? else {
            return Ok(());
        };

        info!(day = %target.date_label, "creating timesheet tabs");
        self.drive.copy_template(
            &self.settings.drive_directory_id,
            TEMPLATE_SHEET,
            &target.date_label,
        )
    }

    /// Rewrites the management sheet's file id and link columns from the
    /// drive directory, one row per member, then invalidates the cache.
    ///
    /// A member whose file is missing gets literal `null` cells; the
    /// roster's eligibility filter excludes them until the file exists.
    pub fn reload_roster_ids(&self) -> EngineResult<()> {
        let members = self
            .store
            .get_all(MEMBER_SHEET, Some(&self.settings.member_sheet_id))?;

        let name_column = self.store.column_number(MANAGEMENT_SHEET, NAME_COLUMN)?;
        let id_column = self.store.column_number(MANAGEMENT_SHEET, SHEET_ID_COLUMN)?;
        let url_column = self.store.column_number(MANAGEMENT_SHEET, SHEET_URL_COLUMN)?;

        // Row 1 is the header; members are written in list order below it.
        let mut row = 2;
        for member in members {
            let name = member.get(NAME_COLUMN)?.to_string();
            let file_name = format!("{}{}", self.settings.file_name_prefix, name);

            let file_id = self
                .drive
                .file_id(&self.settings.drive_directory_id, &file_name)?;
            let file_url = self
                .drive
                .file_url(&self.settings.drive_directory_id, &file_name)?;
            if file_id.is_none() {
                warn!(member = %name, file = %file_name, "no timesheet file in drive");
            }

            self.store
                .write(MANAGEMENT_SHEET, row, name_column, &name)?;
            self.store.write(
                MANAGEMENT_SHEET,
                row,
                id_column,
                file_id.as_deref().unwrap_or("null"),
            )?;
            self.store.write(
                MANAGEMENT_SHEET,
                row,
                url_column,
                file_url.as_deref().unwrap_or("null"),
            )?;
            row += 1;
        }

        self.store.invalidate();
        Ok(())
    }
}
