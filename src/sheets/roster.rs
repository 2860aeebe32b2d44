//! Worker roster with eligibility filtering.
//!
//! The member list (names, notify flags, chat handles, grouping columns)
//! lives in the member spreadsheet; the management sheet (timesheet file
//! ids, links, entry counts) lives in the default spreadsheet and is
//! refreshed by the roster-id reload operation. A worker must pass every
//! exclusion to take part in a cycle, and each exclusion is logged.

use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{CalendarEntry, ShiftAssignment, Worker};
use crate::settings::{Settings, MANAGEMENT_SHEET, MEMBER_SHEET};

use super::store::TabularStore;

/// Member/management name column header.
pub const NAME_COLUMN: &str = "name";
/// Member list notify-flag column header.
pub const NOTIFY_COLUMN: &str = "notify";
/// Member list chat-handle column header.
pub const CHAT_HANDLE_COLUMN: &str = "chat_handle";
/// Management sheet timesheet-file-id column header.
pub const SHEET_ID_COLUMN: &str = "spreadsheet_id";
/// Management sheet timesheet-link column header.
pub const SHEET_URL_COLUMN: &str = "sheet_url";
/// Management sheet entry-count column header.
pub const ENTRY_COUNT_COLUMN: &str = "entry_count";

/// Lists the workers eligible for notifications on a given day.
#[derive(Debug)]
pub struct WorkerRoster<'a, S> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: TabularStore> WorkerRoster<'a, S> {
    /// Creates a roster over the given store and settings.
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Returns every worker eligible for the day the calendar describes.
    ///
    /// Exclusions, in order: management row missing, not scheduled that
    /// day (holiday/blank/absent calendar cell), timesheet file id or link
    /// missing, notify flag not set. Excluded workers are logged and
    /// skipped; they never fail the cycle.
    pub fn eligible_workers(&self, calendar: &CalendarEntry) -> EngineResult<Vec<Worker>> {
        let members = self
            .store
            .get_all(MEMBER_SHEET, Some(&self.settings.member_sheet_id))?;
        let mut workers = Vec::new();

        for member in members {
            let name = member.get(NAME_COLUMN)?.to_string();

            let Some(management) = self.store.find(MANAGEMENT_SHEET, NAME_COLUMN, &name, 0, None)?
            else {
                warn!(worker = %name, "no management row; skipping");
                continue;
            };

            if let ShiftAssignment::Off = calendar.shift_for(&name, &self.settings.holiday_marker) {
                info!(worker = %name, day = %calendar.date_label, "not scheduled");
                continue;
            }

            let sheet_id = management.get(SHEET_ID_COLUMN)?;
            if sheet_id.is_empty() || sheet_id == "null" {
                warn!(worker = %name, "no timesheet file id; skipping");
                continue;
            }

            let sheet_url = management.get(SHEET_URL_COLUMN)?;
            if sheet_url.is_empty() || sheet_url == "null" {
                warn!(worker = %name, "no timesheet link; skipping");
                continue;
            }

            let notify = member.get(NOTIFY_COLUMN)?;
            if !notify.eq_ignore_ascii_case("true") {
                info!(worker = %name, "not opted into notifications");
                continue;
            }

            let chat_handle = member
                .try_get(CHAT_HANDLE_COLUMN)
                .filter(|handle| !handle.is_empty())
                .unwrap_or(&name)
                .to_string();
            let entry_count = management
                .get(ENTRY_COUNT_COLUMN)?
                .parse()
                .unwrap_or_default();

            workers.push(Worker {
                name,
                chat_handle,
                sheet_id: sheet_id.to_string(),
                sheet_url: sheet_url.to_string(),
                entry_count,
                notification_eligible: true,
                attributes: member.to_map(),
            });
        }

        Ok(workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{CachedStore, MemoryStore};
    use std::collections::HashMap;

    fn calendar(pairs: &[(&str, &str)]) -> CalendarEntry {
        let mut shifts = HashMap::new();
        for (name, shift) in pairs {
            shifts.insert(name.to_string(), shift.to_string());
        }
        CalendarEntry {
            date_label: "20240115".to_string(),
            shifts,
        }
    }

    fn store() -> CachedStore<MemoryStore> {
        let mut source = MemoryStore::new();
        source.insert(
            MEMBER_SHEET,
            Some("member-book"),
            vec![
                vec!["name".into(), "notify".into(), "chat_handle".into(), "team".into()],
                vec!["alice".into(), "TRUE".into(), "[To:1] alice".into(), "A".into()],
                vec!["bob".into(), "TRUE".into(), "[To:2] bob".into(), "B".into()],
                vec!["carol".into(), "FALSE".into(), "[To:3] carol".into(), "A".into()],
                vec!["dave".into(), "TRUE".into(), "[To:4] dave".into(), "B".into()],
                vec!["erin".into(), "TRUE".into(), "[To:5] erin".into(), "A".into()],
            ],
        );
        source.insert(
            MANAGEMENT_SHEET,
            None,
            vec![
                vec![
                    "name".into(),
                    "spreadsheet_id".into(),
                    "sheet_url".into(),
                    "entry_count".into(),
                ],
                vec!["alice".into(), "book-a".into(), "url-a".into(), "2".into()],
                vec!["bob".into(), "book-b".into(), "url-b".into(), "0".into()],
                vec!["carol".into(), "book-c".into(), "url-c".into(), "0".into()],
                vec!["dave".into(), "null".into(), "url-d".into(), "0".into()],
                // no row for erin
            ],
        );
        CachedStore::new(source)
    }

    #[test]
    fn test_applies_every_exclusion() {
        let settings = crate::test_support::settings();
        let store = store();
        let roster = WorkerRoster::new(&store, &settings);
        let calendar = calendar(&[
            ("alice", "09:00-18:00"),
            ("bob", "holiday"), // scheduled off
            ("carol", "09:00-18:00"), // notify FALSE
            ("dave", "09:00-18:00"),  // sheet id "null"
            ("erin", "09:00-18:00"),  // no management row
        ]);

        let workers = roster.eligible_workers(&calendar).unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].name, "alice");
        assert_eq!(workers[0].sheet_id, "book-a");
        assert_eq!(workers[0].entry_count, 2);
        assert_eq!(workers[0].attribute("team"), Some("A"));
    }

    #[test]
    fn test_worker_with_no_calendar_column_is_excluded() {
        let settings = crate::test_support::settings();
        let store = store();
        let roster = WorkerRoster::new(&store, &settings);
        let calendar = calendar(&[("bob", "09:00-18:00")]);

        let workers = roster.eligible_workers(&calendar).unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].name, "bob");
    }
}
