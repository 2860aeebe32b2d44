//! Typed settings loaded from the key-value sheet.
//!
//! The settings sheet is a plain string table (columns `key`, `value`)
//! edited by hand in the spreadsheet, so every value is parsed into its
//! typed field here, once per operation. A missing key is
//! [`EngineError::ConfigMissing`]; a value that will not parse is
//! [`EngineError::ConfigInvalid`]. Message template bodies live as rows in
//! the same sheet and are fetched by key at send time, not here.

use chrono::NaiveTime;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::sheets::TabularStore;

/// The key-value settings sheet, in the default (management) spreadsheet.
pub const SETTINGS_SHEET: &str = "settings";
/// The settings sheet's key column header.
pub const KEY_COLUMN: &str = "key";
/// The settings sheet's value column header.
pub const VALUE_COLUMN: &str = "value";

/// The calendar sheet, in the member spreadsheet.
pub const CALENDAR_SHEET: &str = "calendar";
/// The member list sheet, in the member spreadsheet.
pub const MEMBER_SHEET: &str = "members";
/// The member management sheet, in the default spreadsheet.
pub const MANAGEMENT_SHEET: &str = "member_management";
/// The master timesheet tab copied into each worker's file per day.
pub const TEMPLATE_SHEET: &str = "template";

/// How the cell broadcast maintains each worker's entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Do not count at all.
    Off,
    /// Increment for every non-empty entry, never reset.
    Cumulative,
    /// Increment for non-empty entries, reset to zero on empty ones.
    Reset,
}

/// One cell read by the targeted cell broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CellTarget {
    /// 1-based sheet row.
    pub row: usize,
    /// 1-based sheet column.
    pub column: usize,
    /// Heading printed above the cell's content in the broadcast.
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct CellTargetList {
    output: Vec<CellTarget>,
}

/// Cell-broadcast configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReportSettings {
    /// The cells to read from each worker's day sheet.
    pub targets: Vec<CellTarget>,
    /// Entry-count maintenance mode.
    pub count_mode: CountMode,
    /// Cell texts treated the same as an empty cell.
    pub invalid_texts: Vec<String>,
}

/// All typed configuration for one operation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Store id of the spreadsheet holding the member list and calendar.
    pub member_sheet_id: String,
    /// Drive directory holding the per-worker timesheet files.
    pub drive_directory_id: String,
    /// File name prefix for per-worker timesheet files.
    pub file_name_prefix: String,
    /// Header of the calendar's date-label column.
    pub calendar_key_column: String,
    /// Calendar cell text meaning "not scheduled".
    pub holiday_marker: String,
    /// First sheet row of the timesheet slot table (1-based).
    pub timesheet_start_row: usize,
    /// Number of slot rows in the timesheet template.
    pub timesheet_row_count: usize,
    /// 1-based column of the slot start-time cell.
    pub start_time_column: usize,
    /// 1-based column of the slot end-time cell.
    pub end_time_column: usize,
    /// 1-based column of the plan cell.
    pub plan_column: usize,
    /// 1-based column of the work-result cell.
    pub result_column: usize,
    /// Room for worker-facing report and plan messages.
    pub worker_room_id: String,
    /// Room for the end-of-work report.
    pub end_of_work_room_id: String,
    /// Room for the morning meeting message.
    pub morning_room_id: String,
    /// Room for the targeted cell broadcast.
    pub cell_report_room_id: String,
    /// Room every message is rerouted to while test mode is on.
    pub test_room_id: String,
    /// Whether test mode is on.
    pub test_mode: bool,
    /// Marker wrapped around group header lines.
    pub group_header_marker: String,
    /// Roster column used to group message bodies; `None` = roster order.
    pub report_sort_key: Option<String>,
    /// Times of day the report-write request fires.
    pub report_check_times: Vec<NaiveTime>,
    /// Minutes after each request time the report check fires.
    pub report_check_delay_minutes: i64,
    /// Whether a failed check schedules a delayed re-check.
    pub retry_enabled: bool,
    /// Minutes to wait before the error-only re-check.
    pub report_retry_minutes: i64,
    /// One-shot trigger times; `None` disables the operation.
    pub end_of_work_time: Option<NaiveTime>,
    /// Time the next-day timesheet template is created.
    pub template_create_time: Option<NaiveTime>,
    /// Time today's plan cells are checked.
    pub check_today_plan_time: Option<NaiveTime>,
    /// Time the next business day's plan cells are checked.
    pub check_next_plan_time: Option<NaiveTime>,
    /// Time the next-day plan request is sent.
    pub request_next_plan_time: Option<NaiveTime>,
    /// Time the cell broadcast fires.
    pub cell_report_time: Option<NaiveTime>,
    /// Time the morning meeting message fires.
    pub morning_time: Option<NaiveTime>,
    /// Cell-broadcast configuration.
    pub cell_report: CellReportSettings,
}

impl Settings {
    /// Loads and parses every setting from the settings sheet.
    pub fn load<S: TabularStore>(store: &S) -> EngineResult<Self> {
        let loader = Loader { store };

        Ok(Self {
            member_sheet_id: loader.required("member_spreadsheet_id")?,
            drive_directory_id: loader.required("drive_directory_id")?,
            file_name_prefix: loader.required("file_name_prefix")?,
            calendar_key_column: loader.required("calendar_key_column")?,
            holiday_marker: loader.required("holiday_marker")?,
            timesheet_start_row: loader.number("timesheet_start_row")?,
            timesheet_row_count: loader.number("timesheet_row_count")?,
            start_time_column: loader.number("start_time_column")?,
            end_time_column: loader.number("end_time_column")?,
            plan_column: loader.number("plan_column")?,
            result_column: loader.number("result_column")?,
            worker_room_id: loader.required("worker_room_id")?,
            end_of_work_room_id: loader.required("end_of_work_room_id")?,
            morning_room_id: loader.required("morning_room_id")?,
            cell_report_room_id: loader.required("cell_report_room_id")?,
            test_room_id: loader.required("test_room_id")?,
            test_mode: loader.flag("test_mode")?,
            group_header_marker: loader.required("group_header_marker")?,
            report_sort_key: loader.optional("report_sort_key")?,
            report_check_times: loader.time_list("report_check_times")?,
            report_check_delay_minutes: loader.minutes("report_check_delay_minutes")?,
            retry_enabled: loader.flag("retry_enabled")?,
            report_retry_minutes: loader.minutes("report_retry_minutes")?,
            end_of_work_time: loader.optional_time("end_of_work_time")?,
            template_create_time: loader.optional_time("template_create_time")?,
            check_today_plan_time: loader.optional_time("check_today_plan_time")?,
            check_next_plan_time: loader.optional_time("check_next_plan_time")?,
            request_next_plan_time: loader.optional_time("request_next_plan_time")?,
            cell_report_time: loader.optional_time("cell_report_time")?,
            morning_time: loader.optional_time("morning_time")?,
            cell_report: loader.cell_report()?,
        })
    }
}

struct Loader<'a, S> {
    store: &'a S,
}

impl<S: TabularStore> Loader<'_, S> {
    fn raw(&self, key: &str) -> EngineResult<Option<String>> {
        let record = self
            .store
            .find(SETTINGS_SHEET, KEY_COLUMN, key, 0, None)?;
        match record {
            Some(record) => Ok(Some(record.get(VALUE_COLUMN)?.to_string())),
            None => Ok(None),
        }
    }

    fn required(&self, key: &str) -> EngineResult<String> {
        self.raw(key)?.ok_or_else(|| EngineError::ConfigMissing {
            key: key.to_string(),
        })
    }

    /// A key whose row may be absent or whose value may be blank/"null".
    fn optional(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self
            .raw(key)?
            .filter(|value| !value.is_empty() && value.as_str() != "null"))
    }

    fn number(&self, key: &str) -> EngineResult<usize> {
        let value = self.required(key)?;
        value.parse().map_err(|_| EngineError::ConfigInvalid {
            key: key.to_string(),
            message: format!("'{value}' is not a number"),
        })
    }

    fn minutes(&self, key: &str) -> EngineResult<i64> {
        let value = self.required(key)?;
        value.parse().map_err(|_| EngineError::ConfigInvalid {
            key: key.to_string(),
            message: format!("'{value}' is not a number of minutes"),
        })
    }

    fn flag(&self, key: &str) -> EngineResult<bool> {
        let value = self.required(key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" | "null" => Ok(false),
            _ => Err(EngineError::ConfigInvalid {
                key: key.to_string(),
                message: format!("'{value}' is not a boolean"),
            }),
        }
    }

    fn parse_time(&self, key: &str, value: &str) -> EngineResult<NaiveTime> {
        NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| EngineError::ConfigInvalid {
            key: key.to_string(),
            message: format!("'{value}' is not an HH:MM time"),
        })
    }

    fn optional_time(&self, key: &str) -> EngineResult<Option<NaiveTime>> {
        match self.optional(key)? {
            Some(value) => Ok(Some(self.parse_time(key, &value)?)),
            None => Ok(None),
        }
    }

    fn time_list(&self, key: &str) -> EngineResult<Vec<NaiveTime>> {
        let value = self.required(key)?;
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| self.parse_time(key, part))
            .collect()
    }

    fn cell_report(&self) -> EngineResult<CellReportSettings> {
        let targets = match self.optional("cell_report_targets")? {
            Some(json) => {
                let list: CellTargetList =
                    serde_json::from_str(&json).map_err(|e| EngineError::ConfigInvalid {
                        key: "cell_report_targets".to_string(),
                        message: e.to_string(),
                    })?;
                list.output
            }
            None => Vec::new(),
        };

        let count_mode = match self.optional("cell_report_count_mode")?.as_deref() {
            None | Some("off") => CountMode::Off,
            Some("cumulative") => CountMode::Cumulative,
            Some("reset") => CountMode::Reset,
            Some(other) => {
                return Err(EngineError::ConfigInvalid {
                    key: "cell_report_count_mode".to_string(),
                    message: format!("'{other}' is not off|cumulative|reset"),
                })
            }
        };

        let invalid_texts = self
            .optional("cell_report_invalid_texts")?
            .map(|value| {
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(CellReportSettings {
            targets,
            count_mode,
            invalid_texts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{CachedStore, MemoryStore};

    fn base_rows() -> Vec<(&'static str, &'static str)> {
        vec![
            ("member_spreadsheet_id", "member-book"),
            ("drive_directory_id", "dir-1"),
            ("file_name_prefix", "daily_"),
            ("calendar_key_column", "date"),
            ("holiday_marker", "holiday"),
            ("timesheet_start_row", "3"),
            ("timesheet_row_count", "12"),
            ("start_time_column", "1"),
            ("end_time_column", "3"),
            ("plan_column", "4"),
            ("result_column", "5"),
            ("worker_room_id", "room-w"),
            ("end_of_work_room_id", "room-e"),
            ("morning_room_id", "room-m"),
            ("cell_report_room_id", "room-c"),
            ("test_room_id", "room-t"),
            ("test_mode", "false"),
            ("group_header_marker", "*"),
            ("report_sort_key", "team"),
            ("report_check_times", "10:00,11:00"),
            ("report_check_delay_minutes", "5"),
            ("retry_enabled", "true"),
            ("report_retry_minutes", "15"),
            ("end_of_work_time", "18:30"),
            ("template_create_time", "null"),
            ("check_today_plan_time", ""),
            ("check_next_plan_time", "17:00"),
            ("request_next_plan_time", "16:00"),
            ("cell_report_time", "null"),
            ("morning_time", "08:55"),
            (
                "cell_report_targets",
                r#"{"output":[{"row":2,"column":7,"title":"Highlight"}]}"#,
            ),
            ("cell_report_count_mode", "reset"),
            ("cell_report_invalid_texts", "n/a,none"),
        ]
    }

    fn store_with(rows: Vec<(&str, &str)>) -> CachedStore<MemoryStore> {
        let mut grid = vec![vec!["key".to_string(), "value".to_string()]];
        for (key, value) in rows {
            grid.push(vec![key.to_string(), value.to_string()]);
        }
        let mut source = MemoryStore::new();
        source.insert(SETTINGS_SHEET, None, grid);
        CachedStore::new(source)
    }

    #[test]
    fn test_loads_every_typed_field() {
        let settings = Settings::load(&store_with(base_rows())).unwrap();

        assert_eq!(settings.member_sheet_id, "member-book");
        assert_eq!(settings.result_column, 5);
        assert_eq!(settings.report_sort_key.as_deref(), Some("team"));
        assert_eq!(settings.report_check_times.len(), 2);
        assert_eq!(settings.report_check_delay_minutes, 5);
        assert!(settings.retry_enabled);
        assert_eq!(
            settings.end_of_work_time,
            Some(NaiveTime::from_hms_opt(18, 30, 0).unwrap())
        );
        assert_eq!(settings.template_create_time, None);
        assert_eq!(settings.check_today_plan_time, None);
        assert_eq!(settings.cell_report.count_mode, CountMode::Reset);
        assert_eq!(settings.cell_report.targets.len(), 1);
        assert_eq!(settings.cell_report.targets[0].column, 7);
        assert_eq!(settings.cell_report.invalid_texts, vec!["n/a", "none"]);
    }

    #[test]
    fn test_missing_required_key_is_config_missing() {
        let rows: Vec<_> = base_rows()
            .into_iter()
            .filter(|(key, _)| *key != "worker_room_id")
            .collect();
        let error = Settings::load(&store_with(rows)).unwrap_err();
        assert!(matches!(error, EngineError::ConfigMissing { key } if key == "worker_room_id"));
    }

    #[test]
    fn test_unparseable_number_is_config_invalid() {
        let rows: Vec<_> = base_rows()
            .into_iter()
            .map(|(key, value)| {
                if key == "result_column" {
                    (key, "five")
                } else {
                    (key, value)
                }
            })
            .collect();
        assert!(matches!(
            Settings::load(&store_with(rows)),
            Err(EngineError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_blank_sort_key_means_roster_order() {
        let rows: Vec<_> = base_rows()
            .into_iter()
            .map(|(key, value)| {
                if key == "report_sort_key" {
                    (key, "")
                } else {
                    (key, value)
                }
            })
            .collect();
        let settings = Settings::load(&store_with(rows)).unwrap();
        assert_eq!(settings.report_sort_key, None);
    }

    #[test]
    fn test_bad_cell_target_json_is_config_invalid() {
        let rows: Vec<_> = base_rows()
            .into_iter()
            .map(|(key, value)| {
                if key == "cell_report_targets" {
                    (key, "not-json")
                } else {
                    (key, value)
                }
            })
            .collect();
        assert!(matches!(
            Settings::load(&store_with(rows)),
            Err(EngineError::ConfigInvalid { .. })
        ));
    }
}
