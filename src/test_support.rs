//! Shared fixtures for unit tests.

use std::collections::HashMap;

use crate::models::Worker;
use crate::settings::{CellReportSettings, CountMode, Settings};

/// A settings value with sensible defaults for unit tests.
pub(crate) fn settings() -> Settings {
    Settings {
        member_sheet_id: "member-book".to_string(),
        drive_directory_id: "dir-1".to_string(),
        file_name_prefix: "daily_".to_string(),
        calendar_key_column: "date".to_string(),
        holiday_marker: "holiday".to_string(),
        timesheet_start_row: 2,
        timesheet_row_count: 12,
        start_time_column: 1,
        end_time_column: 2,
        plan_column: 3,
        result_column: 4,
        worker_room_id: "room-w".to_string(),
        end_of_work_room_id: "room-e".to_string(),
        morning_room_id: "room-m".to_string(),
        cell_report_room_id: "room-c".to_string(),
        test_room_id: "room-t".to_string(),
        test_mode: false,
        group_header_marker: "*".to_string(),
        report_sort_key: None,
        report_check_times: Vec::new(),
        report_check_delay_minutes: 5,
        retry_enabled: false,
        report_retry_minutes: 15,
        end_of_work_time: None,
        template_create_time: None,
        check_today_plan_time: None,
        check_next_plan_time: None,
        request_next_plan_time: None,
        cell_report_time: None,
        morning_time: None,
        cell_report: CellReportSettings {
            targets: Vec::new(),
            count_mode: CountMode::Off,
            invalid_texts: Vec::new(),
        },
    }
}

/// A worker with the given name and team attribute.
pub(crate) fn worker(name: &str, team: &str) -> Worker {
    let mut attributes = HashMap::new();
    attributes.insert("name".to_string(), name.to_string());
    attributes.insert("team".to_string(), team.to_string());
    Worker {
        name: name.to_string(),
        chat_handle: format!("[To:0] {name}"),
        sheet_id: format!("sheet-{name}"),
        sheet_url: format!("https://example.test/{name}"),
        entry_count: 0,
        notification_eligible: true,
        attributes,
    }
}
