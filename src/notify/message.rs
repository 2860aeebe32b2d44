//! Message composition.
//!
//! Template bodies live as rows of the settings sheet so the people being
//! notified can edit the wording themselves. A template contains a single
//! `@` placeholder that is substituted with the composed body: one block
//! per worker (mention handle or plain name, then their timesheet link),
//! optionally grouped under header lines by a configured roster column.

use crate::error::{EngineError, EngineResult};
use crate::models::Worker;
use crate::settings::{Settings, KEY_COLUMN, SETTINGS_SHEET, VALUE_COLUMN};
use crate::sheets::TabularStore;

use super::notifier::{Notifier, RoomSelector};

/// Settings-sheet keys of the message templates.
pub mod template_keys {
    /// Successful report congratulation.
    pub const REPORT_SUCCESS: &str = "report_success_template";
    /// Omission error report.
    pub const REPORT_ERROR: &str = "report_error_template";
    /// Pre-filling rule violation report.
    pub const REPORT_VIOLATION: &str = "report_violation_template";
    /// Report fill-in request.
    pub const REPORT_REQUEST: &str = "report_request_template";
    /// Plan validation error report.
    pub const PLAN_ERROR: &str = "plan_error_template";
    /// Next-day plan fill-in request.
    pub const PLAN_REQUEST: &str = "plan_request_template";
    /// End-of-work summary.
    pub const END_OF_WORK: &str = "end_of_work_template";
    /// Morning meeting call.
    pub const MORNING: &str = "morning_template";
    /// Targeted cell broadcast.
    pub const CELL_REPORT: &str = "cell_report_template";
}

/// Whether worker lines lead with the chat mention or the plain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressStyle {
    /// Mention the worker so the chat pings them.
    Mention,
    /// Plain name; used for summaries nobody needs to act on.
    Name,
}

/// Composes and sends templated messages.
#[derive(Debug)]
pub struct MessageComposer<'a, S> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: TabularStore> MessageComposer<'a, S> {
    /// Creates a composer over the given store and settings.
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Fetches a template body from the settings sheet.
    pub fn template(&self, template_key: &str) -> EngineResult<String> {
        let record = self
            .store
            .find(SETTINGS_SHEET, KEY_COLUMN, template_key, 0, None)?
            .ok_or_else(|| EngineError::ConfigMissing {
                key: template_key.to_string(),
            })?;
        Ok(record.get(VALUE_COLUMN)?.to_string())
    }

    /// Builds the per-worker body, grouped when a sort key is configured.
    pub fn worker_list_body(&self, workers: &[Worker], style: AddressStyle) -> String {
        let line = |worker: &Worker| {
            let address = match style {
                AddressStyle::Mention => &worker.chat_handle,
                AddressStyle::Name => &worker.name,
            };
            format!("{address}\n{}\n\n", worker.sheet_url)
        };

        match &self.settings.report_sort_key {
            Some(sort_key) => {
                let marker = &self.settings.group_header_marker;
                let mut body = String::new();
                for (group, members) in crate::engine::group_by_attribute(workers, sort_key) {
                    body.push_str(&format!("{marker}{group}{marker}\n"));
                    for member in members {
                        body.push_str(&line(member));
                    }
                }
                body
            }
            None => workers.iter().map(line).collect(),
        }
    }

    /// Substitutes the body into the template and sends the message.
    ///
    /// The room is resolved through [`RoomSelector`], so test mode lands
    /// everything in the test room.
    pub fn send_worker_list<N: Notifier>(
        &self,
        notifier: &N,
        workers: &[Worker],
        template_key: &str,
        room_id: &str,
        style: AddressStyle,
    ) -> EngineResult<()> {
        let body = if workers.is_empty() {
            "No applicable members.".to_string()
        } else {
            self.worker_list_body(workers, style)
        };
        self.send_body(notifier, &body, template_key, room_id)
    }

    /// Substitutes an already-composed body into the template and sends.
    pub fn send_body<N: Notifier>(
        &self,
        notifier: &N,
        body: &str,
        template_key: &str,
        room_id: &str,
    ) -> EngineResult<()> {
        let template = self.template(template_key)?;
        let message = template.replacen('@', body, 1);
        let room = RoomSelector::new(self.settings).resolve(room_id);
        notifier.send(&message, room)
    }
}
