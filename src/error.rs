//! Error types for the Attendance Reporting Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a reporting cycle.
//!
//! Lookup misses (a calendar day or timesheet row that simply is not there)
//! are NOT errors; they are represented as `Option`/miss variants and make
//! the caller skip work. The variants here cover malformed data and broken
//! configuration, which do abort the affected scope.

use thiserror::Error;

/// The main error type for the Attendance Reporting Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::SheetNotFound {
///     sheet: "calendar".to_string(),
/// };
/// assert_eq!(error.to_string(), "Sheet not found: calendar");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A sheet with the given name does not exist in the backing store.
    #[error("Sheet not found: {sheet}")]
    SheetNotFound {
        /// The sheet name that was not found.
        sheet: String,
    },

    /// A column name was not present in a sheet's header row.
    ///
    /// Column names come from configuration, so this signals a
    /// configuration error rather than bad row data.
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound {
        /// The sheet whose header was searched.
        sheet: String,
        /// The column name that was not found.
        column: String,
    },

    /// A time range string did not have the `HH:MM-HH:MM` shape.
    #[error("Invalid time range '{text}': {message}")]
    InvalidTimeRange {
        /// The offending range text.
        text: String,
        /// A description of what was malformed.
        message: String,
    },

    /// A date label was not an 8-digit `YYYYMMDD` string.
    #[error("Invalid date label '{label}'")]
    InvalidDateLabel {
        /// The offending date label.
        label: String,
    },

    /// A required settings key was missing from the settings sheet.
    #[error("Missing settings key: {key}")]
    ConfigMissing {
        /// The key that was not found.
        key: String,
    },

    /// A settings value could not be parsed into its expected type.
    #[error("Invalid settings value for '{key}': {message}")]
    ConfigInvalid {
        /// The key whose value failed to parse.
        key: String,
        /// A description of the parse failure.
        message: String,
    },

    /// The backing store rejected a write.
    #[error("Failed to write to sheet '{sheet}': {message}")]
    WriteFailed {
        /// The sheet the write targeted.
        sheet: String,
        /// A description of the failure.
        message: String,
    },

    /// The scheduler collaborator rejected a trigger request.
    #[error("Scheduler error: {message}")]
    SchedulerError {
        /// A description of the failure.
        message: String,
    },

    /// The notifier collaborator failed to send a message.
    #[error("Notification failed for room '{room}': {message}")]
    NotifyFailed {
        /// The target room id.
        room: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
