//! Attendance Reporting Engine for worker timesheets.
//!
//! This crate validates that workers filled in the required fields of their
//! per-day timesheets within the expected time windows, and routes the
//! results (success, omission, rule violation, plan errors) to a chat
//! notifier. Spreadsheet access, message transmission, file copying, and
//! trigger registration all sit behind narrow traits.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod ops;
pub mod schedule;
pub mod settings;
pub mod sheets;

#[cfg(test)]
pub(crate) mod test_support;
