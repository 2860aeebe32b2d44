//! Report classification state machine.
//!
//! A reporting check runs periodically. The slot that just closed must be
//! retrospectively filled in, and the slot that is open now must still be
//! blank — filling a slot before its time arrives indicates a copy script
//! or fraud and is reported separately from a simple omission.

use crate::models::{ReportOutcome, TimesheetRow, Worker};

/// Classifies one worker's result cells for the current cycle.
///
/// Precedence order matters and is fixed:
///
/// 1. No previous slot → [`ReportOutcome::NotApplicable`]
/// 2. No current slot → [`ReportOutcome::NotApplicable`]
/// 3. Previous result blank → [`ReportOutcome::Omission`]
/// 4. Current result non-blank → [`ReportOutcome::RuleViolation`]
/// 5. Otherwise → [`ReportOutcome::Success`]
///
/// A worker with a blank previous slot AND a pre-filled current slot is an
/// omission: the earlier check wins.
pub fn classify_report(
    worker: &Worker,
    previous: Option<&TimesheetRow>,
    current: Option<&TimesheetRow>,
) -> ReportOutcome {
    let Some(previous) = previous else {
        return ReportOutcome::NotApplicable;
    };
    let Some(current) = current else {
        return ReportOutcome::NotApplicable;
    };

    if previous.result.is_empty() {
        ReportOutcome::Omission(worker.clone())
    } else if !current.result.is_empty() {
        ReportOutcome::RuleViolation(worker.clone())
    } else {
        ReportOutcome::Success(worker.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn worker() -> Worker {
        Worker {
            name: "alice".to_string(),
            chat_handle: "[To:1] alice".to_string(),
            sheet_id: "sheet-1".to_string(),
            sheet_url: "https://example.test/sheet-1".to_string(),
            entry_count: 0,
            notification_eligible: true,
            attributes: HashMap::new(),
        }
    }

    fn row(result: &str) -> TimesheetRow {
        TimesheetRow {
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            plan: String::new(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_previous_filled_current_blank_is_success() {
        let outcome = classify_report(&worker(), Some(&row("did X")), Some(&row("")));
        assert!(matches!(outcome, ReportOutcome::Success(_)));
    }

    #[test]
    fn test_previous_blank_is_omission() {
        let outcome = classify_report(&worker(), Some(&row("")), Some(&row("")));
        assert!(matches!(outcome, ReportOutcome::Omission(_)));
    }

    #[test]
    fn test_current_prefilled_is_rule_violation() {
        let outcome = classify_report(&worker(), Some(&row("did X")), Some(&row("did Y")));
        assert!(matches!(outcome, ReportOutcome::RuleViolation(_)));
    }

    #[test]
    fn test_missing_previous_slot_is_not_applicable() {
        let outcome = classify_report(&worker(), None, Some(&row("did Y")));
        assert_eq!(outcome, ReportOutcome::NotApplicable);
    }

    #[test]
    fn test_missing_current_slot_is_not_applicable() {
        let outcome = classify_report(&worker(), Some(&row("did X")), None);
        assert_eq!(outcome, ReportOutcome::NotApplicable);
    }

    /// Precedence: a blank previous slot wins over a pre-filled current
    /// slot; the worker is reported as an omission, not a violation.
    #[test]
    fn test_omission_takes_precedence_over_violation() {
        let outcome = classify_report(&worker(), Some(&row("")), Some(&row("did Y")));
        assert!(matches!(outcome, ReportOutcome::Omission(_)));
    }
}
