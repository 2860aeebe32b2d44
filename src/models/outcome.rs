//! Evaluation outcomes.
//!
//! Outcomes are the business output of a reporting cycle, not failures.
//! They are produced transiently per evaluation, partitioned by kind, and
//! handed to the notifier; they are never persisted.

use serde::{Deserialize, Serialize};

use super::Worker;

/// Classification of one worker's report entries for the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportOutcome {
    /// Previous slot filled, current slot still blank.
    Success(Worker),
    /// The required field for the just-elapsed slot was never filled in.
    Omission(Worker),
    /// A not-yet-elapsed slot was filled in ahead of time.
    RuleViolation(Worker),
    /// The worker was not working at one of the two checkpoints; excluded
    /// from this cycle entirely, not flagged as an error.
    NotApplicable,
}

/// Classification of one worker's plan cell at their shift-start row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanOutcome {
    /// The plan cell holds text; excluded from error reporting.
    Valid,
    /// The plan cell is an empty string.
    Blank(Worker),
    /// The shift-start row could not be located at all. Logged distinctly,
    /// but notified the same as `Blank`.
    Unreadable(Worker),
}
