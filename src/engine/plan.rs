//! Plan cell validation.

use tracing::info;

use crate::models::{PlanOutcome, TimesheetRow, Worker};

/// Classifies one worker's plan cell at their shift-start row.
///
/// The row comes from [`find_shift_start_row`](super::find_shift_start_row);
/// `None` means the cell could not be reached at all, which is logged
/// distinctly but notified the same way as a blank plan.
pub fn classify_plan(worker: &Worker, shift_start_row: Option<&TimesheetRow>) -> PlanOutcome {
    match shift_start_row {
        None => {
            info!(worker = %worker.name, "plan cell unreachable");
            PlanOutcome::Unreadable(worker.clone())
        }
        Some(row) if row.plan.is_empty() => {
            info!(worker = %worker.name, "plan cell is blank");
            PlanOutcome::Blank(worker.clone())
        }
        Some(_) => PlanOutcome::Valid,
    }
}
