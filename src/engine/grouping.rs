//! Outcome partitioning and roster grouping.

use crate::models::{ReportOutcome, Worker};

/// Report outcomes partitioned by kind, in roster order.
///
/// Empty partitions are never sent to the notifier.
#[derive(Debug, Default, Clone)]
pub struct ReportPartitions {
    /// Workers whose previous slot was filled and current slot blank.
    pub success: Vec<Worker>,
    /// Workers who never filled in the just-elapsed slot.
    pub omissions: Vec<Worker>,
    /// Workers who pre-filled the currently open slot.
    pub violations: Vec<Worker>,
}

impl ReportPartitions {
    /// Partitions a stream of outcomes, dropping `NotApplicable`.
    pub fn collect<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ReportOutcome>,
    {
        let mut partitions = Self::default();
        for outcome in outcomes {
            match outcome {
                ReportOutcome::Success(worker) => partitions.success.push(worker),
                ReportOutcome::Omission(worker) => partitions.omissions.push(worker),
                ReportOutcome::RuleViolation(worker) => partitions.violations.push(worker),
                ReportOutcome::NotApplicable => {}
            }
        }
        partitions
    }

    /// Whether any omission or rule violation was found this cycle.
    pub fn has_errors(&self) -> bool {
        !self.omissions.is_empty() || !self.violations.is_empty()
    }
}

/// Groups workers by the value of a roster column, stably.
///
/// Groups appear in first-seen order, and workers keep their roster order
/// within each group. A worker whose roster row lacks the column lands in
/// an unnamed group (empty key) rather than being dropped.
pub fn group_by_attribute<'a>(workers: &'a [Worker], column: &str) -> Vec<(String, Vec<&'a Worker>)> {
    let mut groups: Vec<(String, Vec<&'a Worker>)> = Vec::new();

    for worker in workers {
        let key = worker.attribute(column).unwrap_or_default();
        match groups.iter_mut().find(|(name, _)| name.as_str() == key) {
            Some((_, members)) => members.push(worker),
            None => groups.push((key.to_string(), vec![worker])),
        }
    }

    groups
}
