//! Aggregation - reduces child collections to roll-up figures.

use serde::Serialize;

use crate::domain::foundation::{Percent, Timestamp};
use crate::domain::target::Target;
use crate::domain::task::Task;

/// Roll-up of a task collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub done: usize,
    pub percentage: Percent,
}

impl TaskSummary {
    /// Reduces a task collection to `{total, done, percentage}`.
    ///
    /// The percentage is zero for an empty collection.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|t| t.state.is_done()).count();
        Self {
            total,
            done,
            percentage: Percent::from_counts(done, total),
        }
    }
}

/// The most recent completion date across a task collection, if any
/// task has been completed.
pub fn last_completion_date(tasks: &[Task]) -> Option<Timestamp> {
    tasks.iter().filter_map(|t| t.completion_date).max()
}

/// The most recent achieved date across a target ledger, if any entry
/// exists.
pub fn latest_achieved_date(targets: &[Target]) -> Option<Timestamp> {
    targets.iter().map(|t| t.achieved_date).max()
}
