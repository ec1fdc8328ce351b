//! Progress engine - pure derivation rules.
//!
//! Three cooperating pieces, all free of I/O:
//!
//! - `aggregation` reduces task and target collections to counts,
//!   percentages, and latest-activity dates.
//! - `classifier` turns dates plus completion data into a lifecycle
//!   status (not started / in progress / completed / overdue).
//! - `allocation` validates and applies numeric target budgets across
//!   a tracker and its milestones.
//!
//! Every function takes its reference time as a parameter; callers own
//! the clock.

pub mod aggregation;
pub mod allocation;
pub mod classifier;

pub use aggregation::{last_completion_date, latest_achieved_date, TaskSummary};
pub use allocation::{
    apply_milestone_increment, apply_tracker_increment, create_milestone_budget,
    ensure_budget_allows, ensure_direct_increment_allowed, is_any_milestone_active,
    validate_milestone_range, MilestoneBudget, MilestoneProgress, TrackerProgress,
};
pub use classifier::{
    classify_milestone_status, classify_numeric_tracker_status, classify_task_status,
};
