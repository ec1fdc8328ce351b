//! Status classifier - ordered lifecycle rules with last-match-wins.
//!
//! Each classifier evaluates a fixed rule list in full. Every rule that
//! matches overwrites the tentative result, so the final status is the
//! outcome of the *last* matching rule. This ordering is a compatibility
//! contract: overlapping-rule inputs are resolved by position, not by
//! specificity, and tests pin several such overlaps on purpose.
//!
//! A missing completion or achievement date compares as the distant
//! past: it is never after a bound, and always at-or-before one.

use crate::domain::foundation::{Percent, ProgressStatus, Timestamp};
use crate::domain::milestone::Milestone;
use crate::domain::task::Task;

use super::aggregation::{last_completion_date, TaskSummary};

fn is_after(date: Option<Timestamp>, bound: Timestamp) -> bool {
    date.is_some_and(|d| d.is_after(&bound))
}

fn is_at_or_before(date: Option<Timestamp>, bound: Timestamp) -> bool {
    date.map_or(true, |d| !d.is_after(&bound))
}

fn is_before(date: Option<Timestamp>, bound: Timestamp) -> bool {
    date.map_or(true, |d| d.is_before(&bound))
}

/// Classifies a task collection bounded by `start_date`/`end_date`.
///
/// Returns `None` when no rule matches (for example an empty collection
/// whose start date has already passed); the caller keeps its previous
/// stored status in that case.
pub fn classify_task_status(
    tasks: &[Task],
    start_date: Timestamp,
    end_date: Timestamp,
    now: Timestamp,
) -> Option<ProgressStatus> {
    let percentage = TaskSummary::from_tasks(tasks).percentage;
    let last_completion = last_completion_date(tasks);

    let mut status = None;

    if is_after(last_completion, end_date)
        || (now.is_after(&end_date) && percentage.value() < 100.0)
    {
        status = Some(ProgressStatus::Overdue);
    }
    if is_at_or_before(last_completion, end_date) && percentage.is_exactly_full() {
        status = Some(ProgressStatus::Completed);
    }
    if now.is_before(&end_date) && percentage.value() < 100.0 {
        status = Some(ProgressStatus::InProgress);
    }
    if now.is_before(&start_date) && percentage.is_zero() {
        status = Some(ProgressStatus::NotStarted);
    }

    status
}

/// Classifies a numeric tracker from its target ledger's latest
/// achieved date and its achieved percentage.
///
/// Completion requires the percentage to reach 100, not equal it
/// exactly; recorded achievements may overshoot the budget.
pub fn classify_numeric_tracker_status(
    last_achieved: Option<Timestamp>,
    start_date: Timestamp,
    end_date: Timestamp,
    percentage: Percent,
    now: Timestamp,
) -> Option<ProgressStatus> {
    let mut status = None;

    if is_after(last_achieved, end_date) || (now.is_after(&end_date) && percentage.value() < 100.0)
    {
        status = Some(ProgressStatus::Overdue);
    }
    if is_at_or_before(last_achieved, end_date) && percentage.is_at_least_full() {
        status = Some(ProgressStatus::Completed);
    }
    if now.is_before(&end_date) && percentage.value() < 100.0 {
        status = Some(ProgressStatus::InProgress);
    }
    if now.is_before(&start_date) && percentage.is_zero() {
        status = Some(ProgressStatus::NotStarted);
    }

    status
}

/// Classifies a numeric milestone from its counters and dates.
///
/// Returns `None` when no rule matches; callers treat that as
/// not-started.
pub fn classify_milestone_status(milestone: &Milestone, now: Timestamp) -> Option<ProgressStatus> {
    let last_achieved = milestone.last_achieved_date;
    let end_date = milestone.end_date;

    let mut status = None;

    if milestone.remaining_target == 0 && is_at_or_before(last_achieved, end_date) {
        status = Some(ProgressStatus::Completed);
    }
    if (milestone.remaining_target > 0
        && is_after(last_achieved, end_date)
        && end_date.is_before(&now))
        || is_after(last_achieved, end_date)
    {
        status = Some(ProgressStatus::Overdue);
    }
    if milestone.remaining_target != 0 && is_before(last_achieved, end_date) {
        status = Some(ProgressStatus::InProgress);
    }
    if milestone.achieved_target == 0
        && milestone.start_date.is_after(&now)
        && now.is_before(&end_date)
    {
        status = Some(ProgressStatus::NotStarted);
    }

    status
}
