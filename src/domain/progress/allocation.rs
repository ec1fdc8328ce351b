//! Target allocation - numeric budget distribution and increments.
//!
//! Validates milestone budget requests against the tracker's ceiling,
//! applies achievement increments to milestone and tracker counters,
//! and derives the tracker enablement flag from milestone activity.
//!
//! All functions are pure over the snapshots they receive; the caller
//! persists the returned state inside its own transaction, and is
//! responsible for serializing concurrent writers to the same tracker.

use crate::domain::foundation::{
    EngineError, Percent, ProgressStatus, TargetId, Timestamp, TrackerKind, ValidationError,
};
use crate::domain::milestone::Milestone;
use crate::domain::target::Target;
use crate::domain::tracker::Tracker;

use super::aggregation::latest_achieved_date;
use super::classifier::{classify_milestone_status, classify_numeric_tracker_status};

/// Seed state for a newly budgeted milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneBudget {
    /// Sum of the tracker's pre-existing unattributed increments.
    pub achieved_target: u64,
    /// The requested value less the seeded achievement, floored at zero.
    pub remaining_target: u64,
    /// Latest achieved date among the seeding increments.
    pub last_achieved_date: Option<Timestamp>,
    /// Unattributed ledger entries the new milestone absorbs; the caller
    /// re-points these at the milestone.
    pub absorbed_targets: Vec<TargetId>,
}

/// Updated milestone counters after an achievement increment.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneProgress {
    pub achieved_target: u64,
    pub remaining_target: u64,
    pub last_achieved_date: Option<Timestamp>,
    pub progress_status: ProgressStatus,
}

/// Updated tracker state after a direct increment.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerProgress {
    pub achieved_target: u64,
    pub percentage: Percent,
    pub progress_status: ProgressStatus,
    pub is_enabled: bool,
}

/// Checks a milestone's dates against its own ordering and the
/// tracker's range. The checks run in a fixed order and the first
/// violation is reported with the bound it breaks.
pub fn validate_milestone_range(
    tracker: &Tracker,
    start_date: Timestamp,
    end_date: Timestamp,
) -> Result<(), ValidationError> {
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart { start: start_date });
    }
    if start_date < tracker.start_date {
        return Err(ValidationError::StartBeforeTrackerRange {
            bound: tracker.start_date,
        });
    }
    if start_date > tracker.end_date {
        return Err(ValidationError::StartAfterTrackerRange {
            bound: tracker.end_date,
        });
    }
    if end_date < tracker.start_date {
        return Err(ValidationError::EndBeforeTrackerRange {
            bound: tracker.start_date,
        });
    }
    if end_date > tracker.end_date {
        return Err(ValidationError::EndAfterTrackerRange {
            bound: tracker.end_date,
        });
    }
    Ok(())
}

/// Checks that `requested_value` fits inside the tracker budget not yet
/// allocated to `siblings`.
///
/// Fails with `BudgetDepleted` when the ceiling is already fully
/// allocated, and with `BudgetExceeded` when the request overruns what
/// remains; the error carries the maximum permissible value.
pub fn ensure_budget_allows(
    tracker: &Tracker,
    siblings: &[Milestone],
    requested_value: u64,
) -> Result<(), EngineError> {
    if !tracker.kind.is_numeric() {
        return Err(EngineError::type_mismatch(TrackerKind::Numeric, tracker.kind));
    }

    let allocated: u64 = siblings.iter().map(|m| m.target_value).sum();
    if tracker.target_end <= allocated {
        return Err(EngineError::BudgetDepleted);
    }

    let available = tracker.target_end - allocated;
    if requested_value > available {
        return Err(EngineError::BudgetExceeded {
            requested: requested_value,
            available,
        });
    }
    Ok(())
}

/// Validates a milestone budget request against the tracker's ceiling
/// and seeds the milestone from the tracker's unattributed ledger.
pub fn create_milestone_budget(
    tracker: &Tracker,
    siblings: &[Milestone],
    requested_value: u64,
    unattributed: &[Target],
) -> Result<MilestoneBudget, EngineError> {
    ensure_budget_allows(tracker, siblings, requested_value)?;

    let achieved_target: u64 = unattributed.iter().map(|t| t.achieved_target).sum();
    Ok(MilestoneBudget {
        achieved_target,
        remaining_target: requested_value.saturating_sub(achieved_target),
        last_achieved_date: latest_achieved_date(unattributed),
        absorbed_targets: unattributed.iter().map(|t| t.id).collect(),
    })
}

/// Returns true if any milestone is still active: not completed and its
/// end date has not yet passed.
pub fn is_any_milestone_active(milestones: &[Milestone], now: Timestamp) -> bool {
    milestones.iter().any(|m| m.is_active(now))
}

/// Guards a direct tracker-level increment.
///
/// Task trackers never accept numeric increments; numeric trackers
/// reject direct increments while any milestone is active.
pub fn ensure_direct_increment_allowed(
    tracker: &Tracker,
    milestones: &[Milestone],
    now: Timestamp,
) -> Result<(), EngineError> {
    if !tracker.kind.is_numeric() {
        return Err(EngineError::type_mismatch(TrackerKind::Numeric, tracker.kind));
    }
    if is_any_milestone_active(milestones, now) {
        return Err(EngineError::TrackerDisabled);
    }
    Ok(())
}

/// Applies a direct increment to the tracker's counters.
///
/// `ledger` must already contain the increment being applied; its dates
/// feed the classifier. The returned status falls back to the stored
/// one when no classification rule matches.
pub fn apply_tracker_increment(
    tracker: &Tracker,
    milestones: &[Milestone],
    ledger: &[Target],
    amount: u64,
    now: Timestamp,
) -> TrackerProgress {
    let achieved_target = tracker.achieved_target.saturating_add(amount);
    let percentage = Percent::from_amounts(achieved_target, tracker.target_end);
    let progress_status = classify_numeric_tracker_status(
        latest_achieved_date(ledger),
        tracker.start_date,
        tracker.end_date,
        percentage,
        now,
    )
    .unwrap_or(tracker.progress_status);

    TrackerProgress {
        achieved_target,
        percentage,
        progress_status,
        is_enabled: !is_any_milestone_active(milestones, now),
    }
}

/// Applies an achievement increment to a milestone's counters.
///
/// A zero increment leaves the snapshot untouched. When the recomputed
/// remaining target reaches zero the milestone is completed outright,
/// overriding whatever the date-based classification produced.
pub fn apply_milestone_increment(
    milestone: &Milestone,
    amount: u64,
    achieved_date: Timestamp,
    now: Timestamp,
) -> MilestoneProgress {
    if amount == 0 {
        return MilestoneProgress {
            achieved_target: milestone.achieved_target,
            remaining_target: milestone.remaining_target,
            last_achieved_date: milestone.last_achieved_date,
            progress_status: milestone.progress_status,
        };
    }

    let achieved_target = milestone.achieved_target.saturating_add(amount);
    let remaining_target = milestone.target_value.saturating_sub(achieved_target);

    let mut updated = milestone.clone();
    updated.achieved_target = achieved_target;
    updated.remaining_target = remaining_target;
    updated.last_achieved_date = Some(achieved_date);

    let mut progress_status =
        classify_milestone_status(&updated, now).unwrap_or(milestone.progress_status);
    if remaining_target == 0 {
        progress_status = ProgressStatus::Completed;
    }

    MilestoneProgress {
        achieved_target,
        remaining_target,
        last_achieved_date: Some(achieved_date),
        progress_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TrackerId, UserId, WorkspaceId};
    use proptest::prelude::*;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs)
    }

    fn numeric_tracker(target_end: u64) -> Tracker {
        Tracker::new_numeric(
            WorkspaceId::new(),
            "Revenue",
            ts(100),
            ts(10_000),
            0,
            target_end,
            UserId::new(),
            ts(50),
        )
        .unwrap()
    }

    fn task_tracker() -> Tracker {
        Tracker::new_task(
            WorkspaceId::new(),
            "Launch",
            ts(100),
            ts(10_000),
            UserId::new(),
            ts(50),
        )
        .unwrap()
    }

    fn milestone_of(tracker: &Tracker, target_value: u64) -> Milestone {
        Milestone::new(
            tracker.id,
            "phase",
            tracker.start_date,
            tracker.end_date,
            target_value,
            0,
            None,
            UserId::new(),
            ts(50),
        )
    }

    fn unattributed(tracker: &Tracker, amount: u64, achieved_at: Timestamp) -> Target {
        Target::for_tracker(tracker.id, amount, achieved_at, UserId::new(), achieved_at)
    }

    // ───────────────────────────────────────────────────────────────
    // Budget creation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn first_milestone_within_budget_succeeds() {
        let tracker = numeric_tracker(100);
        let budget = create_milestone_budget(&tracker, &[], 40, &[]).unwrap();
        assert_eq!(budget.achieved_target, 0);
        assert_eq!(budget.remaining_target, 40);
        assert_eq!(budget.last_achieved_date, None);
        assert!(budget.absorbed_targets.is_empty());
    }

    #[test]
    fn second_milestone_over_remaining_budget_is_rejected() {
        let tracker = numeric_tracker(100);
        let first = milestone_of(&tracker, 40);

        let err = create_milestone_budget(&tracker, &[first], 70, &[]).unwrap_err();
        assert_eq!(
            err,
            EngineError::BudgetExceeded {
                requested: 70,
                available: 60,
            }
        );
    }

    #[test]
    fn depleted_budget_is_rejected_before_looking_at_the_request() {
        let tracker = numeric_tracker(100);
        let a = milestone_of(&tracker, 60);
        let b = milestone_of(&tracker, 40);

        // Even a zero-value request fails once the ceiling is reached.
        let err = create_milestone_budget(&tracker, &[a, b], 0, &[]).unwrap_err();
        assert_eq!(err, EngineError::BudgetDepleted);
    }

    #[test]
    fn budget_request_on_task_tracker_is_a_type_mismatch() {
        let tracker = task_tracker();
        let err = create_milestone_budget(&tracker, &[], 10, &[]).unwrap_err();
        assert!(matches!(err, EngineError::TypeMismatch { .. }));
    }

    #[test]
    fn new_milestone_absorbs_unattributed_ledger() {
        let tracker = numeric_tracker(100);
        let t1 = unattributed(&tracker, 10, ts(200));
        let t2 = unattributed(&tracker, 5, ts(300));

        let budget =
            create_milestone_budget(&tracker, &[], 40, &[t1.clone(), t2.clone()]).unwrap();

        assert_eq!(budget.achieved_target, 15);
        assert_eq!(budget.remaining_target, 25);
        assert_eq!(budget.last_achieved_date, Some(ts(300)));
        assert_eq!(budget.absorbed_targets, vec![t1.id, t2.id]);
    }

    #[test]
    fn seeded_achievement_above_request_floors_remaining_at_zero() {
        let tracker = numeric_tracker(100);
        let t = unattributed(&tracker, 50, ts(200));
        let budget = create_milestone_budget(&tracker, &[], 40, &[t]).unwrap();
        assert_eq!(budget.remaining_target, 0);
    }

    #[test]
    fn exact_remaining_budget_is_accepted() {
        let tracker = numeric_tracker(100);
        let first = milestone_of(&tracker, 40);
        let budget = create_milestone_budget(&tracker, &[first], 60, &[]).unwrap();
        assert_eq!(budget.remaining_target, 60);
    }

    // ───────────────────────────────────────────────────────────────
    // Milestone range validation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn range_inside_tracker_is_accepted() {
        let tracker = numeric_tracker(100);
        assert!(validate_milestone_range(&tracker, ts(200), ts(5_000)).is_ok());
    }

    #[test]
    fn inverted_range_is_rejected_first() {
        // Both inverted and outside the tracker; the ordering check fires.
        let tracker = numeric_tracker(100);
        let err = validate_milestone_range(&tracker, ts(50_000), ts(20_000)).unwrap_err();
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn start_before_tracker_start_is_rejected() {
        let tracker = numeric_tracker(100);
        let err = validate_milestone_range(&tracker, ts(10), ts(5_000)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StartBeforeTrackerRange {
                bound: tracker.start_date
            }
        );
    }

    #[test]
    fn start_after_tracker_end_is_rejected() {
        let tracker = numeric_tracker(100);
        let err = validate_milestone_range(&tracker, ts(20_000), ts(30_000)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StartAfterTrackerRange {
                bound: tracker.end_date
            }
        );
    }

    #[test]
    fn end_after_tracker_end_is_rejected() {
        let tracker = numeric_tracker(100);
        let err = validate_milestone_range(&tracker, ts(200), ts(20_000)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EndAfterTrackerRange {
                bound: tracker.end_date
            }
        );
    }

    #[test]
    fn tracker_boundaries_are_inclusive() {
        let tracker = numeric_tracker(100);
        assert!(
            validate_milestone_range(&tracker, tracker.start_date, tracker.end_date).is_ok()
        );
    }

    // ───────────────────────────────────────────────────────────────
    // Enablement and direct increments
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn active_milestone_disables_direct_increments() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 40);

        let err =
            ensure_direct_increment_allowed(&tracker, &[milestone], ts(500)).unwrap_err();
        assert_eq!(err, EngineError::TrackerDisabled);
    }

    #[test]
    fn completed_milestone_does_not_disable_direct_increments() {
        let tracker = numeric_tracker(100);
        let mut milestone = milestone_of(&tracker, 40);
        milestone.progress_status = ProgressStatus::Completed;

        assert!(ensure_direct_increment_allowed(&tracker, &[milestone], ts(500)).is_ok());
    }

    #[test]
    fn expired_milestone_does_not_disable_direct_increments() {
        let tracker = numeric_tracker(100);
        let mut milestone = milestone_of(&tracker, 40);
        milestone.end_date = ts(400);

        assert!(ensure_direct_increment_allowed(&tracker, &[milestone], ts(500)).is_ok());
    }

    #[test]
    fn direct_increment_on_task_tracker_is_a_type_mismatch() {
        let tracker = task_tracker();
        let err = ensure_direct_increment_allowed(&tracker, &[], ts(500)).unwrap_err();
        assert!(matches!(err, EngineError::TypeMismatch { .. }));
    }

    #[test]
    fn tracker_increment_updates_counters_and_status() {
        let tracker = numeric_tracker(100);
        let entry = unattributed(&tracker, 40, ts(500));

        let progress =
            apply_tracker_increment(&tracker, &[], &[entry], 40, ts(600));

        assert_eq!(progress.achieved_target, 40);
        assert_eq!(progress.percentage.value(), 40.0);
        assert_eq!(progress.progress_status, ProgressStatus::InProgress);
        assert!(progress.is_enabled);
    }

    #[test]
    fn tracker_increment_reaching_budget_completes() {
        let mut tracker = numeric_tracker(100);
        tracker.achieved_target = 60;
        let entry = unattributed(&tracker, 40, ts(500));

        let progress = apply_tracker_increment(&tracker, &[], &[entry], 40, ts(600));

        assert_eq!(progress.achieved_target, 100);
        assert!(progress.percentage.is_at_least_full());
        assert_eq!(progress.progress_status, ProgressStatus::Completed);
    }

    #[test]
    fn tracker_increment_recomputes_enablement() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 40);
        let entry = unattributed(&tracker, 10, ts(500));

        let progress =
            apply_tracker_increment(&tracker, &[milestone], &[entry], 10, ts(600));
        assert!(!progress.is_enabled);
    }

    #[test]
    fn tracker_increment_saturates_at_the_counter_ceiling() {
        let mut tracker = numeric_tracker(100);
        tracker.achieved_target = u64::MAX - 5;
        let entry = unattributed(&tracker, 10, ts(500));

        let progress = apply_tracker_increment(&tracker, &[], &[entry], 10, ts(600));
        assert_eq!(progress.achieved_target, u64::MAX);
    }

    // ───────────────────────────────────────────────────────────────
    // Milestone increments
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn milestone_increment_reaching_target_completes() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 10);

        let progress = apply_milestone_increment(&milestone, 10, ts(500), ts(600));

        assert_eq!(progress.achieved_target, 10);
        assert_eq!(progress.remaining_target, 0);
        assert_eq!(progress.last_achieved_date, Some(ts(500)));
        assert_eq!(progress.progress_status, ProgressStatus::Completed);
    }

    #[test]
    fn milestone_increment_past_end_date_still_completes_when_target_met() {
        // The completed override beats the date-based overdue outcome.
        let tracker = numeric_tracker(100);
        let mut milestone = milestone_of(&tracker, 10);
        milestone.end_date = ts(400);

        let progress = apply_milestone_increment(&milestone, 10, ts(500), ts(600));
        assert_eq!(progress.progress_status, ProgressStatus::Completed);
    }

    #[test]
    fn partial_milestone_increment_is_in_progress() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 10);

        let progress = apply_milestone_increment(&milestone, 4, ts(500), ts(600));

        assert_eq!(progress.achieved_target, 4);
        assert_eq!(progress.remaining_target, 6);
        assert_eq!(progress.progress_status, ProgressStatus::InProgress);
    }

    #[test]
    fn zero_increment_is_a_no_op() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 10);

        let progress = apply_milestone_increment(&milestone, 0, ts(500), ts(600));

        assert_eq!(progress.achieved_target, milestone.achieved_target);
        assert_eq!(progress.remaining_target, milestone.remaining_target);
        assert_eq!(progress.last_achieved_date, None);
        assert_eq!(progress.progress_status, milestone.progress_status);
    }

    #[test]
    fn overshooting_increment_floors_remaining_at_zero() {
        let tracker = numeric_tracker(100);
        let milestone = milestone_of(&tracker, 10);

        let progress = apply_milestone_increment(&milestone, 25, ts(500), ts(600));

        assert_eq!(progress.achieved_target, 25);
        assert_eq!(progress.remaining_target, 0);
        assert_eq!(progress.progress_status, ProgressStatus::Completed);
    }

    #[test]
    fn milestone_increment_saturates_at_the_counter_ceiling() {
        let tracker = numeric_tracker(100);
        let mut milestone = milestone_of(&tracker, 10);
        milestone.achieved_target = u64::MAX - 5;

        let progress = apply_milestone_increment(&milestone, 10, ts(500), ts(600));

        assert_eq!(progress.achieved_target, u64::MAX);
        assert_eq!(progress.remaining_target, 0);
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        /// The budget invariant holds across arbitrary sequences of
        /// milestone creations: the sum of allocated target values never
        /// exceeds the tracker ceiling.
        #[test]
        fn budget_invariant_preserved_across_creations(
            target_end in 1u64..10_000,
            requests in prop::collection::vec(0u64..5_000, 1..12),
        ) {
            let tracker = numeric_tracker(target_end);
            let mut milestones: Vec<Milestone> = Vec::new();

            for requested in requests {
                if create_milestone_budget(&tracker, &milestones, requested, &[]).is_ok() {
                    milestones.push(milestone_of(&tracker, requested));
                }
                let allocated: u64 = milestones.iter().map(|m| m.target_value).sum();
                prop_assert!(allocated <= tracker.target_end);
            }
        }

        /// Remaining is never negative and the counters reconcile while the
        /// target has not been overshot.
        #[test]
        fn milestone_counters_reconcile(
            target_value in 0u64..10_000,
            increments in prop::collection::vec(0u64..500, 0..20),
        ) {
            let tracker = numeric_tracker(100_000);
            let mut milestone = milestone_of(&tracker, target_value);

            for (i, amount) in increments.into_iter().enumerate() {
                let at = ts(200 + i as i64);
                let progress = apply_milestone_increment(&milestone, amount, at, at);
                milestone.achieved_target = progress.achieved_target;
                milestone.remaining_target = progress.remaining_target;
                milestone.last_achieved_date = progress.last_achieved_date;
                milestone.progress_status = progress.progress_status;

                if milestone.achieved_target <= milestone.target_value {
                    prop_assert_eq!(
                        milestone.achieved_target + milestone.remaining_target,
                        milestone.target_value
                    );
                } else {
                    prop_assert_eq!(milestone.remaining_target, 0);
                }
            }
        }

        /// Classification is a pure function: identical inputs yield
        /// identical outputs.
        #[test]
        fn classification_is_idempotent(
            target_value in 0u64..1_000,
            achieved in 0u64..2_000,
            last in prop::option::of(0i64..5_000),
            now in 0i64..5_000,
        ) {
            let tracker = numeric_tracker(100_000);
            let mut m = milestone_of(&tracker, target_value);
            m.achieved_target = achieved;
            m.remaining_target = target_value.saturating_sub(achieved);
            m.last_achieved_date = last.map(ts);

            let first = classify_milestone_status(&m, ts(now));
            let second = classify_milestone_status(&m, ts(now));
            prop_assert_eq!(first, second);
        }
    }
}
