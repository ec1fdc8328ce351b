//! Target entity - an immutable ledger entry for one numeric increment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MilestoneId, TargetId, Timestamp, TrackerId, UserId};

/// One recorded achievement increment.
///
/// A target with a milestone reference contributes to that milestone's
/// achieved total only; an unattributed target contributes directly to
/// the tracker's. Entries are append-only; the single mutation is
/// re-attribution to a newly created milestone, which absorbs the
/// tracker's unattributed history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub tracker_id: TrackerId,
    pub milestone_id: Option<MilestoneId>,
    /// The increment amount, never negative.
    pub achieved_target: u64,
    pub achieved_date: Timestamp,
    pub created_at: Timestamp,
    pub created_by: UserId,
}

impl Target {
    /// Records an increment directly against the tracker.
    pub fn for_tracker(
        tracker_id: TrackerId,
        amount: u64,
        achieved_date: Timestamp,
        created_by: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            id: TargetId::new(),
            tracker_id,
            milestone_id: None,
            achieved_target: amount,
            achieved_date,
            created_at: now,
            created_by,
        }
    }

    /// Records an increment attributed to a milestone.
    pub fn for_milestone(
        tracker_id: TrackerId,
        milestone_id: MilestoneId,
        amount: u64,
        achieved_date: Timestamp,
        created_by: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            milestone_id: Some(milestone_id),
            ..Self::for_tracker(tracker_id, amount, achieved_date, created_by, now)
        }
    }

    /// Returns true when the entry applies directly to the tracker.
    pub fn is_unattributed(&self) -> bool {
        self.milestone_id.is_none()
    }
}
