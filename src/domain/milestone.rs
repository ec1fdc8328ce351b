//! Milestone entity - a dated sub-goal within a tracker.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MilestoneId, ProgressStatus, Timestamp, TrackerId, UserId,
};

/// A milestone carves out a slice of its tracker's date range and, for
/// numeric trackers, a slice of the target budget.
///
/// `remaining_target` is always `target_value - achieved_target`
/// saturated at zero; it is never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub tracker_id: TrackerId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// This milestone's share of the tracker budget; zero on task trackers.
    pub target_value: u64,
    pub achieved_target: u64,
    pub remaining_target: u64,
    pub last_achieved_date: Option<Timestamp>,
    pub progress_status: ProgressStatus,
    pub created_at: Timestamp,
    pub created_by: UserId,
    pub updated_at: Timestamp,
    pub updated_by: Option<UserId>,
}

impl Milestone {
    /// Creates a milestone snapshot. Budget and range validation happen in
    /// `progress::allocation` before this is called.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tracker_id: TrackerId,
        title: impl Into<String>,
        start_date: Timestamp,
        end_date: Timestamp,
        target_value: u64,
        achieved_target: u64,
        last_achieved_date: Option<Timestamp>,
        created_by: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            id: MilestoneId::new(),
            tracker_id,
            title: title.into(),
            description: None,
            start_date,
            end_date,
            target_value,
            achieved_target,
            remaining_target: target_value.saturating_sub(achieved_target),
            last_achieved_date,
            progress_status: ProgressStatus::NotStarted,
            created_at: now,
            created_by,
            updated_at: now,
            updated_by: None,
        }
    }

    /// Returns true while this milestone can still absorb increments:
    /// its end date has not passed and it is not completed.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.end_date.is_after(&now) && !self.progress_status.is_completed()
    }

    /// Marks the snapshot as touched by an actor.
    pub fn touch(&mut self, actor: UserId, now: Timestamp) {
        self.updated_at = now;
        self.updated_by = Some(actor);
    }
}
