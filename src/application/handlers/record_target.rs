//! RecordTargetHandler - Command handler for recording a numeric
//! achievement increment against a tracker or one of its milestones.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::foundation::{
    EngineError, MilestoneId, Timestamp, TrackerId, TrackerKind, UserId,
};
use crate::domain::milestone::Milestone;
use crate::domain::progress::{
    apply_milestone_increment, apply_tracker_increment, ensure_direct_increment_allowed,
    is_any_milestone_active,
};
use crate::domain::target::Target;
use crate::domain::tracker::Tracker;
use crate::ports::{
    ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, MilestoneRepository,
    TargetRepository, TrackerRepository,
};

/// Command to record one achievement increment.
#[derive(Debug, Clone)]
pub struct RecordTargetCommand {
    pub tracker_id: TrackerId,
    /// `None` records the increment directly against the tracker.
    pub milestone_id: Option<MilestoneId>,
    pub amount: u64,
    pub achieved_date: Timestamp,
}

/// Result of a successfully recorded increment.
#[derive(Debug, Clone)]
pub struct RecordTargetResult {
    pub target: Target,
    /// Tracker snapshot with refreshed counters and enablement.
    pub tracker: Tracker,
    /// Updated milestone, when the increment was attributed to one.
    pub milestone: Option<Milestone>,
}

/// Error type for increment recording.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordTargetError {
    #[error("Tracker not found: {0}")]
    TrackerNotFound(TrackerId),
    #[error("Milestone not found: {0}")]
    MilestoneNotFound(MilestoneId),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for recording increments.
pub struct RecordTargetHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    milestone_repository: Arc<dyn MilestoneRepository>,
    target_repository: Arc<dyn TargetRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl RecordTargetHandler {
    pub fn new(
        tracker_repository: Arc<dyn TrackerRepository>,
        milestone_repository: Arc<dyn MilestoneRepository>,
        target_repository: Arc<dyn TargetRepository>,
        activity_log: Arc<dyn ActivityLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tracker_repository,
            milestone_repository,
            target_repository,
            activity_log,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordTargetCommand,
        actor: UserId,
    ) -> Result<RecordTargetResult, RecordTargetError> {
        let now = self.clock.now();

        let mut tracker = self
            .tracker_repository
            .find_by_id(&cmd.tracker_id)
            .await?
            .ok_or(RecordTargetError::TrackerNotFound(cmd.tracker_id))?;

        if !tracker.kind.is_numeric() {
            warn!(tracker_id = %tracker.id, "increment rejected: task-based tracker");
            return Err(EngineError::type_mismatch(TrackerKind::Numeric, tracker.kind).into());
        }

        let milestones = self
            .milestone_repository
            .find_by_tracker(&tracker.id)
            .await?;

        match cmd.milestone_id {
            Some(milestone_id) => {
                self.record_for_milestone(cmd, milestone_id, tracker, milestones, actor, now)
                    .await
            }
            None => {
                ensure_direct_increment_allowed(&tracker, &milestones, now)?;

                let target =
                    Target::for_tracker(tracker.id, cmd.amount, cmd.achieved_date, actor, now);
                self.target_repository.save(&target).await?;

                let ledger = self.target_repository.find_by_tracker(&tracker.id).await?;
                let progress =
                    apply_tracker_increment(&tracker, &milestones, &ledger, cmd.amount, now);
                tracker.achieved_target = progress.achieved_target;
                tracker.percentage = progress.percentage;
                tracker.progress_status = progress.progress_status;
                tracker.is_enabled = progress.is_enabled;
                tracker.touch(actor, now);
                self.tracker_repository.update(&tracker).await?;

                self.activity_log
                    .record(ActivityEntry::new(
                        ActivityScope::Target,
                        ActivityAction::Created,
                        tracker.id,
                        actor,
                        format!("{} added", cmd.amount),
                        now,
                    ))
                    .await?;

                debug!(tracker_id = %tracker.id, amount = cmd.amount, "tracker increment recorded");

                Ok(RecordTargetResult {
                    target,
                    tracker,
                    milestone: None,
                })
            }
        }
    }

    async fn record_for_milestone(
        &self,
        cmd: RecordTargetCommand,
        milestone_id: MilestoneId,
        mut tracker: Tracker,
        milestones: Vec<Milestone>,
        actor: UserId,
        now: Timestamp,
    ) -> Result<RecordTargetResult, RecordTargetError> {
        let mut milestone = self
            .milestone_repository
            .find_by_id(&milestone_id)
            .await?
            .ok_or(RecordTargetError::MilestoneNotFound(milestone_id))?;
        if milestone.tracker_id != tracker.id {
            return Err(EngineError::MilestoneTrackerMismatch.into());
        }

        let target = Target::for_milestone(
            tracker.id,
            milestone.id,
            cmd.amount,
            cmd.achieved_date,
            actor,
            now,
        );
        self.target_repository.save(&target).await?;

        let progress = apply_milestone_increment(&milestone, cmd.amount, cmd.achieved_date, now);
        milestone.achieved_target = progress.achieved_target;
        milestone.remaining_target = progress.remaining_target;
        milestone.last_achieved_date = progress.last_achieved_date;
        milestone.progress_status = progress.progress_status;
        milestone.touch(actor, now);
        self.milestone_repository.update(&milestone).await?;

        // Re-derive enablement against the updated milestone set: the
        // increment may just have completed the last active one.
        let milestones: Vec<Milestone> = milestones
            .into_iter()
            .map(|m| if m.id == milestone.id { milestone.clone() } else { m })
            .collect();
        tracker.is_enabled = !is_any_milestone_active(&milestones, now);
        tracker.touch(actor, now);
        self.tracker_repository.update(&tracker).await?;

        self.activity_log
            .record(ActivityEntry::new(
                ActivityScope::Target,
                ActivityAction::Created,
                tracker.id,
                actor,
                format!("{} added in {}", cmd.amount, milestone.title),
                now,
            ))
            .await?;

        debug!(
            tracker_id = %tracker.id,
            milestone_id = %milestone.id,
            amount = cmd.amount,
            "milestone increment recorded"
        );

        Ok(RecordTargetResult {
            target,
            tracker,
            milestone: Some(milestone),
        })
    }
}
