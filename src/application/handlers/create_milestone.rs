//! CreateMilestoneHandler - Command handler for adding a milestone to a
//! tracker, including numeric budget allocation.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{
    EngineError, ProgressStatus, Timestamp, TrackerId, UserId, ValidationError,
};
use crate::domain::milestone::Milestone;
use crate::domain::progress::{
    classify_milestone_status, create_milestone_budget, validate_milestone_range,
};
use crate::domain::tracker::Tracker;
use crate::ports::{
    ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, MilestoneRepository,
    TargetRepository, TrackerRepository,
};

/// Command to create a milestone.
#[derive(Debug, Clone)]
pub struct CreateMilestoneCommand {
    pub tracker_id: TrackerId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Requested share of the tracker budget; ignored on task trackers.
    pub target_value: u64,
}

/// Result of successful milestone creation.
#[derive(Debug, Clone)]
pub struct CreateMilestoneResult {
    pub milestone: Milestone,
    /// Tracker snapshot with refreshed enablement.
    pub tracker: Tracker,
}

/// Error type for milestone creation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreateMilestoneError {
    #[error("Tracker not found: {0}")]
    TrackerNotFound(TrackerId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for creating milestones.
pub struct CreateMilestoneHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    milestone_repository: Arc<dyn MilestoneRepository>,
    target_repository: Arc<dyn TargetRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl CreateMilestoneHandler {
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
        cmd: CreateMilestoneCommand,
        actor: UserId,
    ) -> Result<CreateMilestoneResult, CreateMilestoneError> {
        let now = self.clock.now();

        let mut tracker = self
            .tracker_repository
            .find_by_id(&cmd.tracker_id)
            .await?
            .ok_or(CreateMilestoneError::TrackerNotFound(cmd.tracker_id))?;

        if cmd.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        validate_milestone_range(&tracker, cmd.start_date, cmd.end_date)?;

        let siblings = self
            .milestone_repository
            .find_by_tracker(&tracker.id)
            .await?;

        let mut milestone = if tracker.kind.is_numeric() {
            let unattributed = self.target_repository.find_unattributed(&tracker.id).await?;
            let budget =
                create_milestone_budget(&tracker, &siblings, cmd.target_value, &unattributed)?;

            let mut milestone = Milestone::new(
                tracker.id,
                cmd.title,
                cmd.start_date,
                cmd.end_date,
                cmd.target_value,
                budget.achieved_target,
                budget.last_achieved_date,
                actor,
                now,
            );
            milestone.remaining_target = budget.remaining_target;
            milestone.progress_status =
                classify_milestone_status(&milestone, now).unwrap_or(ProgressStatus::NotStarted);

            if !budget.absorbed_targets.is_empty() {
                self.target_repository
                    .attach_to_milestone(&budget.absorbed_targets, &milestone.id)
                    .await?;
            }

            // A freshly active milestone blocks direct tracker increments.
            if milestone.is_active(now) {
                tracker.is_enabled = false;
                tracker.touch(actor, now);
                self.tracker_repository.update(&tracker).await?;
            }

            milestone
        } else {
            Milestone::new(
                tracker.id,
                cmd.title,
                cmd.start_date,
                cmd.end_date,
                0,
                0,
                None,
                actor,
                now,
            )
        };
        milestone.description = cmd.description;

        self.milestone_repository.save(&milestone).await?;

        self.activity_log
            .record(ActivityEntry::new(
                ActivityScope::Milestone,
                ActivityAction::Created,
                tracker.id,
                actor,
                format!("A milestone is created called {}", milestone.title),
                now,
            ))
            .await?;

        debug!(
            milestone_id = %milestone.id,
            tracker_id = %tracker.id,
            target_value = milestone.target_value,
            "milestone created"
        );

        Ok(CreateMilestoneResult { milestone, tracker })
    }
}
