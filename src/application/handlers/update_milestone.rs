//! UpdateMilestoneHandler - Command handler for renaming a milestone,
//! resizing its budget, or recording an achievement increment on it.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{
    EngineError, MilestoneId, ProgressStatus, UserId, ValidationError,
};
use crate::domain::milestone::Milestone;
use crate::domain::progress::{
    apply_milestone_increment, classify_milestone_status, ensure_budget_allows,
    is_any_milestone_active,
};
use crate::domain::target::Target;
use crate::domain::tracker::Tracker;
use crate::ports::{
    ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, MilestoneRepository,
    TargetRepository, TrackerRepository,
};

/// Command to update a milestone. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateMilestoneCommand {
    pub milestone_id: MilestoneId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Resizes the milestone's share of the tracker budget.
    pub target_value: Option<u64>,
    /// Records an achievement increment against the milestone.
    pub achieved_increment: Option<u64>,
}

/// Result of a successful milestone update.
#[derive(Debug, Clone)]
pub struct UpdateMilestoneResult {
    pub milestone: Milestone,
    /// Tracker snapshot with refreshed enablement.
    pub tracker: Tracker,
}

/// Error type for milestone updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateMilestoneError {
    #[error("Milestone not found: {0}")]
    MilestoneNotFound(MilestoneId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for updating milestones.
pub struct UpdateMilestoneHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    milestone_repository: Arc<dyn MilestoneRepository>,
    target_repository: Arc<dyn TargetRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl UpdateMilestoneHandler {
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
        cmd: UpdateMilestoneCommand,
        actor: UserId,
    ) -> Result<UpdateMilestoneResult, UpdateMilestoneError> {
        let now = self.clock.now();

        let mut milestone = self
            .milestone_repository
            .find_by_id(&cmd.milestone_id)
            .await?
            .ok_or(UpdateMilestoneError::MilestoneNotFound(cmd.milestone_id))?;
        let mut tracker = self
            .tracker_repository
            .find_by_id(&milestone.tracker_id)
            .await?
            .ok_or(EngineError::not_found("tracker"))?;

        let mut renamed = false;
        if let Some(title) = cmd.title {
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title").into());
            }
            milestone.title = title;
            renamed = true;
        }
        if let Some(description) = cmd.description {
            milestone.description = Some(description);
        }

        if let Some(target_value) = cmd.target_value {
            let siblings: Vec<Milestone> = self
                .milestone_repository
                .find_by_tracker(&tracker.id)
                .await?
                .into_iter()
                .filter(|m| m.id != milestone.id)
                .collect();
            ensure_budget_allows(&tracker, &siblings, target_value)?;

            milestone.target_value = target_value;
            milestone.remaining_target = target_value.saturating_sub(milestone.achieved_target);
            milestone.progress_status = classify_milestone_status(&milestone, now)
                .unwrap_or(milestone.progress_status);
            if milestone.remaining_target == 0 {
                milestone.progress_status = ProgressStatus::Completed;
            }
        }

        let mut increment_message = None;
        if let Some(amount) = cmd.achieved_increment {
            if amount > 0 {
                let entry = Target::for_milestone(
                    tracker.id,
                    milestone.id,
                    amount,
                    now,
                    actor,
                    now,
                );
                self.target_repository.save(&entry).await?;
                increment_message = Some(format!("{} added in {}", amount, milestone.title));
            }
            let progress = apply_milestone_increment(&milestone, amount, now, now);
            milestone.achieved_target = progress.achieved_target;
            milestone.remaining_target = progress.remaining_target;
            milestone.last_achieved_date = progress.last_achieved_date;
            milestone.progress_status = progress.progress_status;
        }

        milestone.touch(actor, now);
        self.milestone_repository.update(&milestone).await?;

        // Budget or counter changes can flip whether any milestone is
        // still active, so re-derive the tracker's enablement flag.
        let milestones: Vec<Milestone> = self
            .milestone_repository
            .find_by_tracker(&tracker.id)
            .await?;
        tracker.is_enabled = !is_any_milestone_active(&milestones, now);
        tracker.touch(actor, now);
        self.tracker_repository.update(&tracker).await?;

        if renamed {
            self.activity_log
                .record(ActivityEntry::new(
                    ActivityScope::Milestone,
                    ActivityAction::Updated,
                    tracker.id,
                    actor,
                    format!("A milestone name is updated called {}", milestone.title),
                    now,
                ))
                .await?;
        }
        if let Some(message) = increment_message {
            self.activity_log
                .record(ActivityEntry::new(
                    ActivityScope::Target,
                    ActivityAction::Created,
                    tracker.id,
                    actor,
                    message,
                    now,
                ))
                .await?;
        }

        debug!(milestone_id = %milestone.id, tracker_id = %tracker.id, "milestone updated");

        Ok(UpdateMilestoneResult { milestone, tracker })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        FixedClock, InMemoryActivityLog, InMemoryMilestoneRepository, InMemoryTargetRepository,
        InMemoryTrackerRepository,
    };
    use crate::domain::foundation::{Timestamp, WorkspaceId};

    struct Fixture {
        handler: UpdateMilestoneHandler,
        trackers: Arc<InMemoryTrackerRepository>,
        milestones: Arc<InMemoryMilestoneRepository>,
        targets: Arc<InMemoryTargetRepository>,
        log: Arc<InMemoryActivityLog>,
    }

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs)
    }

    fn fixture() -> Fixture {
        let trackers = Arc::new(InMemoryTrackerRepository::new());
        let milestones = Arc::new(InMemoryMilestoneRepository::new());
        let targets = Arc::new(InMemoryTargetRepository::new());
        let log = Arc::new(InMemoryActivityLog::new());
        let clock = Arc::new(FixedClock::at(ts(1_000)));
        let handler = UpdateMilestoneHandler::new(
            trackers.clone(),
            milestones.clone(),
            targets.clone(),
            log.clone(),
            clock,
        );
        Fixture {
            handler,
            trackers,
            milestones,
            targets,
            log,
        }
    }

    async fn seed(f: &Fixture, target_end: u64, target_value: u64) -> (Tracker, Milestone) {
        let tracker = Tracker::new_numeric(
            WorkspaceId::new(),
            "Revenue",
            ts(500),
            ts(100_000),
            0,
            target_end,
            UserId::new(),
            ts(400),
        )
        .unwrap();
        f.trackers.save(&tracker).await.unwrap();

        let milestone = Milestone::new(
            tracker.id,
            "Phase one",
            ts(600),
            ts(50_000),
            target_value,
            0,
            None,
            UserId::new(),
            ts(600),
        );
        f.milestones.save(&milestone).await.unwrap();
        (tracker, milestone)
    }

    #[tokio::test]
    async fn renames_milestone_and_logs_it() {
        let f = fixture();
        let (_, milestone) = seed(&f, 100, 40).await;

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            title: Some("Phase uno".into()),
            ..Default::default()
        };
        let result = f.handler.handle(cmd, UserId::new()).await.unwrap();

        assert_eq!(result.milestone.title, "Phase uno");
        assert_eq!(f.log.entry_count(), 1);
        assert_eq!(
            f.log.entries()[0].message,
            "A milestone name is updated called Phase uno"
        );
    }

    #[tokio::test]
    async fn resize_within_remaining_budget_succeeds() {
        let f = fixture();
        let (tracker, milestone) = seed(&f, 100, 40).await;
        let sibling = Milestone::new(
            tracker.id,
            "Phase two",
            ts(600),
            ts(50_000),
            30,
            0,
            None,
            UserId::new(),
            ts(600),
        );
        f.milestones.save(&sibling).await.unwrap();

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            target_value: Some(70),
            ..Default::default()
        };
        let result = f.handler.handle(cmd, UserId::new()).await.unwrap();

        assert_eq!(result.milestone.target_value, 70);
        assert_eq!(result.milestone.remaining_target, 70);
    }

    #[tokio::test]
    async fn resize_over_remaining_budget_fails() {
        let f = fixture();
        let (tracker, milestone) = seed(&f, 100, 40).await;
        let sibling = Milestone::new(
            tracker.id,
            "Phase two",
            ts(600),
            ts(50_000),
            30,
            0,
            None,
            UserId::new(),
            ts(600),
        );
        f.milestones.save(&sibling).await.unwrap();

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            target_value: Some(80),
            ..Default::default()
        };
        let err = f.handler.handle(cmd, UserId::new()).await.unwrap_err();

        assert_eq!(
            err,
            UpdateMilestoneError::Engine(EngineError::BudgetExceeded {
                requested: 80,
                available: 70,
            })
        );
    }

    #[tokio::test]
    async fn shrinking_below_achievement_completes_milestone() {
        let f = fixture();
        let tracker = Tracker::new_numeric(
            WorkspaceId::new(),
            "Revenue",
            ts(500),
            ts(100_000),
            0,
            100,
            UserId::new(),
            ts(400),
        )
        .unwrap();
        f.trackers.save(&tracker).await.unwrap();
        let mut milestone = Milestone::new(
            tracker.id,
            "Phase one",
            ts(600),
            ts(50_000),
            40,
            25,
            Some(ts(700)),
            UserId::new(),
            ts(600),
        );
        milestone.remaining_target = 15;
        f.milestones.save(&milestone).await.unwrap();

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            target_value: Some(25),
            ..Default::default()
        };
        let result = f.handler.handle(cmd, UserId::new()).await.unwrap();

        assert_eq!(result.milestone.remaining_target, 0);
        assert_eq!(result.milestone.progress_status, ProgressStatus::Completed);
        assert!(result.tracker.is_enabled);
    }

    #[tokio::test]
    async fn increment_appends_ledger_entry_and_updates_counters() {
        let f = fixture();
        let (tracker, milestone) = seed(&f, 100, 40).await;

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            achieved_increment: Some(10),
            ..Default::default()
        };
        let result = f.handler.handle(cmd, UserId::new()).await.unwrap();

        assert_eq!(result.milestone.achieved_target, 10);
        assert_eq!(result.milestone.remaining_target, 30);
        assert_eq!(result.milestone.last_achieved_date, Some(ts(1_000)));

        let ledger = f.targets.find_by_tracker(&tracker.id).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].milestone_id, Some(milestone.id));
        assert_eq!(f.log.entries()[0].message, "10 added in Phase one");
    }

    #[tokio::test]
    async fn zero_increment_is_a_no_op() {
        let f = fixture();
        let (tracker, milestone) = seed(&f, 100, 40).await;

        let cmd = UpdateMilestoneCommand {
            milestone_id: milestone.id,
            achieved_increment: Some(0),
            ..Default::default()
        };
        let result = f.handler.handle(cmd, UserId::new()).await.unwrap();

        assert_eq!(result.milestone.achieved_target, 0);
        assert!(f.targets.find_by_tracker(&tracker.id).await.unwrap().is_empty());
        assert_eq!(f.log.entry_count(), 0);
    }

    #[tokio::test]
    async fn unknown_milestone_is_reported() {
        let f = fixture();
        let ghost = MilestoneId::new();
        let cmd = UpdateMilestoneCommand {
            milestone_id: ghost,
            title: Some("Phase".into()),
            ..Default::default()
        };

        let err = f.handler.handle(cmd, UserId::new()).await.unwrap_err();
        assert_eq!(err, UpdateMilestoneError::MilestoneNotFound(ghost));
    }
}
