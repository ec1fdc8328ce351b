//! CreateTaskHandler - Command handler for adding a checklist task to a
//! tracker, optionally under one of its milestones.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{
    EngineError, MilestoneId, TrackerId, TrackerKind, UserId, ValidationError,
};
use crate::domain::task::Task;
use crate::ports::{
    ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, MilestoneRepository,
    TaskRepository, TrackerRepository,
};

/// Command to create a task.
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub tracker_id: TrackerId,
    /// Attaches the task to a milestone of the same tracker.
    pub milestone_id: Option<MilestoneId>,
    pub title: String,
}

/// Result of successful task creation.
#[derive(Debug, Clone)]
pub struct CreateTaskResult {
    pub task: Task,
}

/// Error type for task creation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreateTaskError {
    #[error("Tracker not found: {0}")]
    TrackerNotFound(TrackerId),
    #[error("Milestone not found: {0}")]
    MilestoneNotFound(MilestoneId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for creating tasks.
pub struct CreateTaskHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    milestone_repository: Arc<dyn MilestoneRepository>,
    task_repository: Arc<dyn TaskRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl CreateTaskHandler {
    pub fn new(
        tracker_repository: Arc<dyn TrackerRepository>,
        milestone_repository: Arc<dyn MilestoneRepository>,
        task_repository: Arc<dyn TaskRepository>,
        activity_log: Arc<dyn ActivityLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tracker_repository,
            milestone_repository,
            task_repository,
            activity_log,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateTaskCommand,
        actor: UserId,
    ) -> Result<CreateTaskResult, CreateTaskError> {
        let now = self.clock.now();

        let tracker = self
            .tracker_repository
            .find_by_id(&cmd.tracker_id)
            .await?
            .ok_or(CreateTaskError::TrackerNotFound(cmd.tracker_id))?;

        if !tracker.kind.is_task() {
            return Err(EngineError::type_mismatch(TrackerKind::Task, tracker.kind).into());
        }

        if let Some(milestone_id) = cmd.milestone_id {
            let milestone = self
                .milestone_repository
                .find_by_id(&milestone_id)
                .await?
                .ok_or(CreateTaskError::MilestoneNotFound(milestone_id))?;
            if milestone.tracker_id != tracker.id {
                return Err(EngineError::MilestoneTrackerMismatch.into());
            }
        }

        let task = Task::new(tracker.id, cmd.milestone_id, cmd.title, actor, now)?;
        self.task_repository.save(&task).await?;

        self.activity_log
            .record(ActivityEntry::new(
                ActivityScope::Task,
                ActivityAction::Created,
                tracker.id,
                actor,
                format!("A task is created called {}", task.title),
                now,
            ))
            .await?;

        debug!(task_id = %task.id, tracker_id = %tracker.id, "task created");

        Ok(CreateTaskResult { task })
    }
}
