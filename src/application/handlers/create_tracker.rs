//! CreateTrackerHandler - Command handler for creating trackers.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{
    EngineError, Timestamp, TrackerKind, UserId, ValidationError, WorkspaceId,
};
use crate::domain::tracker::Tracker;
use crate::ports::{ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, TrackerRepository};

/// Command to create a tracker in a workspace.
#[derive(Debug, Clone)]
pub struct CreateTrackerCommand {
    pub workspace_id: WorkspaceId,
    pub title: String,
    pub description: Option<String>,
    pub kind: TrackerKind,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Budget bounds; ignored for task trackers.
    pub target_start: u64,
    pub target_end: u64,
}

/// Result of successful tracker creation.
#[derive(Debug, Clone)]
pub struct CreateTrackerResult {
    pub tracker: Tracker,
}

/// Error type for tracker creation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreateTrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for creating trackers.
pub struct CreateTrackerHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl CreateTrackerHandler {
    pub fn new(
        tracker_repository: Arc<dyn TrackerRepository>,
        activity_log: Arc<dyn ActivityLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tracker_repository,
            activity_log,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateTrackerCommand,
        actor: UserId,
    ) -> Result<CreateTrackerResult, CreateTrackerError> {
        let now = self.clock.now();

        let mut tracker = match cmd.kind {
            TrackerKind::Task => Tracker::new_task(
                cmd.workspace_id,
                cmd.title,
                cmd.start_date,
                cmd.end_date,
                actor,
                now,
            )?,
            TrackerKind::Numeric => Tracker::new_numeric(
                cmd.workspace_id,
                cmd.title,
                cmd.start_date,
                cmd.end_date,
                cmd.target_start,
                cmd.target_end,
                actor,
                now,
            )?,
        };
        tracker.description = cmd.description;

        self.tracker_repository.save(&tracker).await?;

        self.activity_log
            .record(ActivityEntry::new(
                ActivityScope::Tracker,
                ActivityAction::Created,
                tracker.id,
                actor,
                format!("A tracker is created called {}", tracker.title),
                now,
            ))
            .await?;

        debug!(tracker_id = %tracker.id, kind = %tracker.kind, "tracker created");

        Ok(CreateTrackerResult { tracker })
    }
}
