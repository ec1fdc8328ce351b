//! GetTrackerHandler - Query handler returning a tracker with derived
//! progress figures.
//!
//! The read path recomputes percentages, statuses, and enablement from
//! the current child collections and writes the refreshed snapshots
//! back, so a stale stored status self-heals on the next read.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{EngineError, Percent, TrackerId};
use crate::domain::milestone::Milestone;
use crate::domain::progress::{
    classify_milestone_status, classify_numeric_tracker_status, classify_task_status,
    is_any_milestone_active, latest_achieved_date, TaskSummary,
};
use crate::domain::tracker::Tracker;
use crate::ports::{
    Clock, MilestoneRepository, TargetRepository, TaskRepository, TrackerRepository,
};

/// Query for one tracker's derived state.
#[derive(Debug, Clone)]
pub struct GetTrackerQuery {
    pub tracker_id: TrackerId,
}

/// One milestone with its derived figures.
#[derive(Debug, Clone)]
pub struct MilestoneView {
    pub milestone: Milestone,
    /// Present on task trackers only.
    pub task_summary: Option<TaskSummary>,
}

/// A tracker with freshly derived progress.
#[derive(Debug, Clone)]
pub struct TrackerDetail {
    pub tracker: Tracker,
    /// Roll-up over every task on the tracker; task trackers only.
    pub task_summary: Option<TaskSummary>,
    pub milestones: Vec<MilestoneView>,
}

/// Error type for the tracker query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GetTrackerError {
    #[error("Tracker not found: {0}")]
    TrackerNotFound(TrackerId),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for reading trackers.
pub struct GetTrackerHandler {
    tracker_repository: Arc<dyn TrackerRepository>,
    milestone_repository: Arc<dyn MilestoneRepository>,
    task_repository: Arc<dyn TaskRepository>,
    target_repository: Arc<dyn TargetRepository>,
    clock: Arc<dyn Clock>,
}

impl GetTrackerHandler {
    pub fn new(
        tracker_repository: Arc<dyn TrackerRepository>,
        milestone_repository: Arc<dyn MilestoneRepository>,
        task_repository: Arc<dyn TaskRepository>,
        target_repository: Arc<dyn TargetRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tracker_repository,
            milestone_repository,
            task_repository,
            target_repository,
            clock,
        }
    }

    pub async fn handle(&self, query: GetTrackerQuery) -> Result<TrackerDetail, GetTrackerError> {
        let now = self.clock.now();

        let mut tracker = self
            .tracker_repository
            .find_by_id(&query.tracker_id)
            .await?
            .ok_or(GetTrackerError::TrackerNotFound(query.tracker_id))?;
        let mut milestones = self
            .milestone_repository
            .find_by_tracker(&tracker.id)
            .await?;

        let detail = if tracker.kind.is_task() {
            let tasks = self.task_repository.find_by_tracker(&tracker.id).await?;
            let summary = TaskSummary::from_tasks(&tasks);

            tracker.percentage = summary.percentage;
            tracker.progress_status =
                classify_task_status(&tasks, tracker.start_date, tracker.end_date, now)
                    .unwrap_or(tracker.progress_status);

            let mut views = Vec::with_capacity(milestones.len());
            for milestone in &mut milestones {
                let milestone_tasks =
                    self.task_repository.find_by_milestone(&milestone.id).await?;
                let milestone_summary = TaskSummary::from_tasks(&milestone_tasks);
                milestone.progress_status = classify_task_status(
                    &milestone_tasks,
                    milestone.start_date,
                    milestone.end_date,
                    now,
                )
                .unwrap_or(milestone.progress_status);
                self.milestone_repository.update(milestone).await?;
                views.push(MilestoneView {
                    milestone: milestone.clone(),
                    task_summary: Some(milestone_summary),
                });
            }

            self.tracker_repository.update(&tracker).await?;

            TrackerDetail {
                tracker,
                task_summary: Some(summary),
                milestones: views,
            }
        } else {
            let ledger = self.target_repository.find_by_tracker(&tracker.id).await?;

            let mut views = Vec::with_capacity(milestones.len());
            for milestone in &mut milestones {
                milestone.progress_status = classify_milestone_status(milestone, now)
                    .unwrap_or(milestone.progress_status);
                self.milestone_repository.update(milestone).await?;
                views.push(MilestoneView {
                    milestone: milestone.clone(),
                    task_summary: None,
                });
            }

            tracker.percentage =
                Percent::from_amounts(tracker.achieved_target, tracker.target_end);
            tracker.progress_status = classify_numeric_tracker_status(
                latest_achieved_date(&ledger),
                tracker.start_date,
                tracker.end_date,
                tracker.percentage,
                now,
            )
            .unwrap_or(tracker.progress_status);
            tracker.is_enabled = !is_any_milestone_active(&milestones, now);
            self.tracker_repository.update(&tracker).await?;

            TrackerDetail {
                tracker,
                task_summary: None,
                milestones: views,
            }
        };

        debug!(tracker_id = %detail.tracker.id, status = ?detail.tracker.progress_status, "tracker read");

        Ok(detail)
    }
}
