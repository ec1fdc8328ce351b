//! Tracker entity - top-level progress container within a workspace.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Percent, ProgressStatus, Timestamp, TrackerId, TrackerKind, UserId, ValidationError,
    WorkspaceId,
};

/// A tracker measures progress over a date range, either as a task
/// checklist or against a numeric budget.
///
/// The derived fields (`percentage`, `progress_status`, `achieved_target`,
/// `is_enabled`) are snapshots: the engine computes fresh values and the
/// caller persists them back here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    pub id: TrackerId,
    pub workspace_id: WorkspaceId,
    pub title: String,
    pub description: Option<String>,
    pub kind: TrackerKind,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Budget floor for numeric trackers; zero for task trackers.
    pub target_start: u64,
    /// Budget ceiling for numeric trackers; zero for task trackers.
    pub target_end: u64,
    /// Sum of increments recorded directly against the tracker.
    pub achieved_target: u64,
    /// False while any milestone is active; direct increments are then rejected.
    pub is_enabled: bool,
    pub percentage: Percent,
    pub progress_status: ProgressStatus,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub created_by: UserId,
    pub updated_at: Timestamp,
    pub updated_by: Option<UserId>,
}

impl Tracker {
    /// Creates a task-checklist tracker.
    pub fn new_task(
        workspace_id: WorkspaceId,
        title: impl Into<String>,
        start_date: Timestamp,
        end_date: Timestamp,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        Self::new(
            workspace_id,
            title,
            TrackerKind::Task,
            start_date,
            end_date,
            0,
            0,
            created_by,
            now,
        )
    }

    /// Creates a numeric-budget tracker.
    pub fn new_numeric(
        workspace_id: WorkspaceId,
        title: impl Into<String>,
        start_date: Timestamp,
        end_date: Timestamp,
        target_start: u64,
        target_end: u64,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        Self::new(
            workspace_id,
            title,
            TrackerKind::Numeric,
            start_date,
            end_date,
            target_start,
            target_end,
            created_by,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn new(
        workspace_id: WorkspaceId,
        title: impl Into<String>,
        kind: TrackerKind,
        start_date: Timestamp,
        end_date: Timestamp,
        target_start: u64,
        target_end: u64,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart { start: start_date });
        }

        Ok(Self {
            id: TrackerId::new(),
            workspace_id,
            title,
            description: None,
            kind,
            start_date,
            end_date,
            target_start,
            target_end,
            achieved_target: 0,
            is_enabled: true,
            percentage: Percent::ZERO,
            progress_status: ProgressStatus::NotStarted,
            is_archived: false,
            created_at: now,
            created_by,
            updated_at: now,
            updated_by: None,
        })
    }

    /// Marks the snapshot as touched by an actor.
    pub fn touch(&mut self, actor: UserId, now: Timestamp) {
        self.updated_at = now;
        self.updated_by = Some(actor);
    }
}
