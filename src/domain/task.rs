//! Task entity - a single checklist item on a tracker or milestone.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MilestoneId, TaskId, TaskState, Timestamp, TrackerId, UserId, ValidationError,
};

/// A checklist item. `completion_date` is `Some` iff the task is done;
/// `mark` is the only way to flip the state, which keeps that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub tracker_id: TrackerId,
    pub milestone_id: Option<MilestoneId>,
    pub title: String,
    pub state: TaskState,
    pub completion_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub created_by: UserId,
    pub updated_at: Timestamp,
    pub updated_by: Option<UserId>,
}

impl Task {
    /// Creates a pending task.
    pub fn new(
        tracker_id: TrackerId,
        milestone_id: Option<MilestoneId>,
        title: impl Into<String>,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        Ok(Self {
            id: TaskId::new(),
            tracker_id,
            milestone_id,
            title,
            state: TaskState::Pending,
            completion_date: None,
            created_at: now,
            created_by,
            updated_at: now,
            updated_by: None,
        })
    }

    /// Transitions the task to the given state, setting the completion
    /// date when it becomes done and clearing it otherwise.
    pub fn mark(&mut self, state: TaskState, actor: UserId, now: Timestamp) {
        self.state = state;
        self.completion_date = if state.is_done() { Some(now) } else { None };
        self.updated_at = now;
        self.updated_by = Some(actor);
    }
}
