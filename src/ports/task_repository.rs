//! Task repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EngineError, MilestoneId, TaskId, TrackerId};
use crate::domain::task::Task;

/// Repository port for task snapshots.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task.
    async fn save(&self, task: &Task) -> Result<(), EngineError>;

    /// Replaces an existing task snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the task does not exist
    async fn update(&self, task: &Task) -> Result<(), EngineError>;

    /// Finds a task by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, EngineError>;

    /// Lists every task on a tracker, including milestone-assigned ones.
    async fn find_by_tracker(&self, tracker_id: &TrackerId) -> Result<Vec<Task>, EngineError>;

    /// Lists a tracker's tasks not assigned to any milestone.
    async fn find_direct_by_tracker(
        &self,
        tracker_id: &TrackerId,
    ) -> Result<Vec<Task>, EngineError>;

    /// Lists the tasks assigned to a milestone.
    async fn find_by_milestone(
        &self,
        milestone_id: &MilestoneId,
    ) -> Result<Vec<Task>, EngineError>;
}
