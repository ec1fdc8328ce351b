//! Milestone repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EngineError, MilestoneId, TrackerId};
use crate::domain::milestone::Milestone;

/// Repository port for milestone snapshots.
#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    /// Persists a new milestone.
    async fn save(&self, milestone: &Milestone) -> Result<(), EngineError>;

    /// Replaces an existing milestone snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the milestone does not exist
    async fn update(&self, milestone: &Milestone) -> Result<(), EngineError>;

    /// Finds a milestone by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MilestoneId) -> Result<Option<Milestone>, EngineError>;

    /// Lists a tracker's milestones.
    async fn find_by_tracker(&self, tracker_id: &TrackerId) -> Result<Vec<Milestone>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MilestoneRepository) {}
    }
}
