//! Target ledger repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EngineError, MilestoneId, TargetId, TrackerId};
use crate::domain::target::Target;

/// Repository port for the append-only target ledger.
///
/// The only permitted mutation is `attach_to_milestone`, which re-points
/// previously unattributed entries at a newly budgeted milestone.
#[async_trait]
pub trait TargetRepository: Send + Sync {
    /// Appends a ledger entry.
    async fn save(&self, target: &Target) -> Result<(), EngineError>;

    /// Lists every entry recorded against a tracker, attributed or not.
    async fn find_by_tracker(&self, tracker_id: &TrackerId) -> Result<Vec<Target>, EngineError>;

    /// Lists a tracker's entries that are not attributed to a milestone.
    async fn find_unattributed(
        &self,
        tracker_id: &TrackerId,
    ) -> Result<Vec<Target>, EngineError>;

    /// Re-attributes the given entries to a milestone.
    async fn attach_to_milestone(
        &self,
        ids: &[TargetId],
        milestone_id: &MilestoneId,
    ) -> Result<(), EngineError>;
}
