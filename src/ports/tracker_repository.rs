//! Tracker repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EngineError, TrackerId, WorkspaceId};
use crate::domain::tracker::Tracker;

/// Repository port for tracker snapshots.
///
/// Implementations surface only active rows; soft-deleted trackers are
/// invisible to the engine. The caller serializes concurrent writes to
/// the same tracker (transaction or row lock) so budget checks are
/// applied atomically.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    /// Persists a new tracker.
    async fn save(&self, tracker: &Tracker) -> Result<(), EngineError>;

    /// Replaces an existing tracker snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the tracker does not exist
    async fn update(&self, tracker: &Tracker) -> Result<(), EngineError>;

    /// Finds a tracker by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &TrackerId) -> Result<Option<Tracker>, EngineError>;

    /// Lists a workspace's trackers, newest first, filtered by archive flag.
    async fn find_by_workspace(
        &self,
        workspace_id: &WorkspaceId,
        archived: bool,
    ) -> Result<Vec<Tracker>, EngineError>;
}
