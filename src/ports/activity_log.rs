//! Activity log port - audit trail for tracker activity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EngineError, Timestamp, TrackerId, UserId};

/// The entity family an activity entry concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityScope {
    Tracker,
    Milestone,
    Task,
    Target,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    Completed,
    Reverted,
    Deleted,
}

/// One audit trail entry. Entries always reference the owning tracker
/// so a tracker's history can be read back as a single stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub scope: ActivityScope,
    pub action: ActivityAction,
    pub tracker_id: TrackerId,
    pub actor: UserId,
    pub message: String,
    pub recorded_at: Timestamp,
}

impl ActivityEntry {
    /// Creates a new entry.
    pub fn new(
        scope: ActivityScope,
        action: ActivityAction,
        tracker_id: TrackerId,
        actor: UserId,
        message: impl Into<String>,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            scope,
            action,
            tracker_id,
            actor,
            message: message.into(),
            recorded_at,
        }
    }
}

/// Port for recording audit trail entries.
///
/// Handlers append an entry for each change a successful command makes.
/// Failures here are surfaced to the caller; the engine does not retry.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends an entry to the trail.
    async fn record(&self, entry: ActivityEntry) -> Result<(), EngineError>;
}
