//! In-memory port implementations for testing.
//!
//! Synchronous, deterministic storage behind `RwLock`ed maps.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. This is acceptable for
//! test code but these adapters should NOT be used in production; real
//! deployments wire the ports to a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{
    EngineError, MilestoneId, TargetId, TaskId, TrackerId, WorkspaceId,
};
use crate::domain::{Milestone, Target, Task, Tracker};
use crate::ports::{
    ActivityEntry, ActivityLog, MilestoneRepository, TargetRepository, TaskRepository,
    TrackerRepository,
};

/// In-memory tracker store.
#[derive(Default)]
pub struct InMemoryTrackerRepository {
    rows: RwLock<HashMap<TrackerId, Tracker>>,
}

impl InMemoryTrackerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackerRepository for InMemoryTrackerRepository {
    async fn save(&self, tracker: &Tracker) -> Result<(), EngineError> {
        self.rows
            .write()
            .expect("tracker rows lock poisoned")
            .insert(tracker.id, tracker.clone());
        Ok(())
    }

    async fn update(&self, tracker: &Tracker) -> Result<(), EngineError> {
        let mut rows = self.rows.write().expect("tracker rows lock poisoned");
        if !rows.contains_key(&tracker.id) {
            return Err(EngineError::not_found("Tracker"));
        }
        rows.insert(tracker.id, tracker.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TrackerId) -> Result<Option<Tracker>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("tracker rows lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_workspace(
        &self,
        workspace_id: &WorkspaceId,
        archived: bool,
    ) -> Result<Vec<Tracker>, EngineError> {
        let mut trackers: Vec<Tracker> = self
            .rows
            .read()
            .expect("tracker rows lock poisoned")
            .values()
            .filter(|t| t.workspace_id == *workspace_id && t.is_archived == archived)
            .cloned()
            .collect();
        trackers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trackers)
    }
}

/// In-memory milestone store.
#[derive(Default)]
pub struct InMemoryMilestoneRepository {
    rows: RwLock<HashMap<MilestoneId, Milestone>>,
}

impl InMemoryMilestoneRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MilestoneRepository for InMemoryMilestoneRepository {
    async fn save(&self, milestone: &Milestone) -> Result<(), EngineError> {
        self.rows
            .write()
            .expect("milestone rows lock poisoned")
            .insert(milestone.id, milestone.clone());
        Ok(())
    }

    async fn update(&self, milestone: &Milestone) -> Result<(), EngineError> {
        let mut rows = self.rows.write().expect("milestone rows lock poisoned");
        if !rows.contains_key(&milestone.id) {
            return Err(EngineError::not_found("Milestone"));
        }
        rows.insert(milestone.id, milestone.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MilestoneId) -> Result<Option<Milestone>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("milestone rows lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_tracker(
        &self,
        tracker_id: &TrackerId,
    ) -> Result<Vec<Milestone>, EngineError> {
        let mut milestones: Vec<Milestone> = self
            .rows
            .read()
            .expect("milestone rows lock poisoned")
            .values()
            .filter(|m| m.tracker_id == *tracker_id)
            .cloned()
            .collect();
        milestones.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(milestones)
    }
}

/// In-memory task store.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    rows: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), EngineError> {
        self.rows
            .write()
            .expect("task rows lock poisoned")
            .insert(task.id, task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), EngineError> {
        let mut rows = self.rows.write().expect("task rows lock poisoned");
        if !rows.contains_key(&task.id) {
            return Err(EngineError::not_found("Task"));
        }
        rows.insert(task.id, task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("task rows lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_tracker(&self, tracker_id: &TrackerId) -> Result<Vec<Task>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("task rows lock poisoned")
            .values()
            .filter(|t| t.tracker_id == *tracker_id)
            .cloned()
            .collect())
    }

    async fn find_direct_by_tracker(
        &self,
        tracker_id: &TrackerId,
    ) -> Result<Vec<Task>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("task rows lock poisoned")
            .values()
            .filter(|t| t.tracker_id == *tracker_id && t.milestone_id.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_milestone(
        &self,
        milestone_id: &MilestoneId,
    ) -> Result<Vec<Task>, EngineError> {
        Ok(self
            .rows
            .read()
            .expect("task rows lock poisoned")
            .values()
            .filter(|t| t.milestone_id == Some(*milestone_id))
            .cloned()
            .collect())
    }
}

/// In-memory target ledger.
#[derive(Default)]
pub struct InMemoryTargetRepository {
    rows: RwLock<HashMap<TargetId, Target>>,
}

impl InMemoryTargetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TargetRepository for InMemoryTargetRepository {
    async fn save(&self, target: &Target) -> Result<(), EngineError> {
        self.rows
            .write()
            .expect("target rows lock poisoned")
            .insert(target.id, target.clone());
        Ok(())
    }

    async fn find_by_tracker(&self, tracker_id: &TrackerId) -> Result<Vec<Target>, EngineError> {
        let mut targets: Vec<Target> = self
            .rows
            .read()
            .expect("target rows lock poisoned")
            .values()
            .filter(|t| t.tracker_id == *tracker_id)
            .cloned()
            .collect();
        targets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(targets)
    }

    async fn find_unattributed(
        &self,
        tracker_id: &TrackerId,
    ) -> Result<Vec<Target>, EngineError> {
        let mut targets = self.find_by_tracker(tracker_id).await?;
        targets.retain(|t| t.is_unattributed());
        Ok(targets)
    }

    async fn attach_to_milestone(
        &self,
        ids: &[TargetId],
        milestone_id: &MilestoneId,
    ) -> Result<(), EngineError> {
        let mut rows = self.rows.write().expect("target rows lock poisoned");
        for id in ids {
            let target = rows.get_mut(id).ok_or(EngineError::not_found("Target"))?;
            target.milestone_id = Some(*milestone_id);
        }
        Ok(())
    }
}

/// In-memory activity trail with helpers for test assertions.
#[derive(Default)]
pub struct InMemoryActivityLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded entries (for test assertions).
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries
            .read()
            .expect("activity entries lock poisoned")
            .clone()
    }

    /// Returns the number of recorded entries.
    pub fn entry_count(&self) -> usize {
        self.entries
            .read()
            .expect("activity entries lock poisoned")
            .len()
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn record(&self, entry: ActivityEntry) -> Result<(), EngineError> {
        self.entries
            .write()
            .expect("activity entries lock poisoned")
            .push(entry);
        Ok(())
    }
}
