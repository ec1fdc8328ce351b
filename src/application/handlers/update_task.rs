//! UpdateTaskHandler - Command handler for renaming a task or flipping
//! its completion state.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{EngineError, TaskId, TaskState, UserId, ValidationError};
use crate::domain::task::Task;
use crate::ports::{
    ActivityAction, ActivityEntry, ActivityLog, ActivityScope, Clock, TaskRepository,
};

/// Command to update a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskCommand {
    pub task_id: TaskId,
    pub title: Option<String>,
    pub state: Option<TaskState>,
}

/// Result of a successful task update.
#[derive(Debug, Clone)]
pub struct UpdateTaskResult {
    pub task: Task,
}

/// Error type for task updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateTaskError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Handler for updating tasks.
pub struct UpdateTaskHandler {
    task_repository: Arc<dyn TaskRepository>,
    activity_log: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl UpdateTaskHandler {
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        activity_log: Arc<dyn ActivityLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            task_repository,
            activity_log,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateTaskCommand,
        actor: UserId,
    ) -> Result<UpdateTaskResult, UpdateTaskError> {
        let now = self.clock.now();

        let mut task = self
            .task_repository
            .find_by_id(&cmd.task_id)
            .await?
            .ok_or(UpdateTaskError::TaskNotFound(cmd.task_id))?;

        let mut renamed = false;
        if let Some(title) = cmd.title {
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title").into());
            }
            task.title = title;
            task.updated_at = now;
            task.updated_by = Some(actor);
            renamed = true;
        }

        let state_change = cmd.state.filter(|state| *state != task.state);
        if let Some(state) = state_change {
            task.mark(state, actor, now);
        }

        self.task_repository.update(&task).await?;

        // A state flip wins the activity wording over a plain rename.
        let (action, message) = match state_change {
            Some(TaskState::Done) => (
                ActivityAction::Completed,
                format!("A task is completed called {}", task.title),
            ),
            Some(TaskState::Pending) => (
                ActivityAction::Reverted,
                format!("A task is reverted called {}", task.title),
            ),
            None if renamed => (
                ActivityAction::Updated,
                format!("A task is updated called {}", task.title),
            ),
            None => {
                debug!(task_id = %task.id, "task update was a no-op");
                return Ok(UpdateTaskResult { task });
            }
        };
        self.activity_log
            .record(ActivityEntry::new(
                ActivityScope::Task,
                action,
                task.tracker_id,
                actor,
                message,
                now,
            ))
            .await?;

        debug!(task_id = %task.id, state = ?task.state, "task updated");

        Ok(UpdateTaskResult { task })
    }
}
