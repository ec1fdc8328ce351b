//! Task completion state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a task has been checked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    #[default]
    Pending,
    Done,
}

impl TaskState {
    /// Returns true when the task is done.
    pub fn is_done(&self) -> bool {
        matches!(self, TaskState::Done)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Pending => "pending",
            TaskState::Done => "done",
        };
        write!(f, "{}", s)
    }
}
