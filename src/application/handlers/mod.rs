//! Command and query handlers.

mod create_milestone;
mod create_task;
mod create_tracker;
mod get_tracker;
mod record_target;
mod update_milestone;
mod update_task;

pub use create_milestone::{
    CreateMilestoneCommand, CreateMilestoneError, CreateMilestoneHandler, CreateMilestoneResult,
};
pub use create_task::{CreateTaskCommand, CreateTaskError, CreateTaskHandler, CreateTaskResult};
pub use create_tracker::{
    CreateTrackerCommand, CreateTrackerError, CreateTrackerHandler, CreateTrackerResult,
};
pub use get_tracker::{
    GetTrackerError, GetTrackerHandler, GetTrackerQuery, MilestoneView, TrackerDetail,
};
pub use record_target::{
    RecordTargetCommand, RecordTargetError, RecordTargetHandler, RecordTargetResult,
};
pub use update_milestone::{
    UpdateMilestoneCommand, UpdateMilestoneError, UpdateMilestoneHandler, UpdateMilestoneResult,
};
pub use update_task::{UpdateTaskCommand, UpdateTaskError, UpdateTaskHandler, UpdateTaskResult};
