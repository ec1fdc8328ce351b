//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Paceline domain.

mod errors;
mod ids;
mod percent;
mod progress_status;
mod task_state;
mod timestamp;
mod tracker_kind;

pub use errors::{EngineError, ValidationError};
pub use ids::{MilestoneId, TargetId, TaskId, TrackerId, UserId, WorkspaceId};
pub use percent::Percent;
pub use progress_status::ProgressStatus;
pub use task_state::TaskState;
pub use timestamp::Timestamp;
pub use tracker_kind::TrackerKind;
