//! Domain layer - pure progress-tracking logic.
//!
//! Nothing in this module performs I/O. Entities are value objects; the
//! `progress` module derives new state from snapshots the caller passes in,
//! and the caller (application layer) is responsible for persisting it.

pub mod foundation;
pub mod milestone;
pub mod progress;
pub mod target;
pub mod task;
pub mod tracker;

pub use milestone::Milestone;
pub use target::Target;
pub use task::Task;
pub use tracker::Tracker;
