//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engine and the outside world. Adapters implement these ports.
//!
//! - Repositories persist entity snapshots; they only surface active
//!   (non-soft-deleted) rows.
//! - `ActivityLog` records the audit trail entries emitted on every
//!   successful command.
//! - `Clock` supplies the reference time so handlers stay deterministic
//!   under test.

mod activity_log;
mod clock;
mod milestone_repository;
mod target_repository;
mod task_repository;
mod tracker_repository;

pub use activity_log::{ActivityAction, ActivityEntry, ActivityLog, ActivityScope};
pub use clock::Clock;
pub use milestone_repository::MilestoneRepository;
pub use target_repository::TargetRepository;
pub use task_repository::TaskRepository;
pub use tracker_repository::TrackerRepository;
