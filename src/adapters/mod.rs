//! Adapters - Implementations of the ports.
//!
//! Only clock and in-memory adapters live here; real persistence, HTTP,
//! and mail surfaces are owned by the services embedding this engine.

mod clock;
mod in_memory;

pub use clock::{FixedClock, SystemClock};
pub use in_memory::{
    InMemoryActivityLog, InMemoryMilestoneRepository, InMemoryTargetRepository,
    InMemoryTaskRepository, InMemoryTrackerRepository,
};
