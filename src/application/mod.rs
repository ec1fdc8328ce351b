//! Application layer - command and query handlers.
//!
//! Handlers orchestrate the ports and the progress engine: load entity
//! snapshots, run the pure derivation, persist the new state, and append
//! an activity entry. One handler per operation.

pub mod handlers;
