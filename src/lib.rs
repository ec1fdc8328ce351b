//! Paceline - Progress Tracking Engine
//!
//! This crate derives consistent progress state for workspaces, trackers,
//! milestones, tasks, and numeric targets: lifecycle classification,
//! completion roll-ups, and target-budget allocation.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
