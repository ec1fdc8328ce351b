//! Lifecycle status derived for trackers and milestones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived lifecycle status of a tracker or milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

impl ProgressStatus {
    /// Returns true when the entity has reached its goal.
    pub fn is_completed(&self) -> bool {
        matches!(self, ProgressStatus::Completed)
    }

    /// Returns true when the entity still accepts progress.
    pub fn is_open(&self) -> bool {
        matches!(self, ProgressStatus::NotStarted | ProgressStatus::InProgress)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgressStatus::NotStarted => "Not Started",
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::Completed => "Completed",
            ProgressStatus::Overdue => "Overdue",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        assert_eq!(ProgressStatus::default(), ProgressStatus::NotStarted);
    }

    #[test]
    fn is_completed_only_for_completed() {
        assert!(ProgressStatus::Completed.is_completed());
        assert!(!ProgressStatus::Overdue.is_completed());
        assert!(!ProgressStatus::InProgress.is_completed());
    }

    #[test]
    fn is_open_for_not_started_and_in_progress() {
        assert!(ProgressStatus::NotStarted.is_open());
        assert!(ProgressStatus::InProgress.is_open());
        assert!(!ProgressStatus::Completed.is_open());
        assert!(!ProgressStatus::Overdue.is_open());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&ProgressStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        assert_eq!(
            serde_json::to_string(&ProgressStatus::Overdue).unwrap(),
            "\"overdue\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: ProgressStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, ProgressStatus::InProgress);
    }
}
