//! Tracker kind enum - checklist-based vs numeric-budget trackers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a tracker measures progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    /// Progress is the fraction of owned tasks marked done.
    Task,
    /// Progress is the fraction of a numeric budget achieved.
    Numeric,
}

impl TrackerKind {
    /// Returns true for checklist-based trackers.
    pub fn is_task(&self) -> bool {
        matches!(self, TrackerKind::Task)
    }

    /// Returns true for numeric-budget trackers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TrackerKind::Numeric)
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackerKind::Task => "task",
            TrackerKind::Numeric => "numeric",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_are_mutually_exclusive() {
        assert!(TrackerKind::Task.is_task());
        assert!(!TrackerKind::Task.is_numeric());
        assert!(TrackerKind::Numeric.is_numeric());
        assert!(!TrackerKind::Numeric.is_task());
    }

    #[test]
    fn serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&TrackerKind::Task).unwrap(), "\"task\"");
        assert_eq!(
            serde_json::to_string(&TrackerKind::Numeric).unwrap(),
            "\"numeric\""
        );
    }
}
