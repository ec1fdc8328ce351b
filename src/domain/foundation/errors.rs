//! Error types for the domain layer.

use thiserror::Error;

use super::{Timestamp, TrackerKind};

/// Errors raised while validating entity fields and date ranges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("End date must be equal or greater than {start}")]
    EndBeforeStart { start: Timestamp },

    #[error("Start date must be equal or greater than {bound}")]
    StartBeforeTrackerRange { bound: Timestamp },

    #[error("Start date must be equal or lesser than {bound}")]
    StartAfterTrackerRange { bound: Timestamp },

    #[error("End date must be equal or greater than {bound}")]
    EndBeforeTrackerRange { bound: Timestamp },

    #[error("End date must be equal or lesser than {bound}")]
    EndAfterTrackerRange { bound: Timestamp },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Typed failures returned by engine operations.
///
/// All failures are caller-correctable; the engine never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Requested target {requested} exceeds the unallocated tracker budget. You can set a target of at most {available}")]
    BudgetExceeded { requested: u64, available: u64 },

    #[error("The tracker budget is already fully allocated to milestones")]
    BudgetDepleted,

    #[error("Direct tracker increments are rejected while a milestone is active")]
    TrackerDisabled,

    #[error("Operation requires a {expected} tracker, but this tracker is {actual}")]
    TypeMismatch {
        expected: TrackerKind,
        actual: TrackerKind,
    },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Milestone does not belong to the given tracker")]
    MilestoneTrackerMismatch,
}

impl EngineError {
    /// Creates a not-found error for the named entity.
    pub fn not_found(entity: &'static str) -> Self {
        EngineError::NotFound { entity }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: TrackerKind, actual: TrackerKind) -> Self {
        EngineError::TypeMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_field_name() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn budget_exceeded_reports_available_amount() {
        let err = EngineError::BudgetExceeded {
            requested: 70,
            available: 60,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("70"));
        assert!(msg.contains("at most 60"));
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = EngineError::type_mismatch(TrackerKind::Numeric, TrackerKind::Task);
        assert_eq!(
            format!("{}", err),
            "Operation requires a numeric tracker, but this tracker is task"
        );
    }

    #[test]
    fn validation_error_converts_into_engine_error() {
        let err: EngineError = ValidationError::empty_field("title").into();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            format!("{}", EngineError::not_found("Tracker")),
            "Tracker not found"
        );
    }
}
