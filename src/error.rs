//! Run-level errors.
//!
//! Unmet requirements, overlaps and staffing gaps are never errors; they
//! are scored as conflicts. Errors are reserved for invalid input and
//! engine defects.

use thiserror::Error;

use crate::validation::ValidationError;

/// A scheduling run could not produce a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    /// The catalog failed validation; no sections were built.
    #[error("invalid catalog: {}", join_messages(.0))]
    InvalidCatalog(Vec<ValidationError>),

    /// The roster failed validation; no student was placed.
    #[error("invalid roster: {}", join_messages(.0))]
    InvalidRoster(Vec<ValidationError>),

    /// A section holds more students than its capacity.
    #[error("section {section} would hold {enrolled} students but its capacity is {capacity}")]
    CapacityExceeded {
        /// Section label.
        section: String,
        /// Enrollment that breaks the invariant.
        enrolled: usize,
        /// Section capacity.
        capacity: u32,
    },

    /// The scorer disagrees with the assignment engine on unmet needs.
    #[error("assignment left {assigned} requirements unmet but scoring found {scored}")]
    InconsistentScore {
        /// Unmet requirements tallied during assignment.
        assigned: usize,
        /// Unmet requirements found by the scorer.
        scored: usize,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
