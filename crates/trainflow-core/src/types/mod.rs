//! # Core Type Definitions
//!
//! This module contains the shared types for the TrainFlow core:
//! - Identifiers (`TrainingId`, `QuestionId`, `EmployeeId`, `TemplateId`)
//! - Timestamps supplied by the caller (`Timestamp`)
//! - Error types (`TrainflowError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Never read the clock; time is always passed in

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::wizard::{Field, StepKind};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a training (dashboard entry, viewer, video owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingId(pub u64);

/// Identifier of an exam question, unique within one exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an employee in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Create a new employee id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a training template in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Create a new template id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Milliseconds since the Unix epoch.
///
/// The core never reads the clock. Callers stamp records by passing
/// a `Timestamp` in, which keeps every operation reproducible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the raw millisecond value.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

// =============================================================================
// PERCENT HELPER
// =============================================================================

/// Integer percentage of `part / whole`, rounded half up.
///
/// Returns 0 when `whole` is 0.
#[must_use]
pub fn percent_round_half_up(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}

/// Integer mean of percentages, rounded half up.
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn mean_percent_round_half_up(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v.min(100))).sum();
    let n = values.len() as u64;
    ((2 * sum + n) / (2 * n)) as u8
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the TrainFlow core.
///
/// Every condition here is recoverable by further input in the same
/// session. Nothing is fatal and the core never panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainflowError {
    /// The current wizard step has unmet required fields.
    #[error("Step {step} is incomplete, missing: {missing:?}")]
    StepIncomplete {
        /// The blocked step.
        step: StepKind,
        /// Fields that still need a value.
        missing: Vec<Field>,
    },

    /// `go_next` was requested on the last step.
    #[error("Already on the final step")]
    AtFinalStep,

    /// `go_previous` was requested on the first step.
    #[error("Already on the first step")]
    AtFirstStep,

    /// `submit` was requested before reaching the final step.
    #[error("Submit is only available on the final step (current step {current} of {total})")]
    NotOnFinalStep {
        /// 1-indexed current step.
        current: usize,
        /// Number of steps in the wizard.
        total: usize,
    },

    /// The field does not belong to this wizard variant.
    #[error("Field {0:?} is not part of this form")]
    UnknownField(Field),

    /// The value kind does not match the field kind.
    #[error("Field {field:?} expects a {expected} value")]
    FieldTypeMismatch {
        /// The field being written.
        field: Field,
        /// Expected value kind.
        expected: &'static str,
    },

    /// Password and confirmation differ at registration.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The exam definition is malformed.
    #[error("Invalid exam: {0}")]
    InvalidExam(String),

    /// The question id is not part of the exam.
    #[error("Unknown question: {0}")]
    UnknownQuestion(QuestionId),

    /// The selected option is outside the question's options.
    #[error("Option {option} is out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        /// The question being answered.
        question: QuestionId,
        /// The selected option index.
        option: usize,
        /// Number of available options.
        count: usize,
    },

    /// Grading was requested before every question was answered.
    #[error("Attempt is incomplete: {answered} of {total} questions answered")]
    IncompleteAttempt {
        /// Questions answered so far.
        answered: usize,
        /// Questions in the exam.
        total: usize,
    },

    /// The exam session cannot perform this action in its current phase.
    #[error("Cannot {action} while the exam is {phase}")]
    InvalidExamPhase {
        /// What the caller tried to do.
        action: &'static str,
        /// The phase the session is in.
        phase: &'static str,
    },

    /// The configured retake limit has been used up.
    #[error("Retake limit reached after {0} attempts")]
    AttemptLimitReached(u32),

    /// The navigation intent does not apply to the current screen.
    #[error("Cannot apply {intent} on screen {screen}")]
    InvalidNavigation {
        /// The current screen.
        screen: String,
        /// The rejected intent.
        intent: String,
    },

    /// A manual upload was submitted without a video file.
    #[error("A video file must be selected")]
    MissingVideoFile,

    /// AI video generation needs a topic and a prompt.
    #[error("Topic and prompt are required for generation")]
    MissingGenerationInput,

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_round_half_up(2, 3), 67);
        assert_eq!(percent_round_half_up(1, 3), 33);
        assert_eq!(percent_round_half_up(1, 8), 13);
        assert_eq!(percent_round_half_up(7, 10), 70);
        assert_eq!(percent_round_half_up(3, 3), 100);
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent_round_half_up(0, 0), 0);
        assert_eq!(percent_round_half_up(5, 0), 0);
    }

    #[test]
    fn mean_percent_rounds_half_up() {
        assert_eq!(mean_percent_round_half_up(&[75, 0, 100]), 58);
        assert_eq!(mean_percent_round_half_up(&[50, 51]), 51);
        assert_eq!(mean_percent_round_half_up(&[]), 0);
    }

    #[test]
    fn percent_clamps_part_to_whole() {
        assert_eq!(percent_round_half_up(9, 4), 100);
    }

    #[test]
    fn identifiers_order_deterministically() {
        let mut ids = vec![EmployeeId::new("3"), EmployeeId::new("1"), EmployeeId::new("2")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "1");
        assert_eq!(ids[2].as_str(), "3");
    }

    #[test]
    fn error_messages_are_readable() {
        let err = TrainflowError::IncompleteAttempt {
            answered: 2,
            total: 3,
        };
        assert_eq!(err.to_string(), "Attempt is incomplete: 2 of 3 questions answered");
    }
}
