//! # trainflow-core
//!
//! The deterministic engine behind TrainFlow, a corporate-training
//! prototype.
//!
//! This crate holds the two pieces of real logic in the product:
//! - the Wizard Controller (`wizard`): a step-gated, multi-step form that
//!   builds a training in one of two variants
//! - the Exam Grader (`exam`): scoring of a multiple-choice attempt against
//!   an answer key, with pass/fail and retake
//!
//! Around them sit the plain data the screens render (`catalog`), demo
//! sign-in (`account`), screen routing (`navigation`), video records
//! (`media`) and cosmetic progress counters (`progress`).
//!
//! ## Constraints
//!
//! The core:
//! - Has NO async, NO I/O and never reads the clock
//! - Uses integer arithmetic only
//! - Rejects invalid input with a [`TrainflowError`] and never panics

// =============================================================================
// MODULES
// =============================================================================

pub mod account;
pub mod catalog;
pub mod exam;
pub mod media;
pub mod navigation;
pub mod progress;
pub mod types;
pub mod wizard;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    EmployeeId, QuestionId, TemplateId, Timestamp, TrainflowError, TrainingId,
    mean_percent_round_half_up, percent_round_half_up,
};

// =============================================================================
// RE-EXPORTS: Wizard Controller
// =============================================================================

pub use wizard::{
    Field, FieldValue, FinalizedTraining, GenerationPlan, StepKind, TrainingForm,
    WizardController, WizardEvent, WizardVariant,
};

// =============================================================================
// RE-EXPORTS: Exam Grader
// =============================================================================

pub use exam::{
    DEFAULT_PASSING_SCORE, ExamAttempt, ExamDefinition, ExamPhase, ExamResult, ExamSession,
    Question, RetakePolicy, grade,
};

// =============================================================================
// RE-EXPORTS: Supporting screens
// =============================================================================

pub use account::{LoginForm, RegistrationForm, Role, SessionUser};
pub use catalog::{
    Catalog, DashboardSummary, Employee, EmployeeAssignment, EmployeeSummary, ExamStatus,
    TrainingStatus, TrainingTemplate,
};
pub use media::{AiVideoRequest, ManualUpload, VideoRecord};
pub use navigation::{NavIntent, Router, Screen};
pub use progress::{GenerationTicker, PlaybackClock, TickOutcome, TrainingOutline};
