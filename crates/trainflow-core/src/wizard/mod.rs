//! # Wizard Module
//!
//! The training-creation wizard: a linear, N-step form with per-step
//! "next" gating.
//!
//! - `form`: typed payloads per variant, [`Field`] and [`FieldValue`]
//! - `step`: step sequences and the required-field predicate table
//! - `record`: the finalized training produced on submit
//!
//! The [`WizardController`] is owned by the view that opened it. Edits are
//! never validated on write; the predicate of the current step is only
//! evaluated when advancing or submitting. A blocked transition returns an
//! error and leaves the state untouched.

mod form;
mod record;
mod step;

pub use form::{AiTrainingForm, BasicTrainingForm, Field, FieldKind, FieldValue, TrainingForm};
pub use record::{FinalizedTraining, GenerationPlan};
pub use step::{StepKind, WizardVariant};

use crate::catalog::Catalog;
use crate::{Timestamp, TrainflowError};
use serde::{Deserialize, Serialize};

// =============================================================================
// EVENTS
// =============================================================================

/// Input from the form widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardEvent {
    /// Overwrite a field.
    Set { field: Field, value: FieldValue },
    /// Toggle one id in a selection field.
    Toggle { field: Field, item: String },
    /// Advance one step.
    Next,
    /// Go back one step.
    Previous,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Drives one wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardController {
    /// 1-indexed, always within `[1, N]`.
    current_step: usize,
    form: TrainingForm,
}

impl WizardController {
    /// Start a wizard on step 1 with default fields.
    #[must_use]
    pub fn new(variant: WizardVariant) -> Self {
        Self {
            current_step: 1,
            form: TrainingForm::empty(variant),
        }
    }

    #[must_use]
    pub fn variant(&self) -> WizardVariant {
        self.form.variant()
    }

    #[must_use]
    pub fn form(&self) -> &TrainingForm {
        &self.form
    }

    /// Current step, 1-indexed.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Number of steps (N).
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.variant().step_count()
    }

    /// What the current step collects.
    #[must_use]
    pub fn current_kind(&self) -> StepKind {
        // current_step is kept in [1, N]
        self.variant().steps()[self.current_step - 1]
    }

    #[must_use]
    pub fn is_final_step(&self) -> bool {
        self.current_step == self.step_count()
    }

    /// Required fields of the current step that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        self.current_kind().missing_fields(&self.form)
    }

    /// Whether the "next" control should be enabled.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_final_step() && self.current_kind().is_satisfied(&self.form)
    }

    /// Whether the "submit" control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_final_step() && self.current_kind().is_satisfied(&self.form)
    }

    /// Advance one step. Returns the new step number.
    pub fn go_next(&mut self) -> Result<usize, TrainflowError> {
        if self.is_final_step() {
            return Err(TrainflowError::AtFinalStep);
        }
        self.check_current_step()?;
        self.current_step += 1;
        Ok(self.current_step)
    }

    /// Go back one step without validation. Returns the new step number.
    pub fn go_previous(&mut self) -> Result<usize, TrainflowError> {
        if self.current_step <= 1 {
            return Err(TrainflowError::AtFirstStep);
        }
        self.current_step -= 1;
        Ok(self.current_step)
    }

    /// Overwrite a field. Content is not validated here.
    pub fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), TrainflowError> {
        self.form.set(field, value)
    }

    /// Toggle one id in a selection field. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, field: Field, item: &str) -> Result<bool, TrainflowError> {
        self.form.toggle(field, item)
    }

    /// Apply one widget event.
    pub fn apply(&mut self, event: WizardEvent) -> Result<(), TrainflowError> {
        match event {
            WizardEvent::Set { field, value } => self.set_field(field, value),
            WizardEvent::Toggle { field, item } => self.toggle_selection(field, &item).map(|_| ()),
            WizardEvent::Next => self.go_next().map(|_| ()),
            WizardEvent::Previous => self.go_previous().map(|_| ()),
        }
    }

    /// Produce the finalized record.
    ///
    /// Requires the final step with its predicate satisfied. Lookups are
    /// resolved against `catalog`. The controller is left unchanged; its
    /// owner discards it after a successful submit.
    pub fn submit(
        &self,
        catalog: &Catalog,
        created_at: Timestamp,
    ) -> Result<FinalizedTraining, TrainflowError> {
        if !self.is_final_step() {
            return Err(TrainflowError::NotOnFinalStep {
                current: self.current_step,
                total: self.step_count(),
            });
        }
        self.check_current_step()?;
        Ok(FinalizedTraining::from_form(&self.form, catalog, created_at))
    }

    /// Back to step 1 with default fields.
    pub fn reset(&mut self) {
        *self = Self::new(self.variant());
    }

    fn check_current_step(&self) -> Result<(), TrainflowError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TrainflowError::StepIncomplete {
                step: self.current_kind(),
                missing,
            })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
