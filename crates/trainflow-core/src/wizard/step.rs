//! # Wizard Steps
//!
//! Step sequences per variant and the required-field predicate table.
//!
//! | Step | Basic | AI-assisted |
//! |------|-------|-------------|
//! | Details | name, department | name, department, ai_prompt |
//! | Content options | - | none |
//! | Template | template | template |
//! | Participants | selected_employees | selected_employees |
//!
//! The content-options step has no requirement at all: both generation
//! toggles may be off and the step can be passed with its defaults.

use super::form::{Field, TrainingForm};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// VARIANT
// =============================================================================

/// Which wizard is running. Chosen once at wizard start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardVariant {
    /// Details, template, participants.
    Basic,
    /// Details with an AI prompt, content options, template, participants.
    #[serde(alias = "ai")]
    AiAssisted,
}

const BASIC_STEPS: &[StepKind] = &[StepKind::Details, StepKind::Template, StepKind::Participants];

const AI_STEPS: &[StepKind] = &[
    StepKind::Details,
    StepKind::ContentOptions,
    StepKind::Template,
    StepKind::Participants,
];

impl WizardVariant {
    /// Steps in order.
    #[must_use]
    pub fn steps(self) -> &'static [StepKind] {
        match self {
            WizardVariant::Basic => BASIC_STEPS,
            WizardVariant::AiAssisted => AI_STEPS,
        }
    }

    /// Number of steps (N).
    #[must_use]
    pub fn step_count(self) -> usize {
        self.steps().len()
    }
}

// =============================================================================
// STEP KIND & PREDICATE TABLE
// =============================================================================

/// What a wizard step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Details,
    ContentOptions,
    Template,
    Participants,
}

const BASIC_DETAILS: &[Field] = &[Field::Name, Field::Department];
const AI_DETAILS: &[Field] = &[Field::Name, Field::Department, Field::AiPrompt];
const TEMPLATE: &[Field] = &[Field::Template];
const PARTICIPANTS: &[Field] = &[Field::SelectedEmployees];
const NO_REQUIREMENT: &[Field] = &[];

impl StepKind {
    /// Step title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Details => "Training details",
            StepKind::ContentOptions => "Content options",
            StepKind::Template => "Template",
            StepKind::Participants => "Participants",
        }
    }

    /// Fields that must be filled before leaving this step.
    #[must_use]
    pub fn required_fields(self, variant: WizardVariant) -> &'static [Field] {
        match (self, variant) {
            (StepKind::Details, WizardVariant::Basic) => BASIC_DETAILS,
            (StepKind::Details, WizardVariant::AiAssisted) => AI_DETAILS,
            (StepKind::ContentOptions, _) => NO_REQUIREMENT,
            (StepKind::Template, _) => TEMPLATE,
            (StepKind::Participants, _) => PARTICIPANTS,
        }
    }

    /// Required fields that are still empty in `form`.
    #[must_use]
    pub fn missing_fields(self, form: &TrainingForm) -> Vec<Field> {
        self.required_fields(form.variant())
            .iter()
            .copied()
            .filter(|f| !form.is_filled(*f))
            .collect()
    }

    /// The step's required-field predicate.
    #[must_use]
    pub fn is_satisfied(self, form: &TrainingForm) -> bool {
        self.required_fields(form.variant())
            .iter()
            .all(|f| form.is_filled(*f))
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// TESTS
// =============================================================================
