//! # Wizard Forms
//!
//! Closed, typed form payloads, one per wizard variant.
//!
//! Fields are addressed through the [`Field`] enum and written with a
//! [`FieldValue`]. Writes never validate content; only the value kind is
//! checked against the field. Content rules live in the step predicate
//! table (see `step.rs`).

use super::step::WizardVariant;
use crate::{EmployeeId, TrainflowError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// FIELDS & VALUES
// =============================================================================

/// Every field a wizard form can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Description,
    Department,
    Template,
    Duration,
    SelectedEmployees,
    AiPrompt,
    GenerateDocument,
    GenerateExam,
}

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    Selection,
}

impl FieldKind {
    fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Flag => "flag",
            FieldKind::Selection => "selection",
        }
    }
}

impl Field {
    /// The value kind this field accepts.
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Name
            | Field::Description
            | Field::Department
            | Field::Template
            | Field::Duration
            | Field::AiPrompt => FieldKind::Text,
            Field::GenerateDocument | Field::GenerateExam => FieldKind::Flag,
            Field::SelectedEmployees => FieldKind::Selection,
        }
    }

    /// Whether the field exists in the given variant.
    #[must_use]
    pub fn belongs_to(self, variant: WizardVariant) -> bool {
        match self {
            Field::AiPrompt | Field::GenerateDocument | Field::GenerateExam => {
                variant == WizardVariant::AiAssisted
            }
            _ => true,
        }
    }
}

/// A value written into a form field.
///
/// Untagged so scripts can write `"text"`, `true` or `["1", "2"]` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    Selection(BTreeSet<String>),
}

impl FieldValue {
    /// Shorthand for a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

// =============================================================================
// FORM PAYLOADS
// =============================================================================

/// Fields shared by every training wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasicTrainingForm {
    pub name: String,
    pub description: String,
    pub department: String,
    /// Template id chosen on the template step.
    pub template: String,
    pub duration: String,
    pub selected_employees: BTreeSet<EmployeeId>,
}

/// The AI-assisted wizard: basic fields plus a prompt and content toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTrainingForm {
    #[serde(flatten)]
    pub base: BasicTrainingForm,
    pub ai_prompt: String,
    pub generate_document: bool,
    pub generate_exam: bool,
}

impl Default for AiTrainingForm {
    fn default() -> Self {
        Self {
            base: BasicTrainingForm::default(),
            ai_prompt: String::new(),
            generate_document: true,
            generate_exam: true,
        }
    }
}

/// The form of one wizard run, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum TrainingForm {
    Basic(BasicTrainingForm),
    AiAssisted(AiTrainingForm),
}

impl TrainingForm {
    /// A form with default values for the variant.
    #[must_use]
    pub fn empty(variant: WizardVariant) -> Self {
        match variant {
            WizardVariant::Basic => TrainingForm::Basic(BasicTrainingForm::default()),
            WizardVariant::AiAssisted => TrainingForm::AiAssisted(AiTrainingForm::default()),
        }
    }

    #[must_use]
    pub fn variant(&self) -> WizardVariant {
        match self {
            TrainingForm::Basic(_) => WizardVariant::Basic,
            TrainingForm::AiAssisted(_) => WizardVariant::AiAssisted,
        }
    }

    /// The shared fields.
    #[must_use]
    pub fn base(&self) -> &BasicTrainingForm {
        match self {
            TrainingForm::Basic(f) => f,
            TrainingForm::AiAssisted(f) => &f.base,
        }
    }

    fn base_mut(&mut self) -> &mut BasicTrainingForm {
        match self {
            TrainingForm::Basic(f) => f,
            TrainingForm::AiAssisted(f) => &mut f.base,
        }
    }

    /// The AI-specific fields, if this is an AI-assisted form.
    #[must_use]
    pub fn ai(&self) -> Option<&AiTrainingForm> {
        match self {
            TrainingForm::AiAssisted(f) => Some(f),
            TrainingForm::Basic(_) => None,
        }
    }

    /// Whether a field holds a usable value.
    ///
    /// Text must have at least one character and a selection at least one
    /// id. Flags always count as present. Fields outside the variant never
    /// do.
    #[must_use]
    pub fn is_filled(&self, field: Field) -> bool {
        if !field.belongs_to(self.variant()) {
            return false;
        }
        match field.kind() {
            FieldKind::Flag => true,
            FieldKind::Selection => !self.base().selected_employees.is_empty(),
            FieldKind::Text => self.text(field).is_some_and(|s| !s.is_empty()),
        }
    }

    /// Read a text field.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        let base = self.base();
        let value = match field {
            Field::Name => &base.name,
            Field::Description => &base.description,
            Field::Department => &base.department,
            Field::Template => &base.template,
            Field::Duration => &base.duration,
            Field::AiPrompt => &self.ai()?.ai_prompt,
            Field::SelectedEmployees | Field::GenerateDocument | Field::GenerateExam => {
                return None;
            }
        };
        Some(value.as_str())
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), TrainflowError> {
        if !field.belongs_to(self.variant()) {
            return Err(TrainflowError::UnknownField(field));
        }
        let mismatch = || TrainflowError::FieldTypeMismatch {
            field,
            expected: field.kind().label(),
        };

        match (field.kind(), value) {
            (FieldKind::Text, FieldValue::Text(s)) => {
                *self.text_slot(field).ok_or_else(mismatch)? = s;
            }
            (FieldKind::Flag, FieldValue::Flag(b)) => {
                *self.flag_slot(field).ok_or_else(mismatch)? = b;
            }
            (FieldKind::Selection, FieldValue::Selection(ids)) => {
                self.base_mut().selected_employees = ids.into_iter().map(EmployeeId).collect();
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// Add `item` to a selection field if absent, remove it if present.
    ///
    /// Returns whether the item is selected afterwards.
    pub fn toggle(&mut self, field: Field, item: &str) -> Result<bool, TrainflowError> {
        if field.kind() != FieldKind::Selection {
            return Err(TrainflowError::FieldTypeMismatch {
                field,
                expected: FieldKind::Selection.label(),
            });
        }
        let selection = &mut self.base_mut().selected_employees;
        let id = EmployeeId::new(item);
        if selection.remove(&id) {
            Ok(false)
        } else {
            selection.insert(id);
            Ok(true)
        }
    }

    fn text_slot(&mut self, field: Field) -> Option<&mut String> {
        if field == Field::AiPrompt {
            return match self {
                TrainingForm::AiAssisted(f) => Some(&mut f.ai_prompt),
                TrainingForm::Basic(_) => None,
            };
        }
        let base = self.base_mut();
        match field {
            Field::Name => Some(&mut base.name),
            Field::Description => Some(&mut base.description),
            Field::Department => Some(&mut base.department),
            Field::Template => Some(&mut base.template),
            Field::Duration => Some(&mut base.duration),
            _ => None,
        }
    }

    fn flag_slot(&mut self, field: Field) -> Option<&mut bool> {
        match (self, field) {
            (TrainingForm::AiAssisted(f), Field::GenerateDocument) => Some(&mut f.generate_document),
            (TrainingForm::AiAssisted(f), Field::GenerateExam) => Some(&mut f.generate_exam),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
