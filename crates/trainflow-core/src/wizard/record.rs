//! # Finalized Training Record
//!
//! What a successful wizard submission produces: the form fields with
//! catalog lookups resolved and a creation timestamp.

use super::form::TrainingForm;
use super::step::WizardVariant;
use crate::catalog::{Catalog, Employee, TrainingStatus, TrainingTemplate};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// AI content the training asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    pub ai_prompt: String,
    pub generate_document: bool,
    pub generate_exam: bool,
}

impl GenerationPlan {
    /// Names of the requested artifacts, in display order.
    #[must_use]
    pub fn requested_content(&self) -> Vec<&'static str> {
        let mut content = Vec::new();
        if self.generate_document {
            content.push("document");
        }
        if self.generate_exam {
            content.push("exam");
        }
        content
    }
}

/// A submitted training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTraining {
    pub variant: WizardVariant,
    pub name: String,
    pub description: String,
    pub department: String,
    pub duration: String,
    /// Template id as entered.
    pub template_id: String,
    /// Resolved template; `None` when the id is not in the catalog.
    pub template: Option<TrainingTemplate>,
    /// Resolved participants in catalog order.
    pub employees: Vec<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationPlan>,
    pub created_at: Timestamp,
    pub status: TrainingStatus,
}

impl FinalizedTraining {
    pub(crate) fn from_form(form: &TrainingForm, catalog: &Catalog, created_at: Timestamp) -> Self {
        let base = form.base();
        let template = catalog
            .template(&crate::TemplateId::new(base.template.clone()))
            .cloned();
        let generation = form.ai().map(|ai| GenerationPlan {
            ai_prompt: ai.ai_prompt.clone(),
            generate_document: ai.generate_document,
            generate_exam: ai.generate_exam,
        });

        Self {
            variant: form.variant(),
            name: base.name.clone(),
            description: base.description.clone(),
            department: base.department.clone(),
            duration: base.duration.clone(),
            template_id: base.template.clone(),
            template,
            employees: catalog.resolve_employees(&base.selected_employees),
            generation,
            created_at,
            status: TrainingStatus::InProgress,
        }
    }

    /// One-line confirmation for the caller's notification.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "\"{}\" was created for {} employee(s).",
            self.name,
            self.employees.len()
        );
        if let Some(plan) = &self.generation {
            let content = plan.requested_content();
            if !content.is_empty() {
                line.push_str(&format!(" Generating: {}.", content.join(" and ")));
            }
        }
        line
    }
}
