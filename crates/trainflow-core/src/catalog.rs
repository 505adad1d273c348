//! # Catalog Module
//!
//! The seeded sample records TrainFlow works with: training templates,
//! employees, departments, the admin dashboard training list, the trainings
//! assigned to the signed-in employee and the workplace-safety training used
//! by the viewer.
//!
//! A `Catalog` is owned by whoever drives a session and is passed
//! explicitly to the operations that need lookups. There is no
//! process-wide instance.

use crate::exam::{ExamDefinition, Question};
use crate::progress::{TrainingModule, TrainingOutline};
use crate::types::mean_percent_round_half_up;
use crate::{EmployeeId, QuestionId, TemplateId, TrainflowError, TrainingId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// RECORDS
// =============================================================================

/// A reusable training template offered by the wizard's template step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub topics: Vec<String>,
}

/// An employee who can be assigned to a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub role: String,
}

/// A department option for the wizard's details step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Value stored in the form.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// Lifecycle status of a training as shown on the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Planned,
    NotStarted,
    InProgress,
    Completed,
}

impl TrainingStatus {
    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TrainingStatus::Planned => "Planned",
            TrainingStatus::NotStarted => "Not started",
            TrainingStatus::InProgress => "In progress",
            TrainingStatus::Completed => "Completed",
        }
    }
}

/// A training entry on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTraining {
    pub id: TrainingId,
    pub title: String,
    pub department: String,
    pub status: TrainingStatus,
    pub participants: u32,
    pub completion_percent: u8,
    /// ISO date (`YYYY-MM-DD`).
    pub created_on: String,
}

/// Counts over the dashboard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub planned: usize,
    pub not_started: usize,
    pub participants: u32,
}

/// Where an employee stands on a training's exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    NotStarted,
    Pending,
    Approved,
}

/// A training assigned to the signed-in employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAssignment {
    pub id: TrainingId,
    pub title: String,
    pub description: String,
    pub department: String,
    pub status: TrainingStatus,
    pub progress_percent: u8,
    pub time_remaining: String,
    /// ISO date (`YYYY-MM-DD`).
    pub due_on: String,
    pub has_document: bool,
    pub has_exam: bool,
    pub exam_status: ExamStatus,
}

/// Counts and mean progress over an employee's assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub not_started: usize,
    /// Mean of the assignment progress values, rounded half up.
    pub overall_progress: u8,
}

// =============================================================================
// CATALOG
// =============================================================================

/// Owned, in-memory sample data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<TrainingTemplate>,
    pub employees: Vec<Employee>,
    pub departments: Vec<Department>,
    pub trainings: Vec<DashboardTraining>,
    #[serde(default)]
    pub assignments: Vec<EmployeeAssignment>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample catalog seeded with the platform's demo records.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            templates: sample_templates(),
            employees: sample_employees(),
            departments: sample_departments(),
            trainings: sample_trainings(),
            assignments: sample_assignments(),
        }
    }

    /// Look up a template by id.
    #[must_use]
    pub fn template(&self, id: &TemplateId) -> Option<&TrainingTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// Look up an employee by id.
    #[must_use]
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Resolve a selection of employee ids to their records.
    ///
    /// Records come back in catalog order. Unknown ids are skipped.
    #[must_use]
    pub fn resolve_employees(&self, selected: &BTreeSet<EmployeeId>) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|e| selected.contains(&e.id))
            .cloned()
            .collect()
    }

    /// Employees belonging to a department (case-insensitive match).
    #[must_use]
    pub fn employees_in(&self, department: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.department.eq_ignore_ascii_case(department))
            .collect()
    }

    /// Dashboard trainings with the given status.
    pub fn trainings_with_status(
        &self,
        status: TrainingStatus,
    ) -> impl Iterator<Item = &DashboardTraining> {
        self.trainings.iter().filter(move |t| t.status == status)
    }

    /// Count trainings per status and sum participants.
    #[must_use]
    pub fn dashboard_summary(&self) -> DashboardSummary {
        let mut summary = DashboardSummary {
            total: self.trainings.len(),
            ..DashboardSummary::default()
        };
        for training in &self.trainings {
            match training.status {
                TrainingStatus::InProgress => summary.in_progress += 1,
                TrainingStatus::Completed => summary.completed += 1,
                TrainingStatus::Planned => summary.planned += 1,
                TrainingStatus::NotStarted => summary.not_started += 1,
            }
            summary.participants = summary.participants.saturating_add(training.participants);
        }
        summary
    }

    /// Employee assignments with the given status.
    pub fn assignments_with_status(
        &self,
        status: TrainingStatus,
    ) -> impl Iterator<Item = &EmployeeAssignment> {
        self.assignments.iter().filter(move |a| a.status == status)
    }

    /// Per-status counts and mean progress of the employee's assignments.
    #[must_use]
    pub fn employee_summary(&self) -> EmployeeSummary {
        let mut summary = EmployeeSummary {
            total: self.assignments.len(),
            ..EmployeeSummary::default()
        };
        for assignment in &self.assignments {
            match assignment.status {
                TrainingStatus::InProgress => summary.in_progress += 1,
                TrainingStatus::Completed => summary.completed += 1,
                TrainingStatus::NotStarted | TrainingStatus::Planned => summary.not_started += 1,
            }
        }
        let progress: Vec<u8> = self.assignments.iter().map(|a| a.progress_percent).collect();
        summary.overall_progress = mean_percent_round_half_up(&progress);
        summary
    }

    /// The workplace-safety training shown in the viewer.
    pub fn safety_training(&self) -> Result<(TrainingOutline, ExamDefinition), TrainflowError> {
        let outline = TrainingOutline {
            id: TrainingId(1),
            title: "Workplace Safety".to_string(),
            modules: vec![
                TrainingModule::new(1, "Introduction to Safety", 15, true),
                TrainingModule::new(2, "Protective Equipment", 25, true),
                TrainingModule::new(3, "Emergency Procedures", 30, false),
                TrainingModule::new(4, "Accident Prevention", 35, false),
                TrainingModule::new(5, "Review and Wrap-up", 15, false),
            ],
        };
        let exam = ExamDefinition::new(
            "Workplace Safety Assessment",
            vec![
                Question::new(
                    QuestionId(1),
                    "What is the main purpose of Personal Protective Equipment (PPE)?",
                    [
                        "Improve productivity",
                        "Protect the worker's health and physical integrity",
                        "Reduce company costs",
                        "Make the job easier",
                    ],
                    1,
                ),
                Question::new(
                    QuestionId(2),
                    "In case of fire, what should be done first?",
                    [
                        "Try to put out the fire",
                        "Sound the alarm and evacuate the area",
                        "Look for help from colleagues",
                        "Keep working",
                    ],
                    1,
                ),
                Question::new(
                    QuestionId(3),
                    "How often should safety training take place?",
                    [
                        "Once a year",
                        "Only at hiring",
                        "Periodically, as needed",
                        "Never",
                    ],
                    2,
                ),
            ],
        )?;
        Ok((outline, exam))
    }
}

fn sample_templates() -> Vec<TrainingTemplate> {
    vec![
        TrainingTemplate {
            id: TemplateId::new("safety"),
            name: "Workplace Safety".to_string(),
            description: "Complete template for occupational safety training".to_string(),
            duration: "2 hours".to_string(),
            topics: vec![
                "PPE".to_string(),
                "Emergency Procedures".to_string(),
                "Accident Prevention".to_string(),
            ],
        },
        TrainingTemplate {
            id: TemplateId::new("customer-service"),
            name: "Customer Service".to_string(),
            description: "Build relationship skills and service excellence".to_string(),
            duration: "3 hours".to_string(),
            topics: vec![
                "Effective Communication".to_string(),
                "Conflict Resolution".to_string(),
                "Customer Loyalty".to_string(),
            ],
        },
        TrainingTemplate {
            id: TemplateId::new("compliance"),
            name: "Compliance and Ethics".to_string(),
            description: "Corporate standards and ethical business conduct".to_string(),
            duration: "1.5 hours".to_string(),
            topics: vec![
                "Code of Conduct".to_string(),
                "Internal Policies".to_string(),
                "Social Responsibility".to_string(),
            ],
        },
    ]
}

fn sample_employees() -> Vec<Employee> {
    [
        ("1", "João Silva", "Sales", "Salesperson"),
        ("2", "Maria Santos", "Administration", "Analyst"),
        ("3", "Pedro Costa", "Production", "Operator"),
        ("4", "Ana Lima", "HR", "Coordinator"),
    ]
    .into_iter()
    .map(|(id, name, department, role)| Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        department: department.to_string(),
        role: role.to_string(),
    })
    .collect()
}

fn sample_departments() -> Vec<Department> {
    [
        ("general", "General"),
        ("sales", "Sales"),
        ("production", "Production"),
        ("administration", "Administration"),
        ("hr", "Human Resources"),
    ]
    .into_iter()
    .map(|(id, label)| Department {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

fn sample_trainings() -> Vec<DashboardTraining> {
    vec![
        DashboardTraining {
            id: TrainingId(1),
            title: "Workplace Safety".to_string(),
            department: "General".to_string(),
            status: TrainingStatus::InProgress,
            participants: 25,
            completion_percent: 80,
            created_on: "2024-01-15".to_string(),
        },
        DashboardTraining {
            id: TrainingId(2),
            title: "Customer Service".to_string(),
            department: "Sales".to_string(),
            status: TrainingStatus::Completed,
            participants: 12,
            completion_percent: 100,
            created_on: "2024-01-10".to_string(),
        },
        DashboardTraining {
            id: TrainingId(3),
            title: "Corporate Compliance".to_string(),
            department: "Administration".to_string(),
            status: TrainingStatus::Planned,
            participants: 8,
            completion_percent: 0,
            created_on: "2024-01-20".to_string(),
        },
    ]
}

fn sample_assignments() -> Vec<EmployeeAssignment> {
    [
        (
            1,
            "Workplace Safety",
            "Essential training on safety rules and accident prevention",
            "General",
            TrainingStatus::InProgress,
            75,
            "2 hours",
            "2024-01-25",
            ExamStatus::Pending,
        ),
        (
            2,
            "AI-Assisted Consultative Selling",
            "Modern sales techniques using artificial intelligence",
            "Sales",
            TrainingStatus::NotStarted,
            0,
            "4 hours",
            "2024-02-01",
            ExamStatus::NotStarted,
        ),
        (
            3,
            "Corporate Compliance",
            "Company compliance policies and procedures",
            "Administration",
            TrainingStatus::Completed,
            100,
            "0 hours",
            "2024-01-15",
            ExamStatus::Approved,
        ),
    ]
    .into_iter()
    .map(
        |(id, title, description, department, status, progress, remaining, due, exam)| {
            EmployeeAssignment {
                id: TrainingId(id),
                title: title.to_string(),
                description: description.to_string(),
                department: department.to_string(),
                status,
                progress_percent: progress,
                time_remaining: remaining.to_string(),
                due_on: due.to_string(),
                has_document: true,
                has_exam: true,
                exam_status: exam,
            }
        },
    )
    .collect()
}

// =============================================================================
// TESTS
// =============================================================================
