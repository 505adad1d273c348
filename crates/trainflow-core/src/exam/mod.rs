//! # Exam Module
//!
//! Single-choice exams and their grading.
//!
//! - [`ExamDefinition`]: validated, immutable set of questions plus the
//!   passing threshold
//! - [`ExamAttempt`]: one candidate's answers, keyed by question id
//! - [`grade`]: pure scoring of an attempt against a definition
//! - [`ExamSession`]: the answering / graded / retake flow around them
//!
//! Scoring uses integer arithmetic only. All questions weigh the same,
//! there is no partial credit and no negative marking.

mod session;

pub use session::{ExamPhase, ExamSession, RetakePolicy};

use crate::types::percent_round_half_up;
use crate::{QuestionId, TrainflowError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default passing threshold, in percent.
pub const DEFAULT_PASSING_SCORE: u8 = 70;

/// Minimum number of options per question.
pub const MIN_OPTIONS: usize = 2;

// =============================================================================
// QUESTION
// =============================================================================

/// A single-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_option: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Create a question without an explanation.
    pub fn new<I, S>(id: QuestionId, prompt: impl Into<String>, options: I, correct: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option: correct,
            explanation: None,
        }
    }

    /// Attach an explanation shown after grading.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Whether `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

// =============================================================================
// EXAM DEFINITION
// =============================================================================

/// A validated exam.
///
/// Invariants checked at construction:
/// - at least one question
/// - question ids are unique
/// - every question has at least [`MIN_OPTIONS`] options
/// - every correct index points into its options
/// - the threshold is at most 100
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamDefinition {
    title: String,
    questions: Vec<Question>,
    passing_score_percent: u8,
}

impl ExamDefinition {
    /// Create an exam with the default 70% threshold.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, TrainflowError> {
        Self::with_passing_score(title, questions, DEFAULT_PASSING_SCORE)
    }

    /// Create an exam with an explicit threshold.
    pub fn with_passing_score(
        title: impl Into<String>,
        questions: Vec<Question>,
        passing_score_percent: u8,
    ) -> Result<Self, TrainflowError> {
        if questions.is_empty() {
            return Err(TrainflowError::InvalidExam(
                "an exam needs at least one question".to_string(),
            ));
        }
        if passing_score_percent > 100 {
            return Err(TrainflowError::InvalidExam(format!(
                "passing score {} exceeds 100",
                passing_score_percent
            )));
        }

        let mut seen = BTreeSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(TrainflowError::InvalidExam(format!(
                    "duplicate question id {}",
                    q.id
                )));
            }
            if q.options.len() < MIN_OPTIONS {
                return Err(TrainflowError::InvalidExam(format!(
                    "question {} has {} options, needs at least {}",
                    q.id,
                    q.options.len(),
                    MIN_OPTIONS
                )));
            }
            if q.correct_option >= q.options.len() {
                return Err(TrainflowError::InvalidExam(format!(
                    "question {} marks option {} correct but has {} options",
                    q.id,
                    q.correct_option,
                    q.options.len()
                )));
            }
        }

        Ok(Self {
            title: title.into(),
            questions,
            passing_score_percent,
        })
    }

    /// Exam title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Questions in display order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Passing threshold in percent.
    #[must_use]
    pub fn passing_score_percent(&self) -> u8 {
        self.passing_score_percent
    }

    /// Look up a question by id.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether the attempt has an answer for every question.
    #[must_use]
    pub fn is_complete(&self, attempt: &ExamAttempt) -> bool {
        self.questions
            .iter()
            .all(|q| attempt.answers.contains_key(&q.id))
    }

    /// Number of questions the attempt has answered.
    #[must_use]
    pub fn answered_count(&self, attempt: &ExamAttempt) -> usize {
        self.questions
            .iter()
            .filter(|q| attempt.answers.contains_key(&q.id))
            .count()
    }
}

// =============================================================================
// ATTEMPT & RESULT
// =============================================================================

/// One sitting's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAttempt {
    /// Selected option per question id.
    pub answers: BTreeMap<QuestionId, usize>,
    /// 1-based attempt counter.
    pub attempt_number: u32,
}

impl Default for ExamAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamAttempt {
    /// Create the first, empty attempt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
            attempt_number: 1,
        }
    }

    /// Record (or replace) the answer for a question.
    pub fn select(&mut self, question: QuestionId, option: usize) {
        self.answers.insert(question, option);
    }

    /// Selected option for a question, if any.
    #[must_use]
    pub fn answer(&self, question: QuestionId) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Start the next attempt with no answers.
    #[must_use]
    pub fn next_attempt(&self) -> Self {
        Self {
            answers: BTreeMap::new(),
            attempt_number: self.attempt_number.saturating_add(1),
        }
    }
}

/// Outcome of grading one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    pub correct_count: usize,
    pub total_questions: usize,
    /// Rounded half up to the nearest integer.
    pub score_percent: u8,
    pub passed: bool,
}

// =============================================================================
// GRADING
// =============================================================================

/// Grade an attempt.
///
/// A missing answer counts as incorrect. The score is
/// `round_half_up(100 * correct / total)` and the attempt passes when the
/// score is at least the threshold.
#[must_use]
pub fn grade(definition: &ExamDefinition, attempt: &ExamAttempt) -> ExamResult {
    let total_questions = definition.questions.len();
    let correct_count = definition
        .questions
        .iter()
        .filter(|q| attempt.answer(q.id).is_some_and(|a| q.is_correct(a)))
        .count();
    let score_percent = percent_round_half_up(correct_count, total_questions);

    ExamResult {
        correct_count,
        total_questions,
        score_percent,
        passed: score_percent >= definition.passing_score_percent,
    }
}

// =============================================================================
// TESTS
// =============================================================================
