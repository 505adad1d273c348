//! # Exam Session
//!
//! The exam-taking flow for one candidate:
//!
//! ```text
//! Answering --(all answered)--> Submittable --submit--> Graded{passed}  --complete--> Completed
//!     ^                                                  Graded{failed}
//!     └──────────────────────── retake (full reset) ─────────┘
//! ```
//!
//! A graded attempt is never edited. A retake starts a fresh attempt with
//! no answers. The number of retakes is governed by [`RetakePolicy`],
//! unlimited by default.

use super::{ExamAttempt, ExamDefinition, ExamResult, grade};
use crate::{QuestionId, TrainflowError};
use serde::{Deserialize, Serialize};

// =============================================================================
// PHASE & POLICY
// =============================================================================

/// Where the session is in the exam-taking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ExamPhase {
    /// Initial phase; some questions are unanswered.
    Answering,
    /// Every question has an answer; submission is enabled.
    Submittable,
    /// The attempt was graded.
    Graded(ExamResult),
    /// A passing result was accepted. Terminal.
    Completed(ExamResult),
}

impl ExamPhase {
    /// Short name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExamPhase::Answering => "answering",
            ExamPhase::Submittable => "submittable",
            ExamPhase::Graded(_) => "graded",
            ExamPhase::Completed(_) => "completed",
        }
    }

    /// Check if this phase is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExamPhase::Completed(_))
    }
}

/// How many attempts a candidate gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetakePolicy {
    /// Total attempts allowed, including the first. `None` means unlimited.
    pub max_attempts: Option<u32>,
}

impl RetakePolicy {
    /// No cap on retakes.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_attempts: None }
    }

    /// Cap the total number of attempts.
    #[must_use]
    pub const fn limited(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// Whether a candidate who has used `attempts_used` may try again.
    #[must_use]
    pub fn allows_another(&self, attempts_used: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts_used < max)
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// One candidate's pass through an exam.
#[derive(Debug, Clone)]
pub struct ExamSession {
    definition: ExamDefinition,
    attempt: ExamAttempt,
    phase: ExamPhase,
    policy: RetakePolicy,
}

impl ExamSession {
    /// Open an exam with unlimited retakes.
    #[must_use]
    pub fn new(definition: ExamDefinition) -> Self {
        Self::with_policy(definition, RetakePolicy::default())
    }

    /// Open an exam with an explicit retake policy.
    #[must_use]
    pub fn with_policy(definition: ExamDefinition, policy: RetakePolicy) -> Self {
        Self {
            definition,
            attempt: ExamAttempt::new(),
            phase: ExamPhase::Answering,
            policy,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &ExamDefinition {
        &self.definition
    }

    #[must_use]
    pub fn attempt(&self) -> &ExamAttempt {
        &self.attempt
    }

    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    /// The latest grade, if the current attempt has been graded.
    #[must_use]
    pub fn result(&self) -> Option<ExamResult> {
        match self.phase {
            ExamPhase::Graded(r) | ExamPhase::Completed(r) => Some(r),
            ExamPhase::Answering | ExamPhase::Submittable => None,
        }
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, ExamPhase::Submittable)
    }

    /// Select an option for a question.
    ///
    /// Re-selecting replaces the previous answer. Once every question has
    /// an answer the session becomes submittable.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        option: usize,
    ) -> Result<ExamPhase, TrainflowError> {
        if !matches!(self.phase, ExamPhase::Answering | ExamPhase::Submittable) {
            return Err(self.wrong_phase("answer"));
        }

        let q = self
            .definition
            .question(question)
            .ok_or(TrainflowError::UnknownQuestion(question))?;
        if option >= q.options.len() {
            return Err(TrainflowError::OptionOutOfRange {
                question,
                option,
                count: q.options.len(),
            });
        }

        self.attempt.select(question, option);
        self.phase = if self.definition.is_complete(&self.attempt) {
            ExamPhase::Submittable
        } else {
            ExamPhase::Answering
        };
        Ok(self.phase)
    }

    /// Grade the current attempt.
    pub fn submit(&mut self) -> Result<ExamResult, TrainflowError> {
        match self.phase {
            ExamPhase::Submittable => {
                let result = grade(&self.definition, &self.attempt);
                self.phase = ExamPhase::Graded(result);
                Ok(result)
            }
            ExamPhase::Answering => Err(TrainflowError::IncompleteAttempt {
                answered: self.definition.answered_count(&self.attempt),
                total: self.definition.questions().len(),
            }),
            ExamPhase::Graded(_) | ExamPhase::Completed(_) => Err(self.wrong_phase("submit")),
        }
    }

    /// Discard a failed attempt and start over with no answers.
    pub fn retake(&mut self) -> Result<u32, TrainflowError> {
        match self.phase {
            ExamPhase::Graded(result) if !result.passed => {
                let used = self.attempt.attempt_number;
                if !self.policy.allows_another(used) {
                    return Err(TrainflowError::AttemptLimitReached(used));
                }
                self.attempt = self.attempt.next_attempt();
                self.phase = ExamPhase::Answering;
                Ok(self.attempt.attempt_number)
            }
            _ => Err(self.wrong_phase("retake")),
        }
    }

    /// Accept a passing result and finish the exam.
    pub fn complete(&mut self) -> Result<ExamResult, TrainflowError> {
        match self.phase {
            ExamPhase::Graded(result) if result.passed => {
                self.phase = ExamPhase::Completed(result);
                Ok(result)
            }
            _ => Err(self.wrong_phase("complete")),
        }
    }

    fn wrong_phase(&self, action: &'static str) -> TrainflowError {
        TrainflowError::InvalidExamPhase {
            action,
            phase: self.phase.name(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::exam::Question;

    fn exam() -> ExamDefinition {
        ExamDefinition::new(
            "Safety",
            vec![
                Question::new(QuestionId(1), "q1", ["a", "b", "c", "d"], 1),
                Question::new(QuestionId(2), "q2", ["a", "b", "c", "d"], 1),
                Question::new(QuestionId(3), "q3", ["a", "b", "c", "d"], 2),
            ],
        )
        .unwrap()
    }

    fn answer_all(session: &mut ExamSession, answers: [usize; 3]) {
        for (i, a) in answers.into_iter().enumerate() {
            session.select_answer(QuestionId(i as u32 + 1), a).unwrap();
        }
    }

    #[test]
    fn becomes_submittable_only_when_all_answered() {
        let mut session = ExamSession::new(exam());
        assert_eq!(session.phase(), ExamPhase::Answering);

        session.select_answer(QuestionId(1), 1).unwrap();
        session.select_answer(QuestionId(2), 1).unwrap();
        assert!(!session.can_submit());

        let phase = session.select_answer(QuestionId(3), 2).unwrap();
        assert_eq!(phase, ExamPhase::Submittable);
        assert!(session.can_submit());
    }

    #[test]
    fn submit_before_complete_is_rejected() {
        let mut session = ExamSession::new(exam());
        session.select_answer(QuestionId(1), 1).unwrap();

        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            TrainflowError::IncompleteAttempt {
                answered: 1,
                total: 3
            }
        );
        assert_eq!(session.phase(), ExamPhase::Answering);
    }

    #[test]
    fn passing_flow_completes() {
        let mut session = ExamSession::new(exam());
        answer_all(&mut session, [1, 1, 2]);

        let result = session.submit().unwrap();
        assert!(result.passed);
        assert!(session.retake().is_err());

        let done = session.complete().unwrap();
        assert_eq!(done.score_percent, 100);
        assert!(session.phase().is_terminal());
    }

    #[test]
    fn failing_flow_allows_full_retake() {
        let mut session = ExamSession::new(exam());
        answer_all(&mut session, [0, 1, 2]);

        let result = session.submit().unwrap();
        assert_eq!(result.score_percent, 67);
        assert!(!result.passed);
        assert!(session.complete().is_err());

        let attempt = session.retake().unwrap();
        assert_eq!(attempt, 2);
        assert_eq!(session.phase(), ExamPhase::Answering);
        assert!(session.attempt().answers.is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn graded_attempt_cannot_be_edited() {
        let mut session = ExamSession::new(exam());
        answer_all(&mut session, [0, 0, 0]);
        session.submit().unwrap();

        let err = session.select_answer(QuestionId(1), 1).unwrap_err();
        assert!(matches!(err, TrainflowError::InvalidExamPhase { .. }));
        assert_eq!(session.attempt().answer(QuestionId(1)), Some(0));
    }

    #[test]
    fn unknown_question_and_bad_option_are_rejected() {
        let mut session = ExamSession::new(exam());
        assert_eq!(
            session.select_answer(QuestionId(42), 0).unwrap_err(),
            TrainflowError::UnknownQuestion(QuestionId(42))
        );
        assert!(matches!(
            session.select_answer(QuestionId(1), 4).unwrap_err(),
            TrainflowError::OptionOutOfRange { count: 4, .. }
        ));
        assert!(session.attempt().answers.is_empty());
    }

    #[test]
    fn retakes_are_unlimited_by_default() {
        let mut session = ExamSession::new(exam());
        for expected in 2..=6 {
            answer_all(&mut session, [0, 0, 0]);
            session.submit().unwrap();
            assert_eq!(session.retake().unwrap(), expected);
        }
    }

    #[test]
    fn limited_policy_stops_retakes() {
        let mut session = ExamSession::with_policy(exam(), RetakePolicy::limited(2));
        answer_all(&mut session, [0, 0, 0]);
        session.submit().unwrap();
        session.retake().unwrap();

        answer_all(&mut session, [0, 0, 0]);
        session.submit().unwrap();
        assert_eq!(
            session.retake().unwrap_err(),
            TrainflowError::AttemptLimitReached(2)
        );
    }
}
