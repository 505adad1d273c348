//! # Property-Based Tests
//!
//! Invariants of the wizard controller and the exam grader, checked over
//! random event sequences and random attempts.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;
use trainflow_core::{
    ExamAttempt, ExamDefinition, Field, FieldValue, Question, QuestionId, WizardController,
    WizardEvent, WizardVariant, grade,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn variant_strategy() -> impl Strategy<Value = WizardVariant> {
    prop_oneof![Just(WizardVariant::Basic), Just(WizardVariant::AiAssisted)]
}

fn event_strategy() -> impl Strategy<Value = WizardEvent> {
    let text_field = select(vec![
        Field::Name,
        Field::Department,
        Field::Template,
        Field::AiPrompt,
        Field::Description,
    ]);
    let text_value = select(vec!["", "Safety", "tech"]);

    prop_oneof![
        (text_field, text_value).prop_map(|(field, v)| WizardEvent::Set {
            field,
            value: FieldValue::Text(v.to_string()),
        }),
        select(vec!["1", "2", "3", "4"]).prop_map(|item| WizardEvent::Toggle {
            field: Field::SelectedEmployees,
            item: item.to_string(),
        }),
        Just(WizardEvent::Next),
        Just(WizardEvent::Next),
        Just(WizardEvent::Previous),
    ]
}

/// An exam with `correct.len()` questions of four options each.
fn exam_with_key(correct: &[usize], passing: u8) -> ExamDefinition {
    let questions = correct
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            Question::new(
                QuestionId(i as u32 + 1),
                format!("Question {}", i + 1),
                ["a", "b", "c", "d"],
                c,
            )
        })
        .collect();
    ExamDefinition::with_passing_score("Generated", questions, passing).expect("valid exam")
}

// =============================================================================
// WIZARD PROPERTIES
// =============================================================================

proptest! {
    /// The step index stays in [1, N] whatever events arrive.
    #[test]
    fn step_index_stays_in_bounds(
        variant in variant_strategy(),
        events in vec(event_strategy(), 0..60)
    ) {
        let mut wizard = WizardController::new(variant);
        let n = wizard.step_count();

        for event in events {
            let _ = wizard.apply(event);
            prop_assert!(wizard.current_step() >= 1);
            prop_assert!(wizard.current_step() <= n);
        }
    }

    /// `go_next` only succeeds past a satisfied step, and a rejected
    /// transition leaves the controller untouched.
    #[test]
    fn next_is_gated_by_current_step(
        variant in variant_strategy(),
        events in vec(event_strategy(), 0..60)
    ) {
        let mut wizard = WizardController::new(variant);

        for event in events {
            let before = wizard.clone();
            let allowed = before.can_advance();

            match wizard.apply(event.clone()) {
                Ok(()) if event == WizardEvent::Next => {
                    prop_assert!(allowed);
                    prop_assert_eq!(wizard.current_step(), before.current_step() + 1);
                }
                Ok(()) => {}
                Err(_) => prop_assert_eq!(&wizard, &before),
            }
        }
    }

    /// `go_previous` never goes below step 1 and never validates.
    #[test]
    fn previous_always_works_above_first_step(
        variant in variant_strategy(),
        events in vec(event_strategy(), 0..40)
    ) {
        let mut wizard = WizardController::new(variant);
        for event in events {
            let _ = wizard.apply(event);
        }

        let step = wizard.current_step();
        let result = wizard.go_previous();
        if step > 1 {
            prop_assert_eq!(result.ok(), Some(step - 1));
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(wizard.current_step(), 1);
        }
    }

    /// Toggling the same id twice restores the form.
    #[test]
    fn double_toggle_is_identity(
        variant in variant_strategy(),
        events in vec(event_strategy(), 0..30),
        item in select(vec!["1", "2", "3", "4", "99"])
    ) {
        let mut wizard = WizardController::new(variant);
        for event in events {
            let _ = wizard.apply(event);
        }

        let before = wizard.form().clone();
        wizard.toggle_selection(Field::SelectedEmployees, item).expect("toggle");
        wizard.toggle_selection(Field::SelectedEmployees, item).expect("toggle");
        prop_assert_eq!(wizard.form(), &before);
    }
}

// =============================================================================
// GRADING PROPERTIES
// =============================================================================

proptest! {
    /// Score is bounded and `passed` follows the threshold exactly.
    #[test]
    fn score_is_bounded_and_pass_follows_threshold(
        key in vec(0usize..4, 1..20),
        answers in vec(0usize..4, 20),
        passing in 0u8..=100
    ) {
        let exam = exam_with_key(&key, passing);
        let mut attempt = ExamAttempt::new();
        for (i, answer) in answers.iter().take(key.len()).enumerate() {
            attempt.select(QuestionId(i as u32 + 1), *answer);
        }

        let result = grade(&exam, &attempt);
        prop_assert!(result.score_percent <= 100);
        prop_assert!(result.correct_count <= result.total_questions);
        prop_assert_eq!(result.total_questions, key.len());
        prop_assert_eq!(result.passed, result.score_percent >= passing);
    }

    /// Grading does not depend on the order answers were given.
    #[test]
    fn grading_is_order_independent(
        key in vec(0usize..4, 1..15),
        answers in vec(0usize..4, 15)
    ) {
        let exam = exam_with_key(&key, 70);
        let pairs: Vec<(QuestionId, usize)> = answers
            .iter()
            .take(key.len())
            .enumerate()
            .map(|(i, &a)| (QuestionId(i as u32 + 1), a))
            .collect();

        let mut forward = ExamAttempt::new();
        for (q, a) in &pairs {
            forward.select(*q, *a);
        }
        let mut backward = ExamAttempt::new();
        for (q, a) in pairs.iter().rev() {
            backward.select(*q, *a);
        }

        prop_assert_eq!(grade(&exam, &forward), grade(&exam, &backward));
        prop_assert_eq!(grade(&exam, &forward), grade(&exam, &forward));
    }

    /// Answering the key exactly always scores 100.
    #[test]
    fn answer_key_scores_full_marks(key in vec(0usize..4, 1..20)) {
        let exam = exam_with_key(&key, 70);
        let mut attempt = ExamAttempt::new();
        for (i, &c) in key.iter().enumerate() {
            attempt.select(QuestionId(i as u32 + 1), c);
        }

        let result = grade(&exam, &attempt);
        prop_assert_eq!(result.score_percent, 100);
        prop_assert!(result.passed);
    }

    /// Fixing a wrong answer never lowers the score.
    #[test]
    fn correcting_an_answer_is_monotonic(
        key in vec(0usize..4, 1..15),
        answers in vec(0usize..4, 15),
        pick in any::<prop::sample::Index>()
    ) {
        let exam = exam_with_key(&key, 70);
        let mut attempt = ExamAttempt::new();
        for (i, answer) in answers.iter().take(key.len()).enumerate() {
            attempt.select(QuestionId(i as u32 + 1), *answer);
        }
        let before = grade(&exam, &attempt);

        let i = pick.index(key.len());
        attempt.select(QuestionId(i as u32 + 1), key[i]);
        let after = grade(&exam, &attempt);

        prop_assert!(after.score_percent >= before.score_percent);
        prop_assert!(after.correct_count >= before.correct_count);
    }
}
