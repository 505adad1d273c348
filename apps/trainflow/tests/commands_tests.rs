//! Tests for the exam command helpers.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::time::Duration;
use trainflow::cli::{generation_eta, grade_attempts, load_exam, parse_answers};
use trainflow::config::Config;
use trainflow_core::{ExamPhase, GenerationTicker, QuestionId, TrainflowError};

// =============================================================================
// ANSWER PARSING
// =============================================================================

#[test]
fn test_parse_answers() {
    let answers = parse_answers("1=1, 2=0,3=2,").unwrap();
    assert_eq!(
        answers,
        vec![(QuestionId(1), 1), (QuestionId(2), 0), (QuestionId(3), 2)]
    );
}

#[test]
fn test_parse_answers_rejects_garbage() {
    for input in ["1", "a=1", "1=b", "1=-1"] {
        let err = parse_answers(input).unwrap_err();
        assert!(matches!(err, TrainflowError::SerializationError(_)), "{input}");
    }
}

// =============================================================================
// EXAM LOADING
// =============================================================================

#[test]
fn test_sample_exam_uses_configured_threshold() {
    let mut config = Config::default();
    config.exam.passing_score_percent = 60;

    let exam = load_exam(&config, None).unwrap();
    assert_eq!(exam.questions().len(), 3);
    assert_eq!(exam.passing_score_percent(), 60);
}

#[test]
fn test_exam_file_threshold_overrides_config() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
  "title": "Hygiene",
  "passing_score_percent": 50,
  "questions": [
    {{ "id": 1, "prompt": "Wash hands?", "options": ["No", "Yes"], "correct_option": 1 }},
    {{ "id": 2, "prompt": "How long?", "options": ["5s", "20s"], "correct_option": 1,
       "explanation": "At least twenty seconds." }}
  ]
}}"#
    )
    .unwrap();

    let exam = load_exam(&Config::default(), Some(file.path())).unwrap();
    assert_eq!(exam.title(), "Hygiene");
    assert_eq!(exam.passing_score_percent(), 50);
    assert!(exam.questions()[1].explanation.is_some());
}

#[test]
fn test_invalid_exam_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{ "title": "Broken", "questions": [
            {{ "id": 1, "prompt": "?", "options": ["only one"], "correct_option": 0 }}
        ] }}"#
    )
    .unwrap();

    let err = load_exam(&Config::default(), Some(file.path())).unwrap_err();
    assert!(matches!(err, TrainflowError::InvalidExam(_)));
}

// =============================================================================
// GRADING FLOW
// =============================================================================

#[test]
fn test_fail_then_pass_on_retake() {
    let config = Config::default();
    let exam = load_exam(&config, None).unwrap();
    let attempts = vec![
        parse_answers("1=0,2=1,3=2").unwrap(),
        parse_answers("1=1,2=1,3=2").unwrap(),
    ];

    let run = grade_attempts(&config, exam, &attempts);
    assert!(run.error.is_none());
    let (results, session) = (run.results, run.session);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score_percent, 67);
    assert!(!results[0].passed);
    assert_eq!(results[1].score_percent, 100);
    assert!(matches!(session.phase(), ExamPhase::Completed(_)));
    assert_eq!(session.attempt().attempt_number, 2);
}

#[test]
fn test_attempts_after_pass_are_ignored() {
    let config = Config::default();
    let exam = load_exam(&config, None).unwrap();
    let attempts = vec![
        parse_answers("1=1,2=1,3=2").unwrap(),
        parse_answers("1=0,2=0,3=0").unwrap(),
    ];

    let run = grade_attempts(&config, exam, &attempts);
    assert!(run.error.is_none());
    assert_eq!(run.results.len(), 1);
    assert!(run.session.phase().is_terminal());
}

#[test]
fn test_retake_limit_from_config() {
    let mut config = Config::default();
    config.exam.max_attempts = Some(1);
    let exam = load_exam(&config, None).unwrap();
    let attempts = vec![
        parse_answers("1=0,2=0,3=0").unwrap(),
        parse_answers("1=1,2=1,3=2").unwrap(),
    ];

    let run = grade_attempts(&config, exam, &attempts);
    assert_eq!(run.error, Some(TrainflowError::AttemptLimitReached(1)));
}

#[test]
fn test_retake_limit_keeps_graded_attempts() {
    let mut config = Config::default();
    config.exam.max_attempts = Some(2);
    let exam = load_exam(&config, None).unwrap();
    let attempts = vec![
        parse_answers("1=0,2=0,3=0").unwrap(),
        parse_answers("1=0,2=1,3=2").unwrap(),
        parse_answers("1=1,2=1,3=2").unwrap(),
    ];

    let run = grade_attempts(&config, exam, &attempts);
    assert_eq!(run.error, Some(TrainflowError::AttemptLimitReached(2)));
    let scores: Vec<u8> = run.results.iter().map(|r| r.score_percent).collect();
    assert_eq!(scores, vec![0, 67]);
    assert!(run.session.result().is_some());
    assert!(!run.session.phase().is_terminal());
}

#[test]
fn test_incomplete_attempt_is_rejected() {
    let config = Config::default();
    let exam = load_exam(&config, None).unwrap();
    let attempts = vec![parse_answers("1=1").unwrap()];

    let run = grade_attempts(&config, exam, &attempts);
    assert!(run.results.is_empty());
    assert_eq!(
        run.error,
        Some(TrainflowError::IncompleteAttempt {
            answered: 1,
            total: 3
        })
    );
}

// =============================================================================
// GENERATION
// =============================================================================

#[test]
fn test_generation_eta_follows_config() {
    let mut config = Config::default();
    let ticker = GenerationTicker::new(config.generation.step_percent);
    assert_eq!(generation_eta(&config, &ticker), Duration::from_secs(5));

    config.generation.tick_ms = 100;
    let coarse = GenerationTicker::new(25);
    assert_eq!(generation_eta(&config, &coarse), Duration::from_millis(400));
}
