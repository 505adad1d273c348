//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::Config;
use crate::script::WizardScript;
use crate::ticker::{GenerationOutcome, cancel_channel, cancel_on_ctrl_c, run_generation};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use trainflow_core::catalog::Catalog;
use trainflow_core::{
    AiVideoRequest, ExamDefinition, ExamResult, ExamSession, GenerationTicker, LoginForm,
    ManualUpload, NavIntent, Question, QuestionId, RegistrationForm, Role, Router, Screen,
    SessionUser, Timestamp, TrainflowError, TrainingId, VideoRecord,
};

// =============================================================================
// HELPERS
// =============================================================================

/// Maximum exam file size (1 MB).
const MAX_EXAM_FILE_SIZE: u64 = 1024 * 1024;

/// Current wall-clock time. The core never reads the clock itself.
pub fn now() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    Timestamp::from_millis(millis)
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// WIZARD COMMAND
// =============================================================================

/// Replay a wizard script against the sample catalog.
pub fn cmd_wizard(script_path: &Path, json_mode: bool) -> Result<(), TrainflowError> {
    let script = WizardScript::from_file(script_path)?;
    tracing::info!(
        "Replaying {} event(s) for the {:?} wizard",
        script.events.len(),
        script.variant
    );

    let catalog = Catalog::sample();
    let record = script.run(&catalog, now())?;

    if json_mode {
        print_json(&record);
        return Ok(());
    }

    println!("Training Created");
    println!("================");
    println!("{}", record.summary());
    println!();
    println!("Name:        {}", record.name);
    println!("Department:  {}", record.department);
    match &record.template {
        Some(template) => println!("Template:    {} ({})", template.name, template.duration),
        None => println!("Template:    {} (not in catalog)", record.template_id),
    }
    if !record.duration.is_empty() {
        println!("Duration:    {}", record.duration);
    }
    println!("Status:      {}", record.status.label());
    println!("Participants:");
    for employee in &record.employees {
        println!("  - {} ({}, {})", employee.name, employee.role, employee.department);
    }

    Ok(())
}

// =============================================================================
// EXAM COMMAND
// =============================================================================

/// Exam file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamFile {
    pub title: String,
    /// Overrides the configured threshold for this exam.
    #[serde(default)]
    pub passing_score_percent: Option<u8>,
    pub questions: Vec<Question>,
}

/// Parse `question=option` pairs separated by commas.
pub fn parse_answers(input: &str) -> Result<Vec<(QuestionId, usize)>, TrainflowError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let invalid = || {
                TrainflowError::SerializationError(format!(
                    "Invalid answer '{}', expected <question>=<option>",
                    pair
                ))
            };
            let (question, option) = pair.split_once('=').ok_or_else(invalid)?;
            let question = question.trim().parse::<u32>().map_err(|_| invalid())?;
            let option = option.trim().parse::<usize>().map_err(|_| invalid())?;
            Ok((QuestionId(question), option))
        })
        .collect()
}

/// Load the exam to grade: a file, or the sample safety exam.
pub fn load_exam(config: &Config, path: Option<&Path>) -> Result<ExamDefinition, TrainflowError> {
    let Some(path) = path else {
        let (_, sample) = Catalog::sample().safety_training()?;
        return ExamDefinition::with_passing_score(
            sample.title(),
            sample.questions().to_vec(),
            config.exam.passing_score_percent,
        );
    };

    let metadata = std::fs::metadata(path).map_err(|e| {
        TrainflowError::IoError(format!("Cannot read exam '{}': {}", path.display(), e))
    })?;
    if metadata.len() > MAX_EXAM_FILE_SIZE {
        return Err(TrainflowError::SerializationError(format!(
            "Exam size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_EXAM_FILE_SIZE
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        TrainflowError::IoError(format!("Cannot read exam '{}': {}", path.display(), e))
    })?;
    let file: ExamFile = serde_json::from_str(&content)
        .map_err(|e| TrainflowError::SerializationError(format!("Invalid exam file: {}", e)))?;

    ExamDefinition::with_passing_score(
        file.title,
        file.questions,
        file.passing_score_percent
            .unwrap_or(config.exam.passing_score_percent),
    )
}

/// Attempts graded by [`grade_attempts`].
#[derive(Debug)]
pub struct GradedAttempts {
    /// Results of every graded attempt, in order.
    pub results: Vec<ExamResult>,
    /// The session in its final state.
    pub session: ExamSession,
    /// What stopped the run early, if anything.
    pub error: Option<TrainflowError>,
}

/// Grade each attempt in turn, retaking after a failure.
///
/// Stops at the first pass or the first rejected action. Attempts graded
/// before a rejection are kept in the returned results.
pub fn grade_attempts(
    config: &Config,
    definition: ExamDefinition,
    attempts: &[Vec<(QuestionId, usize)>],
) -> GradedAttempts {
    let mut session = ExamSession::with_policy(definition, config.retake_policy());
    let mut results = Vec::new();
    let error = run_attempts(&mut session, attempts, &mut results).err();
    if let Some(e) = &error {
        tracing::warn!("Grading stopped after {} attempt(s): {}", results.len(), e);
    }

    GradedAttempts {
        results,
        session,
        error,
    }
}

fn run_attempts(
    session: &mut ExamSession,
    attempts: &[Vec<(QuestionId, usize)>],
    results: &mut Vec<ExamResult>,
) -> Result<(), TrainflowError> {
    for (index, answers) in attempts.iter().enumerate() {
        if index > 0 {
            let number = session.retake()?;
            tracing::info!("Retaking exam, attempt {}", number);
        }
        for (question, option) in answers {
            session.select_answer(*question, *option)?;
        }

        let result = session.submit()?;
        tracing::info!(
            "Attempt {}: {}/{} correct, {}%",
            session.attempt().attempt_number,
            result.correct_count,
            result.total_questions,
            result.score_percent
        );
        results.push(result);

        if result.passed {
            session.complete()?;
            let remaining = attempts.len() - index - 1;
            if remaining > 0 {
                tracing::warn!("Exam already passed, ignoring {} remaining attempt(s)", remaining);
            }
            break;
        }
    }
    Ok(())
}

/// Grade one or more attempts.
///
/// Graded attempts are always reported, also when a later one is rejected.
pub fn cmd_exam(
    config: &Config,
    exam_path: Option<&Path>,
    answers: &[String],
    json_mode: bool,
) -> Result<(), TrainflowError> {
    let definition = load_exam(config, exam_path)?;
    let attempts = answers
        .iter()
        .map(|a| parse_answers(a))
        .collect::<Result<Vec<_>, _>>()?;

    let GradedAttempts {
        results,
        session,
        error,
    } = grade_attempts(config, definition, &attempts);
    let exam = session.definition();

    if json_mode {
        let attempts: Vec<_> = results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                serde_json::json!({
                    "attempt": i + 1,
                    "correct_count": r.correct_count,
                    "total_questions": r.total_questions,
                    "score_percent": r.score_percent,
                    "passed": r.passed
                })
            })
            .collect();
        let output = serde_json::json!({
            "exam": exam.title(),
            "passing_score_percent": exam.passing_score_percent(),
            "attempts": attempts,
            "completed": session.phase().is_terminal(),
            "error": error.as_ref().map(ToString::to_string)
        });
        print_json(&output);
        return error.map_or(Ok(()), Err);
    }

    println!("{}", exam.title());
    println!("{}", "=".repeat(exam.title().chars().count()));
    println!("Passing score: {}%", exam.passing_score_percent());
    println!();

    for (i, r) in results.iter().enumerate() {
        println!(
            "Attempt {}: {}/{} correct, {}% - {}",
            i + 1,
            r.correct_count,
            r.total_questions,
            r.score_percent,
            if r.passed { "PASSED" } else { "FAILED" }
        );
    }

    // Only a graded attempt is worth reviewing.
    if session.result().is_some() {
        println!();
        println!("Review (last attempt):");
        for question in exam.questions() {
            let given = session.attempt().answer(question.id);
            let mark = if given.is_some_and(|a| question.is_correct(a)) {
                "ok"
            } else {
                "xx"
            };
            let given_text = given
                .and_then(|a| question.options.get(a))
                .map(String::as_str)
                .unwrap_or("(no answer)");
            println!("  [{}] {}. {}", mark, question.id, question.prompt);
            println!("       Your answer:    {}", given_text);
            if mark != "ok" {
                let correct = question
                    .options
                    .get(question.correct_option)
                    .map(String::as_str)
                    .unwrap_or_default();
                println!("       Correct answer: {}", correct);
            }
            if let Some(explanation) = &question.explanation {
                println!("       {}", explanation);
            }
        }
    }

    if let Some(e) = error {
        return Err(e);
    }
    if !session.phase().is_terminal() {
        println!();
        println!("Not passed yet. Pass another --answers to retake.");
    }

    Ok(())
}

// =============================================================================
// ACCOUNT COMMANDS
// =============================================================================

/// Walk the router from the home screen to the user's dashboard.
fn sign_in(user: SessionUser) -> Result<Screen, TrainflowError> {
    let mut router = Router::new();
    router.apply(NavIntent::GetStarted)?;
    router.apply(NavIntent::SignedIn(user))
}

fn print_session(user: &SessionUser, screen: Screen, json_mode: bool) {
    if json_mode {
        print_json(&serde_json::json!({ "user": user, "screen": screen }));
        return;
    }
    let role = match user.role {
        Role::Admin => "administrator",
        Role::Employee => "employee",
    };
    println!("Signed in as {} ({})", user.name, role);
    println!("Landing screen: {:?}", screen);
}

/// Demo sign-in.
pub fn cmd_login(email: String, password: String, json_mode: bool) -> Result<(), TrainflowError> {
    let user = LoginForm { email, password }.login();
    tracing::info!("Login for {}", user.name);
    let screen = sign_in(user.clone())?;
    print_session(&user, screen, json_mode);
    Ok(())
}

/// Demo sign-up.
pub fn cmd_register(
    company_name: String,
    email: String,
    password: String,
    confirm_password: String,
    user_type: Role,
    json_mode: bool,
) -> Result<(), TrainflowError> {
    let form = RegistrationForm {
        company_name,
        email,
        password,
        confirm_password,
        user_type,
    };
    let user = form.register()?;
    tracing::info!("Registered account {}", user.name);
    let screen = sign_in(user.clone())?;
    print_session(&user, screen, json_mode);
    Ok(())
}

// =============================================================================
// VIDEO COMMANDS
// =============================================================================

fn print_video(record: &VideoRecord, json_mode: bool) {
    if json_mode {
        print_json(record);
        return;
    }
    println!("Video \"{}\" added to training {}", record.title, record.training_id.0);
    println!("  Description: {}", record.description);
    println!("  Duration:    {}", record.duration);
    println!("  Status:      {:?}", record.status);
}

/// Time the progress bar takes to run from 0% to finished.
pub fn generation_eta(config: &Config, ticker: &GenerationTicker) -> Duration {
    // The first interval tick fires immediately.
    let waits = ticker.ticks_to_finish().saturating_sub(1);
    config.generation.period().saturating_mul(waits)
}

/// Run the cosmetic generation progress, then store the record.
pub async fn cmd_generate_video(
    config: &Config,
    training: u64,
    request: AiVideoRequest,
    json_mode: bool,
) -> Result<(), TrainflowError> {
    request.validate()?;

    let ticker = GenerationTicker::new(config.generation.step_percent);
    let (cancel_tx, cancel_rx) = cancel_channel();
    let signal = cancel_on_ctrl_c(cancel_tx);

    if !json_mode {
        println!(
            "Generating \"{}\" (about {}s, Ctrl+C to cancel)",
            request.topic,
            generation_eta(config, &ticker).as_secs()
        );
    }
    let outcome = run_generation(ticker, config.generation.period(), cancel_rx, |percent| {
        tracing::debug!("generation progress {}%", percent);
        if !json_mode {
            print!("\r  Progress: {:>3}%", percent);
            let _ = std::io::stdout().flush();
        }
    })
    .await;
    signal.abort();
    if !json_mode {
        println!();
    }

    match outcome {
        GenerationOutcome::Finished => {
            let record = request.into_record(TrainingId(training), now())?;
            tracing::info!("Generated video {}", record.id);
            print_video(&record, json_mode);
        }
        GenerationOutcome::Cancelled { percent } => {
            tracing::warn!("Generation cancelled at {}%", percent);
            if json_mode {
                print_json(&serde_json::json!({ "cancelled": true, "percent": percent }));
            }
        }
    }
    Ok(())
}

/// Attach a manual upload.
pub fn cmd_upload_video(
    training: u64,
    upload: ManualUpload,
    json_mode: bool,
) -> Result<(), TrainflowError> {
    let record = upload.into_record(TrainingId(training), now())?;
    tracing::info!("Uploaded video {}", record.id);
    print_video(&record, json_mode);
    Ok(())
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Show the sample catalog.
pub fn cmd_catalog(json_mode: bool) -> Result<(), TrainflowError> {
    let catalog = Catalog::sample();
    let summary = catalog.dashboard_summary();
    let mine = catalog.employee_summary();
    let (outline, _) = catalog.safety_training()?;

    if json_mode {
        let output = serde_json::json!({
            "templates": catalog.templates,
            "employees": catalog.employees,
            "departments": catalog.departments,
            "trainings": catalog.trainings,
            "summary": summary,
            "assignments": catalog.assignments,
            "employee_summary": mine,
            "featured": {
                "title": outline.title,
                "modules": outline.modules.len(),
                "progress_percent": outline.overall_progress()
            }
        });
        print_json(&output);
        return Ok(());
    }

    println!("TrainFlow Dashboard");
    println!("===================");
    println!("Trainings:    {}", summary.total);
    println!("In progress:  {}", summary.in_progress);
    println!("Completed:    {}", summary.completed);
    println!("Planned:      {}", summary.planned);
    println!("Not started:  {}", summary.not_started);
    println!("Participants: {}", summary.participants);
    println!();

    println!("Trainings:");
    for t in &catalog.trainings {
        println!(
            "  {:>3}  {:<32} {:<14} {:>3}%  {}",
            t.id.0,
            t.title,
            t.status.label(),
            t.completion_percent,
            t.department
        );
    }
    println!();

    println!("Templates:");
    for template in &catalog.templates {
        println!(
            "  {:<18} {} ({})",
            template.id.as_str(),
            template.name,
            template.duration
        );
    }
    println!();

    println!("Employees:");
    for employee in &catalog.employees {
        println!(
            "  {:>3}  {:<20} {:<12} {}",
            employee.id.as_str(),
            employee.name,
            employee.department,
            employee.role
        );
    }
    println!();

    println!(
        "My Trainings ({} in progress, {} completed, {} not started, {}% overall)",
        mine.in_progress, mine.completed, mine.not_started, mine.overall_progress
    );
    for a in &catalog.assignments {
        println!(
            "  {:>3}  {:<34} {:<12} {:>3}%  due {}  exam {:?}",
            a.id.0,
            a.title,
            a.status.label(),
            a.progress_percent,
            a.due_on,
            a.exam_status
        );
    }
    println!();

    println!(
        "Featured: {} - {} of {} modules done ({}%, {} min)",
        outline.title,
        outline.completed_modules(),
        outline.modules.len(),
        outline.overall_progress(),
        outline.total_minutes()
    );

    Ok(())
}
