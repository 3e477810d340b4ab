//! Pure transitions of an assessment attempt. Handlers do the I/O around these.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::assessment::attempts::{Attempt, AttemptState};
use crate::assessment::bank::{
    answer_key, random_scenario, sample_questions, scenario, QuestionView, QUESTIONS_PER_QUIZ,
};
use crate::assessment::scoring::{grade_quiz, QuizGrade, PASS_THRESHOLD_PERCENT};
use crate::assessment::terminal::{CommandOutcome, CommandStatus, TerminalSession};
use crate::assessment::verification::{quiz_details, terminal_details, TestType};
use crate::errors::AppError;
use crate::models::profile::TechPath;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartResponse {
    Quiz {
        attempt_id: Uuid,
        tech_path: Option<TechPath>,
        questions: Vec<QuestionView>,
        pass_threshold: usize,
    },
    Terminal {
        attempt_id: Uuid,
        tech_path: Option<TechPath>,
        scenario_id: String,
        history: Vec<String>,
        steps: Vec<&'static str>,
        current_step: usize,
    },
}

/// A graded attempt, ready to be recorded.
#[derive(Debug)]
pub struct Graded {
    pub test_type: TestType,
    pub grade: QuizGrade,
    pub details: Value,
}

#[derive(Debug)]
pub struct CommandStep {
    pub outcome: CommandOutcome,
    pub step: usize,
    pub total_steps: usize,
    pub completed: bool,
    /// Set when this command finished the scenario.
    pub graded: Option<Graded>,
}

/// Opens a new attempt for the candidate's path: a terminal scenario for
/// infra/cyber, a sampled quiz for everyone else.
pub fn begin(user_id: Uuid, path: Option<TechPath>) -> (Attempt, StartResponse) {
    if path.is_some_and(|p| p.uses_terminal()) {
        let scenario = random_scenario();
        let session = TerminalSession::start(scenario);
        let history = session.history.clone();
        let attempt = Attempt::new(user_id, path, AttemptState::Terminal(session));
        let response = StartResponse::Terminal {
            attempt_id: attempt.id,
            tech_path: path,
            scenario_id: scenario.id.to_string(),
            history,
            steps: scenario.steps.iter().map(|s| s.instruction).collect(),
            current_step: 0,
        };
        return (attempt, response);
    }

    let questions = sample_questions(path, QUESTIONS_PER_QUIZ);
    let attempt = Attempt::new(
        user_id,
        path,
        AttemptState::Quiz {
            question_ids: questions.iter().map(|q| q.id).collect(),
        },
    );
    let response = StartResponse::Quiz {
        attempt_id: attempt.id,
        tech_path: path,
        questions: questions.into_iter().map(QuestionView::from).collect(),
        pass_threshold: PASS_THRESHOLD_PERCENT,
    };
    (attempt, response)
}

/// Grades answers given in the order the questions were issued.
pub fn grade_answers(attempt: &Attempt, answers: &[i32]) -> Result<Graded, AppError> {
    let AttemptState::Quiz { question_ids } = &attempt.state else {
        return Err(AppError::Validation(
            "This attempt is a terminal exercise, submit commands instead".to_string(),
        ));
    };
    let key = answer_key(attempt.tech_path);
    let grade = grade_quiz(&key, question_ids, answers)?;
    Ok(Graded {
        test_type: TestType::Quiz,
        grade,
        details: quiz_details(question_ids, answers),
    })
}

/// Feeds one command to a terminal attempt.
pub fn run_command(attempt: &mut Attempt, command: &str) -> Result<CommandStep, AppError> {
    let AttemptState::Terminal(session) = &mut attempt.state else {
        return Err(AppError::Validation(
            "This attempt is a quiz, submit answers instead".to_string(),
        ));
    };
    let scenario = scenario(&session.scenario_id).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Unknown scenario '{}'", session.scenario_id))
    })?;

    let outcome = session.submit(scenario, command);
    let graded = (outcome.status == CommandStatus::Completed).then(|| Graded {
        test_type: TestType::Terminal,
        grade: QuizGrade::terminal_completed(),
        details: terminal_details(scenario.id, session.history_tail()),
    });

    Ok(CommandStep {
        outcome,
        step: session.step,
        total_steps: scenario.steps.len(),
        completed: session.is_complete(scenario),
        graded,
    })
}
