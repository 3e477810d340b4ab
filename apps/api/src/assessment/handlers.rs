//! Axum route handlers for skills verification.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assessment::attempts::{claim, load_owned};
use crate::assessment::flow::{begin, grade_answers, run_command, Graded, StartResponse};
use crate::assessment::terminal::CommandStatus;
use crate::assessment::verification::{list_results, record_result};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generator::{GenerateRequest, GeneratedAssessment};
use crate::models::assessment::TestResultRow;
use crate::profiles::store::{require_profile, require_recruiter};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    /// Chosen option per question, in the order the questions were issued.
    pub answers: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct ResultSummary {
    pub result_id: Uuid,
    pub passed: bool,
    pub score: f64,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    pub output: Vec<String>,
    pub step: usize,
    pub total_steps: usize,
    pub completed: bool,
    pub result: Option<ResultSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessments/start
pub async fn handle_start(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<StartResponse>, AppError> {
    let profile = require_profile(&state.db, user.id).await?;
    let (attempt, response) = begin(user.id, profile.tech_path());
    state.attempts.save(&attempt).await?;

    info!("User {} started attempt {}", user.id, attempt.id);
    Ok(Json(response))
}

/// POST /api/v1/assessments/:attempt_id/answers
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    user: AuthUser,
    Path(attempt_id): Path<Uuid>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<Json<ResultSummary>, AppError> {
    let attempt = load_owned(state.attempts.as_ref(), attempt_id, user.id).await?;
    let graded = grade_answers(&attempt, &req.answers)?;

    // Malformed answers leave the attempt open; grading consumes it exactly once.
    claim(state.attempts.as_ref(), attempt_id).await?;
    let summary = persist(&state, user.id, graded).await?;
    Ok(Json(summary))
}

/// POST /api/v1/assessments/:attempt_id/commands
pub async fn handle_command(
    State(state): State<AppState>,
    user: AuthUser,
    Path(attempt_id): Path<Uuid>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    let mut attempt = load_owned(state.attempts.as_ref(), attempt_id, user.id).await?;
    let step = run_command(&mut attempt, &req.command)?;

    let result = match step.graded {
        Some(graded) => {
            claim(state.attempts.as_ref(), attempt_id).await?;
            Some(persist(&state, user.id, graded).await?)
        }
        None => {
            state.attempts.save(&attempt).await?;
            None
        }
    };

    Ok(Json(CommandResponse {
        status: step.outcome.status,
        output: step.outcome.output,
        step: step.step,
        total_steps: step.total_steps,
        completed: step.completed,
        result,
    }))
}

/// GET /api/v1/assessments/results
pub async fn handle_list_results(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<TestResultRow>>, AppError> {
    Ok(Json(list_results(&state.db, user.id).await?))
}

/// POST /api/v1/assessments/generate
///
/// Recruiters only. Builds an ad-hoc assessment for a tech path.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GeneratedAssessment>, AppError> {
    require_recruiter(&state.db, user.id).await?;
    Ok(Json(state.generator.generate(&req).await?))
}

async fn persist(state: &AppState, user_id: Uuid, graded: Graded) -> Result<ResultSummary, AppError> {
    let row = record_result(&state.db, user_id, graded.test_type, &graded.grade, graded.details).await?;
    Ok(ResultSummary {
        result_id: row.id,
        passed: graded.grade.passed,
        score: graded.grade.score,
        correct: graded.grade.correct,
        total: graded.grade.total,
    })
}
