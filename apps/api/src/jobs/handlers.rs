//! Axum route handlers for the job board.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::ranking::prioritize_path;
use crate::models::job::{ApplicationSummaryRow, JobApplicationRow, JobRow, JuniorFriendly, LocationType};
use crate::models::profile::TechPath;
use crate::profiles::store::{require_profile, require_recruiter};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobBoardResponse {
    pub jobs: Vec<JobRow>,
    pub prioritized_path: Option<TechPath>,
    pub is_verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub salary_min: i32,
    pub salary_max: i32,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub location_type: LocationType,
    pub tech_path: TechPath,
    #[serde(default)]
    pub junior_friendly: JuniorFriendly,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl CreateJobRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.salary_min < 0 || self.salary_min > self.salary_max {
            return Err(AppError::Validation(
                "salary_min must be non-negative and not exceed salary_max".to_string(),
            ));
        }
        Ok(())
    }
}

/// GET /api/v1/jobs
///
/// All listings, the caller's tech path first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<JobBoardResponse>, AppError> {
    let profile = require_profile(&state.db, user.id).await?;
    let path = profile.tech_path();

    let mut jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at, id")
        .fetch_all(&state.db)
        .await?;
    prioritize_path(&mut jobs, path);

    Ok(Json(JobBoardResponse {
        jobs,
        prioritized_path: path,
        is_verified: profile.is_verified,
    }))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let recruiter = require_recruiter(&state.db, user.id).await?;
    req.validate()?;

    let company_name = recruiter
        .company_name
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(recruiter.full_name);

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (company_id, company_name, title, description, salary_min, salary_max,
             currency, location_type, tech_path, junior_friendly)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&company_name)
    .bind(req.title.trim())
    .bind(&req.description)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(&req.currency)
    .bind(req.location_type.as_str())
    .bind(req.tech_path.as_str())
    .bind(json!(req.junior_friendly))
    .fetch_one(&state.db)
    .await?;

    info!("Recruiter {} posted job {}", user.id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/v1/jobs/:id/apply
///
/// Quick apply: one pending application per candidate and listing.
pub async fn handle_quick_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    require_profile(&state.db, user.id).await?;

    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let application = sqlx::query_as::<_, JobApplicationRow>(
        r#"
        INSERT INTO job_applications (user_id, job_id, status)
        VALUES ($1, $2, 'pending')
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(job_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::from_insert(e, "You have already applied to this job"))?;

    info!("User {} applied to {} at {}", user.id, job.title, job.company_name);
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ApplicationSummaryRow>>, AppError> {
    let rows = sqlx::query_as::<_, ApplicationSummaryRow>(
        r#"
        SELECT a.id, a.job_id, j.title AS job_title, j.company_name, a.status, a.created_at
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}
