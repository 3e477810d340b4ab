//! Axum route handlers for profiles and the candidate dashboard.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::profile::{ProfileRow, ProfileViewRow, Role, TechPath};
use crate::profiles::dashboard::{profile_progress, roadmap_step, RoadmapStep};
use crate::profiles::store::{create_profile, list_views, require_profile, set_tech_path, update_profile};
use crate::profiles::validation::{describe, validate_profile_update, ProfileUpdate};
use crate::state::AppState;

const RELEVANT_JOBS_LIMIT: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub full_name: String,
    /// Falls back to the email the auth provider reports for the token.
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct TechPathRequest {
    pub tech_path: TechPath,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub profile: ProfileRow,
    pub tech_path_label: Option<&'static str>,
    pub progress: u32,
    pub roadmap: RoadmapStep,
    pub relevant_jobs: Vec<JobRow>,
    pub profile_views: i64,
}

/// POST /api/v1/profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileRow>), AppError> {
    validate_profile_update(&ProfileUpdate {
        full_name: req.full_name.clone(),
        ..Default::default()
    })
    .map_err(|errs| AppError::Validation(describe(&errs)))?;

    let email = req
        .email
        .or(user.email)
        .map(|e| e.trim().to_string())
        .filter(|e| e.contains('@'))
        .ok_or_else(|| AppError::Validation("email: A valid email is required".to_string()))?;

    let profile = create_profile(&state.db, user.id, &email, &req.full_name, req.role).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/me
pub async fn handle_get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let profile = require_profile(&state.db, user.id).await?;
    let path = profile.tech_path();

    let relevant_jobs = match path {
        Some(p) => {
            sqlx::query_as::<_, JobRow>(
                "SELECT * FROM jobs WHERE tech_path = $1 ORDER BY created_at, id LIMIT $2",
            )
            .bind(p.as_str())
            .bind(RELEVANT_JOBS_LIMIT)
            .fetch_all(&state.db)
            .await?
        }
        None => vec![],
    };

    let profile_views: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profile_views WHERE candidate_id = $1")
            .bind(user.id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(DashboardResponse {
        tech_path_label: path.map(|p| p.label()),
        progress: profile_progress(&profile),
        roadmap: roadmap_step(path),
        relevant_jobs,
        profile_views,
        profile,
    }))
}

/// PATCH /api/v1/profiles/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileRow>, AppError> {
    validate_profile_update(&update).map_err(|errs| AppError::Validation(describe(&errs)))?;
    Ok(Json(update_profile(&state.db, user.id, &update).await?))
}

/// PUT /api/v1/profiles/me/tech-path
pub async fn handle_select_tech_path(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<TechPathRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    Ok(Json(set_tech_path(&state.db, user.id, req.tech_path).await?))
}

/// GET /api/v1/profiles/me/views
pub async fn handle_list_views(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ProfileViewRow>>, AppError> {
    Ok(Json(list_views(&state.db, user.id).await?))
}
