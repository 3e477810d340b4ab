use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileRow, ProfileViewRow, Role, TechPath};
use crate::profiles::validation::ProfileUpdate;

pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>> {
    Ok(
        sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Loads the caller's profile or fails with `NotFound`.
pub async fn require_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, AppError> {
    fetch_profile(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found. Please complete onboarding.".to_string()))
}

/// Loads the caller's profile and requires the recruiter role.
pub async fn require_recruiter(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, AppError> {
    let profile = require_profile(pool, user_id).await?;
    if profile.role() != Role::Recruiter {
        return Err(AppError::Forbidden("Recruiter account required".to_string()));
    }
    Ok(profile)
}

/// Creates the profile that backs a freshly signed-up account.
/// New profiles start on the `dev` path.
pub async fn create_profile(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    full_name: &str,
    role: Role,
) -> Result<ProfileRow, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (id, email, full_name, role, tech_path)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(full_name.trim())
    .bind(role.as_str())
    .bind(TechPath::Dev.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::from_insert(e, "Profile already exists"))?;

    info!("Created {} profile {user_id}", role.as_str());
    Ok(row)
}

/// Applies a validated update. Blank optional text is stored as an empty
/// string; a missing tech path falls back to `dev`.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<ProfileRow, AppError> {
    let text = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
    let tech_path = update.tech_path.as_deref().unwrap_or(TechPath::Dev.as_str());

    sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles SET
            full_name = $2, bio = $3, job_title = $4, location = $5, company_name = $6,
            github_url = $7, linkedin_url = $8, portfolio_url = $9, website_url = $10,
            tech_path = $11
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(update.full_name.trim())
    .bind(text(&update.bio))
    .bind(text(&update.job_title))
    .bind(text(&update.location))
    .bind(text(&update.company_name))
    .bind(text(&update.github_url))
    .bind(text(&update.linkedin_url))
    .bind(text(&update.portfolio_url))
    .bind(text(&update.website_url))
    .bind(tech_path)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Profile not found. Please complete onboarding.".to_string()))
}

/// Onboarding path selection. Leaves `is_verified` untouched.
pub async fn set_tech_path(pool: &PgPool, user_id: Uuid, path: TechPath) -> Result<ProfileRow, AppError> {
    sqlx::query_as::<_, ProfileRow>("UPDATE profiles SET tech_path = $2 WHERE id = $1 RETURNING *")
        .bind(user_id)
        .bind(path.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found. Please complete onboarding.".to_string()))
}

pub async fn list_views(pool: &PgPool, candidate_id: Uuid) -> Result<Vec<ProfileViewRow>> {
    Ok(sqlx::query_as::<_, ProfileViewRow>(
        "SELECT * FROM profile_views WHERE candidate_id = $1 ORDER BY viewed_at DESC",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?)
}
