//! Recruiter-facing candidate search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{ProfileViewRow, Role};
use crate::profiles::store::{fetch_profile, require_recruiter};
use crate::state::AppState;
use crate::talent::filter::{TalentFilter, TalentQuery};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateCard {
    pub id: Uuid,
    pub full_name: String,
    pub tech_path: Option<String>,
    pub is_verified: bool,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    /// Highest passing score, if the candidate has one.
    pub best_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub view: ProfileViewRow,
    pub candidate_email: String,
}

/// GET /api/v1/talent
pub async fn handle_search_talent(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TalentQuery>,
) -> Result<Json<Vec<CandidateCard>>, AppError> {
    require_recruiter(&state.db, user.id).await?;
    let filter = TalentFilter::try_from(query)?;

    let candidates = sqlx::query_as::<_, CandidateCard>(
        r#"
        SELECT p.id, p.full_name, p.tech_path, p.is_verified, p.bio, p.avatar_url,
               p.job_title, p.location, p.github_url, p.linkedin_url, p.website_url,
               (SELECT MAX(t.score) FROM test_results t
                 WHERE t.user_id = p.id AND t.passed) AS best_score
        FROM profiles p
        WHERE p.role = 'candidate'
          AND ($1::text IS NULL OR p.tech_path = $1)
          AND (NOT $2 OR p.is_verified)
          AND ($3::text IS NULL OR p.full_name ILIKE $3)
        ORDER BY p.is_verified DESC, p.full_name
        "#,
    )
    .bind(filter.tech_path.map(|p| p.as_str()))
    .bind(filter.verified_only)
    .bind(filter.name_pattern.as_deref())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(candidates))
}

/// POST /api/v1/talent/:candidate_id/contact
///
/// Records that a recruiter reached out, so it shows on the candidate's dashboard.
pub async fn handle_contact_candidate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(candidate_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let recruiter = require_recruiter(&state.db, user.id).await?;

    let candidate = fetch_profile(&state.db, candidate_id)
        .await?
        .filter(|p| p.role() == Role::Candidate)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let company_name = recruiter
        .company_name
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(recruiter.full_name);

    let view = sqlx::query_as::<_, ProfileViewRow>(
        r#"
        INSERT INTO profile_views (candidate_id, viewer_id, company_name)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(candidate_id)
    .bind(user.id)
    .bind(&company_name)
    .fetch_one(&state.db)
    .await?;

    info!("{company_name} contacted candidate {candidate_id}");
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            view,
            candidate_email: candidate.email,
        }),
    ))
}

#[cfg(test)]
mod tests {
    // Database-backed: run with `cargo test -- --ignored` and DATABASE_URL set.

    use sqlx::PgPool;

    use super::*;
    use crate::models::profile::TechPath;
    use crate::profiles::store::{create_profile, set_tech_path};

    async fn profile(pool: &PgPool, name: &str, role: Role, path: TechPath) -> Uuid {
        let id = Uuid::new_v4();
        create_profile(pool, id, "someone@example.com", name, role)
            .await
            .unwrap();
        set_tech_path(pool, id, path).await.unwrap();
        id
    }

    async fn search(state: &AppState, recruiter: Uuid, query: TalentQuery) -> Vec<String> {
        let user = AuthUser {
            id: recruiter,
            email: None,
        };
        let Json(cards) = handle_search_talent(State(state.clone()), user, Query(query))
            .await
            .unwrap();
        cards.into_iter().map(|c| c.full_name).collect()
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_search_filters(pool: PgPool) {
        let recruiter = profile(&pool, "Rita Recruiter", Role::Recruiter, TechPath::Dev).await;
        let ana = profile(&pool, "Ana 100%", Role::Candidate, TechPath::Dev).await;
        profile(&pool, "Bea_Data", Role::Candidate, TechPath::Data).await;
        profile(&pool, "Beatriz", Role::Candidate, TechPath::Data).await;
        sqlx::query("UPDATE profiles SET is_verified = TRUE WHERE id = $1")
            .bind(ana)
            .execute(&pool)
            .await
            .unwrap();
        let state = AppState::for_tests(pool.clone());

        let all = search(
            &state,
            recruiter,
            TalentQuery {
                tech_path: Some("all".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(all, vec!["Ana 100%", "Bea_Data", "Beatriz"]);

        let data = search(
            &state,
            recruiter,
            TalentQuery {
                tech_path: Some("data".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(data, vec!["Bea_Data", "Beatriz"]);

        let verified = search(
            &state,
            recruiter,
            TalentQuery {
                verified_only: Some(true),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(verified, vec!["Ana 100%"]);

        // Metacharacters match literally.
        for (q, expected) in [("100%", vec!["Ana 100%"]), ("a_d", vec!["Bea_Data"]), ("%", vec!["Ana 100%"])] {
            let found = search(
                &state,
                recruiter,
                TalentQuery {
                    q: Some(q.to_string()),
                    ..Default::default()
                },
            )
            .await;
            assert_eq!(found, expected, "q={q}");
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_candidates_cannot_search(pool: PgPool) {
        let candidate = profile(&pool, "Carla", Role::Candidate, TechPath::Qa).await;
        let state = AppState::for_tests(pool);
        let err = handle_search_talent(
            State(state),
            AuthUser {
                id: candidate,
                email: None,
            },
            Query(TalentQuery::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_contact_records_view(pool: PgPool) {
        let recruiter = profile(&pool, "Rita Recruiter", Role::Recruiter, TechPath::Dev).await;
        let candidate = profile(&pool, "Ana Garcia", Role::Candidate, TechPath::Dev).await;
        let state = AppState::for_tests(pool.clone());
        let user = AuthUser {
            id: recruiter,
            email: None,
        };

        let (status, Json(contact)) =
            handle_contact_candidate(State(state.clone()), user.clone(), Path(candidate))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(contact.view.company_name, "Rita Recruiter");
        assert_eq!(contact.view.viewer_id, Some(recruiter));

        let err = handle_contact_candidate(State(state), user, Path(recruiter))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
