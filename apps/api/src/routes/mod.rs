pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::jobs::handlers as jobs;
use crate::profiles::handlers as profiles;
use crate::state::AppState;
use crate::talent::handlers as talent;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles & dashboard
        .route("/api/v1/profiles", post(profiles::handle_create_profile))
        .route(
            "/api/v1/profiles/me",
            get(profiles::handle_get_me).patch(profiles::handle_update_me),
        )
        .route(
            "/api/v1/profiles/me/tech-path",
            put(profiles::handle_select_tech_path),
        )
        .route("/api/v1/profiles/me/views", get(profiles::handle_list_views))
        // Skills verification
        .route("/api/v1/assessments/start", post(assessment::handle_start))
        .route(
            "/api/v1/assessments/results",
            get(assessment::handle_list_results),
        )
        .route(
            "/api/v1/assessments/generate",
            post(assessment::handle_generate),
        )
        .route(
            "/api/v1/assessments/:attempt_id/answers",
            post(assessment::handle_submit_answers),
        )
        .route(
            "/api/v1/assessments/:attempt_id/commands",
            post(assessment::handle_command),
        )
        // Job board
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id/apply", post(jobs::handle_quick_apply))
        .route("/api/v1/applications", get(jobs::handle_list_applications))
        // Talent search
        .route("/api/v1/talent", get(talent::handle_search_talent))
        .route(
            "/api/v1/talent/:candidate_id/contact",
            post(talent::handle_contact_candidate),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::assessment::attempts::{Attempt, AttemptState, AttemptStore, MemoryAttemptStore};
    use crate::assessment::bank::scenario;
    use crate::assessment::terminal::TerminalSession;
    use crate::auth::FixedTokenVerifier;
    use crate::generator::CatalogGenerator;
    use crate::models::profile::TechPath;

    const TOKEN: &str = "candidate-token";

    struct Harness {
        app: Router,
        attempts: Arc<MemoryAttemptStore>,
        user_id: Uuid,
    }

    fn harness() -> Harness {
        let user_id = Uuid::new_v4();
        let attempts = Arc::new(MemoryAttemptStore::default());
        // Never connects: these tests only exercise paths that stop before the database.
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/firstcommit_test")
            .unwrap();
        let state = AppState {
            db,
            attempts: attempts.clone(),
            auth: Arc::new(FixedTokenVerifier {
                users: HashMap::from([(TOKEN.to_string(), user_id)]),
            }),
            generator: Arc::new(CatalogGenerator::new(Duration::ZERO)),
        };
        Harness {
            app: build_router(state),
            attempts,
            user_id,
        }
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(t) = token {
            builder = builder.header("authorization", format!("Bearer {t}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_terminal_attempt(h: &Harness, owner: Uuid) -> Uuid {
        let session = TerminalSession::start(scenario("basics").unwrap());
        let attempt = Attempt::new(owner, Some(TechPath::Infra), AttemptState::Terminal(session));
        h.attempts.save(&attempt).await.unwrap();
        attempt.id
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let resp = h
            .app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let h = harness();
        let resp = h
            .app
            .oneshot(post_json("/api/v1/assessments/start", None, json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_unknown_token_is_401() {
        let h = harness();
        let resp = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/jobs")
                    .header("authorization", "Bearer forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_answers_for_unknown_attempt_is_404() {
        let h = harness();
        let uri = format!("/api/v1/assessments/{}/answers", Uuid::new_v4());
        let resp = h
            .app
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "answers": [1, 0, 0, 2, 0] })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_other_users_attempt_is_404() {
        let h = harness();
        let attempt_id = seed_terminal_attempt(&h, Uuid::new_v4()).await;
        let uri = format!("/api/v1/assessments/{attempt_id}/commands");
        let resp = h
            .app
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "command": "ls -a" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_terminal_commands_advance_server_side() {
        let h = harness();
        let attempt_id = seed_terminal_attempt(&h, h.user_id).await;
        let uri = format!("/api/v1/assessments/{attempt_id}/commands");

        let resp = h
            .app
            .clone()
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "command": "ls" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["step"], 0);

        let resp = h
            .app
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "command": "ls -la" })))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["step"], 1);
        assert_eq!(body["completed"], false);
        assert!(body["result"].is_null());

        let stored = h.attempts.load(attempt_id).await.unwrap().unwrap();
        let AttemptState::Terminal(session) = stored.state else {
            panic!("expected terminal attempt");
        };
        assert_eq!(session.step, 1);
    }

    #[tokio::test]
    async fn test_answers_on_terminal_attempt_is_400() {
        let h = harness();
        let attempt_id = seed_terminal_attempt(&h, h.user_id).await;
        let uri = format!("/api/v1/assessments/{attempt_id}/answers");
        let resp = h
            .app
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "answers": [0] })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_answers_leave_attempt_open() {
        let h = harness();
        let attempt = Attempt::new(
            h.user_id,
            Some(TechPath::Dev),
            AttemptState::Quiz {
                question_ids: vec![1, 2, 3, 4, 5],
            },
        );
        h.attempts.save(&attempt).await.unwrap();
        let uri = format!("/api/v1/assessments/{}/answers", attempt.id);

        let resp = h
            .app
            .oneshot(post_json(&uri, Some(TOKEN), json!({ "answers": [1, 1, -1, 0, 0] })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(h.attempts.load(attempt.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_oversized_command_keeps_session_small() {
        let h = harness();
        let attempt_id = seed_terminal_attempt(&h, h.user_id).await;
        let uri = format!("/api/v1/assessments/{attempt_id}/commands");
        let huge = "x".repeat(100_000);

        for _ in 0..60 {
            let resp = h
                .app
                .clone()
                .oneshot(post_json(&uri, Some(TOKEN), json!({ "command": huge })))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let stored = h.attempts.load(attempt_id).await.unwrap().unwrap();
        assert!(serde_json::to_vec(&stored).unwrap().len() < 64 * 1024);
        let AttemptState::Terminal(session) = stored.state else {
            panic!("expected terminal attempt");
        };
        assert_eq!(session.step, 0);
    }
}
