use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::assessment::scoring::QuizGrade;
use crate::models::assessment::TestResultRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Quiz,
    Terminal,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Quiz => "quiz",
            TestType::Terminal => "terminal",
        }
    }
}

pub fn quiz_details(question_ids: &[u32], answers: &[i32]) -> Value {
    json!({
        "answers": answers,
        "questions": question_ids,
    })
}

pub fn terminal_details(scenario_id: &str, history_tail: &[String]) -> Value {
    json!({
        "scenario": scenario_id,
        "terminal_history": history_tail,
    })
}

/// Records an assessment result and, on a pass, marks the profile verified.
/// Both writes share one transaction. A failing result never clears the flag.
pub async fn record_result(
    pool: &PgPool,
    user_id: Uuid,
    test_type: TestType,
    grade: &QuizGrade,
    details: Value,
) -> Result<TestResultRow> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, TestResultRow>(
        r#"
        INSERT INTO test_results (user_id, test_type, score, passed, details)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(test_type.as_str())
    .bind(grade.score)
    .bind(grade.passed)
    .bind(&details)
    .fetch_one(&mut *tx)
    .await?;

    if grade.passed {
        sqlx::query("UPDATE profiles SET is_verified = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        "Recorded {} result for user {user_id}: score {:.1}, passed {}",
        test_type.as_str(),
        grade.score,
        grade.passed
    );
    Ok(row)
}

/// Returns a user's results, newest first.
pub async fn list_results(pool: &PgPool, user_id: Uuid) -> Result<Vec<TestResultRow>> {
    Ok(sqlx::query_as::<_, TestResultRow>(
        "SELECT * FROM test_results WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
