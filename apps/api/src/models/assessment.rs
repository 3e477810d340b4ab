use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_type: String,
    pub score: f64,
    pub passed: bool,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}
