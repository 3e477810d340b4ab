use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Remote,
    Hybrid,
    Onsite,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Remote => "remote",
            LocationType::Hybrid => "hybrid",
            LocationType::Onsite => "onsite",
        }
    }
}

/// Perks that make a listing friendly to junior hires. Stored as JSONB.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JuniorFriendly {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mentorship: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub training_budget: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub salary_min: i32,
    pub salary_max: i32,
    pub currency: String,
    pub location_type: String,
    pub tech_path: String,
    pub junior_friendly: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An application joined with the listing it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationSummaryRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
