use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate's chosen specialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TechPath {
    Dev,
    Infra,
    Data,
    Design,
    Cyber,
    Qa,
}

impl TechPath {
    pub const ALL: [TechPath; 6] = [
        TechPath::Dev,
        TechPath::Infra,
        TechPath::Data,
        TechPath::Design,
        TechPath::Cyber,
        TechPath::Qa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TechPath::Dev => "dev",
            TechPath::Infra => "infra",
            TechPath::Data => "data",
            TechPath::Design => "design",
            TechPath::Cyber => "cyber",
            TechPath::Qa => "qa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TechPath::Dev => "Developer",
            TechPath::Infra => "Infrastructure",
            TechPath::Data => "Data Scientist",
            TechPath::Design => "Designer",
            TechPath::Cyber => "Cybersecurity",
            TechPath::Qa => "QA Engineer",
        }
    }

    /// Infra and cyber candidates verify through the terminal; everyone else takes a quiz.
    pub fn uses_terminal(&self) -> bool {
        matches!(self, TechPath::Infra | TechPath::Cyber)
    }
}

impl fmt::Display for TechPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TechPath::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Invalid tech path '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            other => Err(format!("Invalid role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub tech_path: Option<String>,
    pub bio: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Unknown or missing values read as `None`; the column has a CHECK constraint.
    pub fn tech_path(&self) -> Option<TechPath> {
        self.tech_path.as_deref().and_then(|p| p.parse().ok())
    }

    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileViewRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub viewer_id: Option<Uuid>,
    pub company_name: String,
    pub viewed_at: DateTime<Utc>,
}
