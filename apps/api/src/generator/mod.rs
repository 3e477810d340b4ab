//! Ad-hoc assessments for recruiters.
//!
//! `CatalogGenerator` answers from the static bank after a short delay, so the
//! front end can keep its "generating" state. A smarter backend can be plugged
//! in behind `AssessmentGenerator` without touching the handler.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::bank::{quiz_bank, scenario, Question, TerminalStep};
use crate::errors::AppError;
use crate::models::profile::TechPath;

pub const MAX_QUESTIONS: usize = 10;
const DEFAULT_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub tech_path: TechPath,
    pub question_count: Option<usize>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Quiz,
    Terminal,
}

impl AssessmentKind {
    pub fn for_path(path: Option<TechPath>) -> Self {
        match path {
            Some(p) if p.uses_terminal() => AssessmentKind::Terminal,
            _ => AssessmentKind::Quiz,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAssessment {
    pub title: String,
    pub tech_path: TechPath,
    pub kind: AssessmentKind,
    /// Includes answers: the recruiter owns this assessment.
    pub questions: Vec<Question>,
    pub tasks: Vec<TerminalStep>,
    pub generated_at: DateTime<Utc>,
    pub generator_backend: String,
}

#[async_trait]
pub trait AssessmentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedAssessment, AppError>;
}

pub struct CatalogGenerator {
    delay: Duration,
}

impl CatalogGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AssessmentGenerator for CatalogGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedAssessment, AppError> {
        let count = request.question_count.unwrap_or(DEFAULT_QUESTIONS);
        if !(1..=MAX_QUESTIONS).contains(&count) {
            return Err(AppError::Validation(format!(
                "question_count must be between 1 and {MAX_QUESTIONS}"
            )));
        }

        tokio::time::sleep(self.delay).await;

        let path = request.tech_path;
        let kind = AssessmentKind::for_path(Some(path));
        let (questions, tasks) = match kind {
            AssessmentKind::Quiz => (
                quiz_bank(Some(path)).iter().take(count).cloned().collect(),
                vec![],
            ),
            AssessmentKind::Terminal => (vec![], scenario_for(path).to_vec()),
        };

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} screening", path.label()));

        info!("Generated {kind:?} assessment '{title}' for {path}");
        Ok(GeneratedAssessment {
            title,
            tech_path: path,
            kind,
            questions,
            tasks,
            generated_at: Utc::now(),
            generator_backend: "catalog".to_string(),
        })
    }
}

/// Fixed scenario per terminal path.
fn scenario_for(path: TechPath) -> &'static [TerminalStep] {
    let id = match path {
        TechPath::Cyber => "file_ops",
        _ => "basics",
    };
    scenario(id).map(|s| s.steps).unwrap_or(&[])
}
