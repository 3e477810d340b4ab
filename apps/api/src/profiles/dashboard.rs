use serde::Serialize;

use crate::models::profile::{ProfileRow, TechPath};

const BASE_PROGRESS: u32 = 50;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoadmapStep {
    pub text: &'static str,
    pub icon: &'static str,
}

/// Profile completeness: 50 for having an account, +10 bio, +20 a code or
/// portfolio link, +20 LinkedIn. Capped at 100.
pub fn profile_progress(profile: &ProfileRow) -> u32 {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    let mut score = BASE_PROGRESS;
    if filled(&profile.bio) {
        score += 10;
    }
    if filled(&profile.github_url) || filled(&profile.portfolio_url) {
        score += 20;
    }
    if filled(&profile.linkedin_url) {
        score += 20;
    }
    score.min(100)
}

/// Suggested next step on the candidate's roadmap.
pub fn roadmap_step(path: Option<TechPath>) -> RoadmapStep {
    let (text, icon) = match path {
        Some(TechPath::Infra) => ("Set up your first Linux server", "server"),
        Some(TechPath::Dev) => ("Connect your most popular repository", "code"),
        Some(TechPath::Data) => ("Analyze your first dataset on Kaggle", "database"),
        Some(TechPath::Design) => ("Upload your first shot to Dribbble", "palette"),
        Some(TechPath::Cyber) => ("Complete a room on HackTheBox", "shield"),
        Some(TechPath::Qa) => ("Write your first E2E test", "bug"),
        None => ("Complete your profile", "terminal"),
    };
    RoadmapStep { text, icon }
}
