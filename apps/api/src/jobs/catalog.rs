//! Starter job catalog, inserted once so the board is never empty.

use anyhow::Result;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use crate::models::job::{JuniorFriendly, LocationType};
use crate::models::profile::TechPath;

use LocationType::{Hybrid, Onsite, Remote};
use TechPath::{Cyber, Data, Design, Dev, Infra, Qa};

#[derive(Debug, Clone)]
pub struct SeedJob {
    pub title: &'static str,
    pub description: &'static str,
    pub salary_min: i32,
    pub salary_max: i32,
    pub location_type: LocationType,
    pub tech_path: TechPath,
    pub perks: JuniorFriendly,
    pub company_name: &'static str,
}

const MENTORSHIP: JuniorFriendly = JuniorFriendly {
    mentorship: true,
    training_budget: false,
};
const TRAINING: JuniorFriendly = JuniorFriendly {
    mentorship: false,
    training_budget: true,
};
const NONE: JuniorFriendly = JuniorFriendly {
    mentorship: false,
    training_budget: false,
};

#[rustfmt::skip]
#[allow(clippy::too_many_arguments)]
const fn job(
    title: &'static str, description: &'static str, salary_min: i32, salary_max: i32,
    location_type: LocationType, tech_path: TechPath, perks: JuniorFriendly, company_name: &'static str,
) -> SeedJob {
    SeedJob { title, description, salary_min, salary_max, location_type, tech_path, perks, company_name }
}

#[rustfmt::skip]
pub const SEED_JOBS: [SeedJob; 30] = [
    job("Junior Frontend Developer", "React, Next.js, Tailwind.", 24000, 30000, Remote, Dev, MENTORSHIP, "TechFlow"),
    job("React Native Intern", "Mobile development.", 18000, 22000, Hybrid, Dev, TRAINING, "MobileFirst"),
    job("Backend Junior (Node.js)", "API development.", 26000, 32000, Remote, Dev, MENTORSHIP, "NodeCorp"),
    job("Fullstack Junior", "MERN Stack.", 25000, 35000, Onsite, Dev, NONE, "StartUp Inc"),
    job("Web Developer Trainee", "HTML, CSS, JS.", 20000, 24000, Hybrid, Dev, MENTORSHIP, "WebAgency"),

    job("Junior SysAdmin", "Linux, Bash.", 25000, 32000, Onsite, Infra, TRAINING, "CloudCorp"),
    job("DevOps Trainee", "AWS, Docker.", 22000, 28000, Remote, Infra, MENTORSHIP, "ScaleUp"),
    job("Cloud Support Associate", "Azure, Support.", 24000, 30000, Hybrid, Infra, NONE, "SupportHero"),
    job("Junior Network Engineer", "Cisco, Networking.", 26000, 34000, Onsite, Infra, TRAINING, "NetConnect"),
    job("Linux Administrator", "RedHat, CentOS.", 28000, 35000, Remote, Infra, MENTORSHIP, "LinuxLabs"),

    job("Junior Data Analyst", "SQL, Tableau.", 28000, 35000, Hybrid, Data, MENTORSHIP, "DataWiz"),
    job("Data Science Intern", "Python, Pandas.", 20000, 25000, Remote, Data, TRAINING, "AI Solutions"),
    job("BI Developer Junior", "PowerBI, SQL.", 26000, 32000, Onsite, Data, NONE, "BusinessIntel"),
    job("Junior Data Engineer", "ETL, Python.", 30000, 38000, Remote, Data, MENTORSHIP, "BigData Co"),
    job("Analytics Associate", "Excel, SQL.", 24000, 30000, Hybrid, Data, TRAINING, "MetricTech"),

    job("UI/UX Junior Designer", "Figma, User Research.", 24000, 30000, Remote, Design, MENTORSHIP, "CreativeStudio"),
    job("Product Design Intern", "Wireframing.", 18000, 22000, Hybrid, Design, TRAINING, "ProductLab"),
    job("Junior Graphic Designer", "Adobe Suite.", 22000, 26000, Onsite, Design, NONE, "DesignAgency"),
    job("Web Designer", "Figma, Webflow.", 25000, 32000, Remote, Design, MENTORSHIP, "WebCraft"),
    job("UX Researcher Junior", "User Testing.", 26000, 34000, Hybrid, Design, TRAINING, "UserFocus"),

    job("Junior Pentester", "Web Security.", 30000, 38000, Onsite, Cyber, TRAINING, "SecureNet"),
    job("SOC Analyst L1", "Monitoring, SIEM.", 28000, 35000, Hybrid, Cyber, MENTORSHIP, "CyberGuard"),
    job("Security Consultant Intern", "Auditing.", 22000, 26000, Remote, Cyber, NONE, "TrustSec"),
    job("Junior AppSec Engineer", "Code Review.", 32000, 40000, Remote, Cyber, MENTORSHIP, "AppShield"),
    job("Network Security Junior", "Firewalls.", 28000, 36000, Onsite, Cyber, TRAINING, "NetSecure"),

    job("QA Tester", "Manual Testing.", 22000, 28000, Remote, Qa, MENTORSHIP, "QualitySoft"),
    job("Junior QA Automation", "Selenium, Java.", 26000, 34000, Hybrid, Qa, TRAINING, "AutoTest"),
    job("Game Tester", "Playtesting.", 20000, 24000, Onsite, Qa, NONE, "GameStudio"),
    job("Software Tester Trainee", "Bug Tracking.", 18000, 22000, Remote, Qa, MENTORSHIP, "SoftQuality"),
    job("QA Engineer Junior", "Cypress, JS.", 28000, 35000, Hybrid, Qa, TRAINING, "TestTech"),
];

/// Inserts the starter catalog when the `jobs` table is empty.
/// Returns the number of rows inserted.
pub async fn seed_catalog_if_empty(pool: &PgPool) -> Result<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for seed in &SEED_JOBS {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (company_name, title, description, salary_min, salary_max,
                 currency, location_type, tech_path, junior_friendly)
            VALUES ($1, $2, $3, $4, $5, 'EUR', $6, $7, $8)
            "#,
        )
        .bind(seed.company_name)
        .bind(seed.title)
        .bind(seed.description)
        .bind(seed.salary_min)
        .bind(seed.salary_max)
        .bind(seed.location_type.as_str())
        .bind(seed.tech_path.as_str())
        .bind(json!(seed.perks))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Seeded {} starter jobs", SEED_JOBS.len());
    Ok(SEED_JOBS.len())
}
