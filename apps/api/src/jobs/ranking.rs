use crate::models::job::JobRow;
use crate::models::profile::TechPath;

/// Moves listings for the candidate's path to the front. The sort is stable,
/// so relative order within each group is preserved.
pub fn prioritize_path(jobs: &mut [JobRow], path: Option<TechPath>) {
    let Some(path) = path else {
        return;
    };
    jobs.sort_by_key(|job| job.tech_path != path.as_str());
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn job(title: &str, path: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            company_id: None,
            company_name: "Acme".to_string(),
            title: title.to_string(),
            description: String::new(),
            salary_min: 20000,
            salary_max: 30000,
            currency: "EUR".to_string(),
            location_type: "remote".to_string(),
            tech_path: path.to_string(),
            junior_friendly: json!({}),
            created_at: Utc::now(),
        }
    }

    fn titles(jobs: &[JobRow]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_matching_path_first_stable() {
        let mut jobs = vec![job("a", "dev"), job("b", "qa"), job("c", "dev"), job("d", "qa")];
        prioritize_path(&mut jobs, Some(TechPath::Qa));
        assert_eq!(titles(&jobs), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_no_path_keeps_order() {
        let mut jobs = vec![job("a", "dev"), job("b", "qa")];
        prioritize_path(&mut jobs, None);
        assert_eq!(titles(&jobs), vec!["a", "b"]);
    }
}
