use serde::{Deserialize, Serialize};

use crate::models::profile::TechPath;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Editable profile fields. Blank optional fields are allowed and mean "cleared".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub bio: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub website_url: Option<String>,
    pub tech_path: Option<String>,
}

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const BIO_MAX: usize = 500;
const SHORT_TEXT_MAX: usize = 100;

/// Checks every field and reports all failures at once.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let name_len = update.full_name.trim().chars().count();
    if name_len < NAME_MIN {
        errors.push(err("full_name", "Name must be at least 2 characters"));
    } else if name_len > NAME_MAX {
        errors.push(err("full_name", "Name is too long"));
    }

    check_max(&mut errors, "bio", update.bio.as_deref(), BIO_MAX, "Bio cannot exceed 500 characters");
    check_max(&mut errors, "job_title", update.job_title.as_deref(), SHORT_TEXT_MAX, "Job title is too long");
    check_max(&mut errors, "location", update.location.as_deref(), SHORT_TEXT_MAX, "Location is too long");
    check_max(
        &mut errors,
        "company_name",
        update.company_name.as_deref(),
        SHORT_TEXT_MAX,
        "Company name is too long",
    );

    for (field, value, message) in [
        ("github_url", &update.github_url, "Invalid GitHub URL"),
        ("linkedin_url", &update.linkedin_url, "Invalid LinkedIn URL"),
        ("portfolio_url", &update.portfolio_url, "Invalid portfolio URL"),
        ("website_url", &update.website_url, "Invalid website URL"),
    ] {
        if let Some(url) = value.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            if !is_web_url(url) {
                errors.push(err(field, message));
            }
        }
    }

    if let Some(path) = update.tech_path.as_deref() {
        if path.parse::<TechPath>().is_err() {
            errors.push(err("tech_path", "Invalid tech path"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Joins field errors into a single client-facing message.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_web_url(raw: &str) -> bool {
    reqwest::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn check_max(errors: &mut Vec<FieldError>, field: &'static str, value: Option<&str>, max: usize, message: &str) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.push(err(field, message));
    }
}

fn err(field: &'static str, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProfileUpdate {
        ProfileUpdate {
            full_name: "Ada Lovelace".to_string(),
            bio: Some(String::new()),
            github_url: Some("https://github.com/ada".to_string()),
            tech_path: Some("data".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_update_passes() {
        assert!(validate_profile_update(&valid()).is_ok());
    }

    #[test]
    fn test_short_name_fails() {
        let errs = validate_profile_update(&ProfileUpdate {
            full_name: " A ".to_string(),
            ..valid()
        })
        .unwrap_err();
        assert_eq!(errs[0].field, "full_name");
    }

    #[test]
    fn test_long_name_fails() {
        let errs = validate_profile_update(&ProfileUpdate {
            full_name: "x".repeat(51),
            ..valid()
        })
        .unwrap_err();
        assert_eq!(errs[0].message, "Name is too long");
    }

    #[test]
    fn test_bio_limit_counts_chars_not_bytes() {
        let ok = ProfileUpdate {
            bio: Some("é".repeat(500)),
            ..valid()
        };
        assert!(validate_profile_update(&ok).is_ok());
        let too_long = ProfileUpdate {
            bio: Some("é".repeat(501)),
            ..valid()
        };
        assert!(validate_profile_update(&too_long).is_err());
    }

    #[test]
    fn test_blank_urls_allowed() {
        let u = ProfileUpdate {
            linkedin_url: Some("  ".to_string()),
            website_url: Some(String::new()),
            ..valid()
        };
        assert!(validate_profile_update(&u).is_ok());
    }

    #[test]
    fn test_bad_urls_reported_together() {
        let u = ProfileUpdate {
            github_url: Some("github.com/ada".to_string()),
            website_url: Some("ftp://ada.dev".to_string()),
            ..valid()
        };
        let errs = validate_profile_update(&u).unwrap_err();
        let fields: Vec<_> = errs.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["github_url", "website_url"]);
    }

    #[test]
    fn test_invalid_tech_path() {
        let u = ProfileUpdate {
            tech_path: Some("devops".to_string()),
            ..valid()
        };
        let errs = validate_profile_update(&u).unwrap_err();
        assert_eq!(describe(&errs), "tech_path: Invalid tech path");
    }
}
