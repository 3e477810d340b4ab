use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::TechPath;

/// Raw query string of the talent search.
#[derive(Debug, Default, Deserialize)]
pub struct TalentQuery {
    pub tech_path: Option<String>,
    pub verified_only: Option<bool>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentFilter {
    pub tech_path: Option<TechPath>,
    pub verified_only: bool,
    /// ILIKE pattern for the name search, already escaped.
    pub name_pattern: Option<String>,
}

impl TryFrom<TalentQuery> for TalentFilter {
    type Error = AppError;

    fn try_from(query: TalentQuery) -> Result<Self, Self::Error> {
        let tech_path = match query.tech_path.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<TechPath>().map_err(AppError::Validation)?),
        };
        let name_pattern = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", escape_like(q)));

        Ok(TalentFilter {
            tech_path,
            verified_only: query.verified_only.unwrap_or(false),
            name_pattern,
        })
    }
}

/// Escapes LIKE metacharacters so user input matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
