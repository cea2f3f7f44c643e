//! Static job-board search links for a role.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobLink {
    pub platform: String,
    pub url: String,
}

const BOARDS: [(&str, &str); 3] = [
    ("LinkedIn Jobs", "https://www.linkedin.com/jobs/search/?keywords="),
    ("Indeed", "https://www.indeed.com/jobs?q="),
    ("Wellfound (AngelList)", "https://wellfound.com/jobs?query="),
];

pub fn job_links(job_role: &str) -> Vec<JobLink> {
    let query = escape_query(job_role);
    BOARDS
        .iter()
        .map(|(platform, prefix)| JobLink {
            platform: platform.to_string(),
            url: format!("{prefix}{query}"),
        })
        .collect()
}

/// Percent-escapes every UTF-8 byte except ASCII alphanumerics, `_ . - ~` and `/`.
pub fn escape_query(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[derive(Debug, Deserialize)]
pub struct JobLinksQuery {
    pub role: Option<String>,
}

/// GET /api/v1/job-links?role=
pub async fn handle_job_links(
    Query(params): Query<JobLinksQuery>,
) -> Result<Json<Vec<JobLink>>, AppError> {
    let role = params
        .role
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("role query parameter is required".to_string()))?;
    Ok(Json(job_links(&role)))
}
