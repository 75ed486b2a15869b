use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::JobRow;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    #[serde(rename = "minSalary")]
    #[validate(range(min = 0))]
    pub min_salary: Option<i64>,
    #[serde(rename = "maxSalary")]
    #[validate(range(min = 0))]
    pub max_salary: Option<i64>,
    /// Comma-separated tag names; a job matches if it carries any of them.
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub applicants: i32,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

impl JobResponse {
    /// Applies the field-level default table: absent text renders as an
    /// empty string, a missing category falls back to "Full-time", a
    /// missing applicant count to 0. `logo_url` passes through so a null
    /// stays null.
    pub fn from_row(row: JobRow, tags: Vec<String>) -> Self {
        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            company_name: row.company_name.unwrap_or_default(),
            logo_url: row.logo_url,
            location: row.location.unwrap_or_default(),
            salary: format_salary(row.salary_min, row.salary_max),
            job_type: row.job_type.unwrap_or_else(|| "Full-time".to_string()),
            applicants: row.applicants_count.unwrap_or(0),
            description: row.description.unwrap_or_default(),
            tags,
        }
    }
}

/// Renders "$<min/1000>k-$<max/1000>k". The division is exact, so 80500
/// renders as "$80.5k" while 80000 renders as "$80k". An absent bound is
/// treated as 0.
fn format_salary(min: Option<i64>, max: Option<i64>) -> String {
    format!("${}k-${}k", thousands(min), thousands(max))
}

fn thousands(amount: Option<i64>) -> f64 {
    amount.unwrap_or(0) as f64 / 1000.0
}
