use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the job listing query: a `jobs` row joined against its
/// optional `companies` row. Every column except `id` and `created_at`
/// is nullable in the schema; defaulting happens at the DTO boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub applicants_count: Option<i32>,
    pub company_name: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
