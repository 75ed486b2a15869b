use std::collections::HashMap;

use sqlx::PgPool;

use crate::dto::job_dto::{JobListQuery, JobResponse};
use crate::error::Result;
use crate::models::job::JobRow;
use crate::models::town::Town;

const JOB_SELECT: &str = "SELECT j.id, j.title, j.description, j.salary_min, j.salary_max, \
     j.job_type, j.location, j.applicants_count, c.name AS company_name, c.logo_url, j.created_at \
     FROM jobs j LEFT JOIN companies c ON j.company_id = c.id";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

/// An ordered sequence of predicate + binding pairs folded into a single
/// parameterized WHERE clause. User input only ever travels through the
/// bind list, never through the SQL text.
#[derive(Debug, Default)]
struct FilterBuilder {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(String),
    Int(i64),
}

impl FilterBuilder {
    /// Placeholder index the next pushed bind will occupy.
    fn next_index(&self) -> usize {
        self.binds.len() + 1
    }

    fn predicate(&mut self, clause: String) {
        self.clauses.push(clause);
    }

    fn bind_text(&mut self, value: String) {
        self.binds.push(BindValue::Text(value));
    }

    fn bind_int(&mut self, value: i64) {
        self.binds.push(BindValue::Int(value));
    }

    fn where_clause(&self) -> String {
        self.clauses.join(" AND ")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Folds the optional request filters into predicates. Absent (or empty)
/// parameters impose no constraint; present ones are ANDed onto the
/// always-applied active-status predicate.
fn build_filters(query: &JobListQuery) -> FilterBuilder {
    let mut filter = FilterBuilder::default();
    filter.predicate("j.status = 'active'".to_string());

    if let Some(search) = non_empty(&query.search) {
        // Case-insensitive substring match across title, description and
        // company name, as one OR-group.
        let pattern = format!("%{}%", search);
        let first = filter.next_index();
        filter.predicate(format!(
            "(j.title ILIKE ${} OR j.description ILIKE ${} OR c.name ILIKE ${})",
            first,
            first + 1,
            first + 2
        ));
        filter.bind_text(pattern.clone());
        filter.bind_text(pattern.clone());
        filter.bind_text(pattern);
    }

    if let Some(job_type) = non_empty(&query.job_type) {
        filter.predicate(format!("j.job_type = ${}", filter.next_index()));
        filter.bind_text(job_type.to_string());
    }

    if let Some(min_salary) = query.min_salary {
        filter.predicate(format!("j.salary_min >= ${}", filter.next_index()));
        filter.bind_int(min_salary);
    }

    if let Some(max_salary) = query.max_salary {
        filter.predicate(format!("j.salary_max <= ${}", filter.next_index()));
        filter.bind_int(max_salary);
    }

    if let Some(raw_tags) = non_empty(&query.tags) {
        let names: Vec<&str> = raw_tags
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if !names.is_empty() {
            // Membership test: the job carries at least one of the named
            // tags. EXISTS keeps this a pure predicate, so matching several
            // tags cannot duplicate the job row. One placeholder per name.
            let first = filter.next_index();
            let placeholders = (0..names.len())
                .map(|offset| format!("${}", first + offset))
                .collect::<Vec<_>>()
                .join(", ");
            filter.predicate(format!(
                "EXISTS (SELECT 1 FROM job_tags jt JOIN tags t ON t.id = jt.tag_id \
                 WHERE jt.job_id = j.id AND t.name IN ({}))",
                placeholders
            ));
            for name in names {
                filter.bind_text(name.to_string());
            }
        }
    }

    filter
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &JobListQuery) -> Result<Vec<JobResponse>> {
        let filter = build_filters(query);
        let sql = format!(
            "{} WHERE {} ORDER BY j.created_at DESC, j.id DESC",
            JOB_SELECT,
            filter.where_clause()
        );

        let mut statement = sqlx::query_as::<_, JobRow>(&sql);
        for bind in &filter.binds {
            statement = match bind {
                BindValue::Text(value) => statement.bind(value.clone()),
                BindValue::Int(value) => statement.bind(*value),
            };
        }
        let rows = statement.fetch_all(&self.pool).await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut tags_by_job = self.tags_for_jobs(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let tags = tags_by_job.remove(&row.id).unwrap_or_default();
                JobResponse::from_row(row, tags)
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<JobResponse>> {
        let sql = format!("{} WHERE j.status = 'active' AND j.id = $1", JOB_SELECT);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let tags = self.tags_for_job(row.id).await?;
                Ok(Some(JobResponse::from_row(row, tags)))
            }
            None => Ok(None),
        }
    }

    /// Tag names for one job, sorted by name. A job without tags yields an
    /// empty vector.
    pub async fn tags_for_job(&self, job_id: i64) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT t.name FROM tags t \
             JOIN job_tags jt ON t.id = jt.tag_id \
             WHERE jt.job_id = $1 \
             ORDER BY t.name",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// Batch form of `tags_for_job`: one query for the whole result set,
    /// grouped by job id in memory. Per-job output matches the single-job
    /// resolver.
    pub async fn tags_for_jobs(&self, job_ids: &[i64]) -> Result<HashMap<i64, Vec<String>>> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT jt.job_id, t.name FROM tags t \
             JOIN job_tags jt ON t.id = jt.tag_id \
             WHERE jt.job_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_job: HashMap<i64, Vec<String>> = HashMap::new();
        for (job_id, name) in rows {
            tags_by_job.entry(job_id).or_default().push(name);
        }

        Ok(tags_by_job)
    }

    pub async fn list_types(&self) -> Result<Vec<String>> {
        let types = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT job_type FROM jobs \
             WHERE status = 'active' AND job_type IS NOT NULL \
             ORDER BY job_type",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT t.name FROM tags t \
             JOIN job_tags jt ON t.id = jt.tag_id \
             JOIN jobs j ON jt.job_id = j.id \
             WHERE j.status = 'active' \
             ORDER BY t.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    pub async fn list_towns(&self) -> Result<Vec<Town>> {
        let towns = sqlx::query_as::<_, Town>("SELECT id, region, town FROM towns_by_region")
            .fetch_all(&self.pool)
            .await?;

        Ok(towns)
    }
}
