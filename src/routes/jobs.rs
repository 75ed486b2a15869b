use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::job_dto::{ApiResponse, JobListQuery},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Substring match against title, description or company name"),
        ("type" = Option<String>, Query, description = "Exact job category"),
        ("minSalary" = Option<i64>, Query, description = "Lower bound on the advertised minimum salary"),
        ("maxSalary" = Option<i64>, Query, description = "Upper bound on the advertised maximum salary"),
        ("tags" = Option<String>, Query, description = "Comma-separated tag names, any match")
    ),
    responses(
        (status = 200, description = "List of active jobs"),
        (status = 500, description = "Query failure")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let jobs = state
        .job_service
        .list(&query)
        .await
        .map_err(Error::public_message("Failed to fetch jobs"))?;
    Ok(Json(ApiResponse::success(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/types",
    responses(
        (status = 200, description = "Distinct categories among active jobs, sorted ascending"),
        (status = 500, description = "Query failure")
    )
)]
#[axum::debug_handler]
pub async fn list_job_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let types = state
        .job_service
        .list_types()
        .await
        .map_err(Error::public_message("Failed to fetch job types"))?;
    Ok(Json(ApiResponse::success(types)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/tags",
    responses(
        (status = 200, description = "Distinct tag names attached to active jobs, sorted ascending"),
        (status = 500, description = "Query failure")
    )
)]
#[axum::debug_handler]
pub async fn list_job_tags(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tags = state
        .job_service
        .list_tags()
        .await
        .map_err(Error::public_message("Failed to fetch tags"))?;
    Ok(Json(ApiResponse::success(tags)))
}

/// Legacy contract: this endpoint answers with the bare row array and a
/// `{"error": ...}` failure body instead of the `{status, data}` envelope
/// the rest of the API uses. Existing clients depend on that shape.
#[utoipa::path(
    get,
    path = "/api/jobs/towns",
    responses(
        (status = 200, description = "Every towns_by_region row, unfiltered"),
        (status = 500, description = "Query failure")
    )
)]
#[axum::debug_handler]
pub async fn list_towns(State(state): State<AppState>) -> Response {
    match state.job_service.list_towns().await {
        Ok(towns) => Json(towns).into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "failed to fetch towns");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "The active job with its tags"),
        (status = 404, description = "No active job with that ID"),
        (status = 500, description = "Query failure")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state
        .job_service
        .get_by_id(id)
        .await
        .map_err(Error::public_message("Failed to fetch job"))?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
    Ok(Json(ApiResponse::success(job)))
}
