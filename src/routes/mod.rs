pub mod health;
pub mod jobs;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::json;

/// Router fallback: unmatched routes echo the method and path.
pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": format!("Cannot {} {}", method, uri),
        })),
    )
}
