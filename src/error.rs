use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("{message}")]
    Query {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl Error {
    /// Replaces the internal detail of a storage failure with a stable
    /// client-facing message. The original error is kept for server-side
    /// logging and never serialized into the response body.
    pub fn public_message(message: &'static str) -> impl FnOnce(Error) -> Error {
        move |err| match err {
            Error::Database(source) => Error::Query { message, source },
            other => other,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Query { message, source } => {
                tracing::error!(error = ?source, "database query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            Error::Database(err) => {
                tracing::error!(error = ?err, "database query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({ "status": "error", "message": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
