use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Database unreachable after retry: {0}")]
    Unavailable(#[source] SqlxError),

    #[error("Failed to read seed source {}: {source}", .path.display())]
    SeedSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "request failed");
        let (status, error_body) = match self {
            StoreError::Database(SqlxError::PoolTimedOut) | StoreError::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "STORE_UNAVAILABLE".to_string(),
                    message: "The inventory store is not reachable.".to_string(),
                },
            ),
            StoreError::Database(_)
            | StoreError::Json(_)
            | StoreError::Config(_)
            | StoreError::SeedSource { .. }
            | StoreError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
