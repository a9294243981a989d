use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

/// Failures surfaced by the HTTP handlers. Each maps to a fixed status code
/// and JSON body; internal details are logged, never echoed except as
/// `details` on a failed submit.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid survey data")]
    InvalidSurvey,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database connection failed")]
    Persistence(#[source] DbError),

    #[error("Failed to fetch surveys")]
    Listing(#[source] DbError),

    #[error("Session error")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidSurvey => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": self.to_string() }),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Persistence(err) => {
                tracing::error!(error = %err, "Failed to store survey");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": self.to_string(),
                        "details": err.to_string(),
                    }),
                )
            }
            ApiError::Listing(err) => {
                tracing::error!(error = %err, "Failed to list surveys");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": self.to_string() }),
                )
            }
            ApiError::Session(err) => {
                tracing::error!(error = %err, "Session store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
