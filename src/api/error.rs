//! Mapping from service failures to HTTP responses.

use crate::recommendation::services::RecommendationServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The report could not be produced.
    #[error(transparent)]
    Recommendation(#[from] RecommendationServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = json!({ "error": "internal server error" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
