use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ApiError {
    #[error("Search term is required")]
    MissingSearchTerm,

    #[error("Failed to process request")]
    Source(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingSearchTerm => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            ApiError::Source(ref cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": self.to_string(),
                    "message": format!("{cause:#}"),
                })),
            )
                .into_response(),
        }
    }
}
