//! Error types for the vitals server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::api::NO_STORE;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Failed to read image: {0}")]
    ImageRead(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, label, message) = match self {
            ServerError::ImageNotFound(path) => (
                StatusCode::NOT_FOUND,
                "Image not found",
                format!("No image at {}", path),
            ),
            ServerError::ImageRead(msg) => {
                tracing::error!("Image read failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read image", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: label,
            message,
        });

        (status, [(header::CACHE_CONTROL, NO_STORE)], body).into_response()
    }
}
