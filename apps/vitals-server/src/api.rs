//! API handlers: health probe and the delayed image endpoint.

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::time::{sleep, Duration};
use tracing::debug;

use emulator_core::{get_param, parse_ms};

use crate::error::ServerError;
use crate::AppState;

/// Caching directives for everything this server emits. A cached response
/// would skip the emulated delay, so nothing may be stored or revalidated
/// optimistically.
pub const NO_STORE: &str = "no-store, max-age=0, must-revalidate";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "vitals-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: GET /api/image?delay=<ms>
///
/// Sleeps for the clamped delay, then streams the backing JPEG with
/// no-store caching directives. Read failures become structured JSON:
/// 404 when the file is absent, 500 for any other I/O failure.
pub async fn handle_image(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, ServerError> {
    let query = query.unwrap_or_default();
    let delay_ms = parse_ms(get_param(&query, "delay").as_deref());

    debug!("Image request: delay={}ms", delay_ms);

    if delay_ms > 0 {
        sleep(Duration::from_millis(delay_ms)).await;
    }

    let image = tokio::fs::read(&state.image_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ServerError::ImageNotFound(state.image_path.display().to_string())
        } else {
            ServerError::ImageRead(e.to_string())
        }
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, NO_STORE),
        ],
        image,
    ))
}
