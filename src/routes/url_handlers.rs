use crate::error::{AppError, AppResult};
use crate::models::{ShortenRequest, ShortenResponse, StatsResponse};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect};
use std::sync::Arc;
use validator::Validate;

use super::AppState;

/// Create a short URL
pub async fn shorten_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ShortenRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidUrl(format!("Validation failed: {}", e)))?;

    let mapping = state.shortener.shorten(&payload.long_url).await?;

    let short_url = format!("{}/{}", state.base_url, mapping.short_code);

    let response = ShortenResponse {
        short_code: mapping.short_code,
        short_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Resolve a short code and redirect to the original URL.
///
/// Counts the access as a side effect; the redirect is temporary (307)
/// so every access goes through the service.
pub async fn resolve_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<Redirect> {
    let mapping = state.shortener.resolve(&code).await?;

    Ok(Redirect::temporary(&mapping.long_url))
}

/// Get statistics for a short code without counting an access
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mapping = state.shortener.stats(&code).await?;

    Ok(Json(StatsResponse::from(mapping)))
}
