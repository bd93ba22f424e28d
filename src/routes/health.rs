use crate::error::AppResult;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use super::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub store: HealthStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Individual health status
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub latency_ms: Option<u64>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let start = std::time::Instant::now();

    let store_health =
        match tokio::time::timeout(StdDuration::from_secs(5), state.store.ping()).await {
            Ok(Ok(())) => {
                let latency = start.elapsed().as_millis() as u64;
                HealthStatus {
                    status: "healthy".to_string(),
                    latency_ms: Some(latency),
                }
            }
            Ok(Err(_)) | Err(_) => HealthStatus {
                status: "unhealthy".to_string(),
                latency_ms: None,
            },
        };

    let overall_status = if store_health.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthCheckResponse {
        status: overall_status.to_string(),
        store: store_health,
        timestamp: chrono::Utc::now(),
    };

    Ok(Json(response))
}
