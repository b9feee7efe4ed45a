//! Service health

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /api/v1/health - succeeds when the store answers
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.pool.ping().await.map_err(|e| {
        tracing::warn!("Health check failed: {:#}", e);
        ApiError::unavailable("Database unavailable")
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
