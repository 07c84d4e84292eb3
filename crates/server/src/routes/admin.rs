//! Service endpoints: /health, /metrics

use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use culturemap_geospatial::QueryError;
use serde::Serialize;
use std::sync::Arc;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sites: usize,
    pub parking_lots: usize,
    pub districts: usize,
}

/// GET /health
///
/// Fails with 503 when the store cannot be read.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>> {
    let counts = state
        .service
        .store()
        .counts()
        .await
        .map_err(|e| ApiError::from(QueryError::from(e)))?;

    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sites: counts.sites,
        parking_lots: counts.parking_lots,
        districts: counts.districts,
    }))
}

/// GET /metrics
pub async fn metrics() -> Json<serde_json::Value> {
    Json(culturemap_telemetry::metrics().export_json())
}
