//! District listing

use crate::error::Result;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use culturemap_geospatial::DistrictNamesResponse;
use std::sync::Arc;

/// GET /districts/names
pub async fn names(State(state): State<Arc<AppState>>) -> Result<Json<DistrictNamesResponse>> {
    Ok(Json(state.service.district_names().await?))
}
