//! Parking endpoints

use super::parse_optional;
use crate::error::Result;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use culturemap_geospatial::{
    ParkingListQuery, ParkingListResponse, ParkingNearQuery, ParkingNearResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NearParams {
    lat: f64,
    lng: f64,
    max_distance: Option<f64>,
    parking_type: Option<String>,
}

/// GET /parking-lots/near
pub async fn near(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<NearParams>, QueryRejection>,
) -> Result<Json<ParkingNearResponse>> {
    let Query(params) = params?;
    let query = ParkingNearQuery {
        lat: params.lat,
        lng: params.lng,
        max_distance_m: params.max_distance,
        parking_type: parse_optional(params.parking_type.as_deref())?,
    };
    Ok(Json(state.service.parking_near(&query).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    parking_type: Option<String>,
    district: Option<String>,
    limit: Option<usize>,
}

/// GET /parking-lots
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ParkingListResponse>> {
    let Query(params) = params?;
    let query = ParkingListQuery {
        parking_type: parse_optional(params.parking_type.as_deref())?,
        district: params.district.filter(|d| !d.trim().is_empty()),
        limit: params.limit,
    };
    Ok(Json(state.service.list_parking(&query).await?))
}
