//! Geospatial endpoints: proximity, clusters, route, within-district

use super::parse_optional;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use culturemap_geospatial::{
    ClusterQuery, ClusterResponse, DistrictQuery, DistrictSitesResponse, ProximityQuery,
    ProximityResponse, RouteQuery, RouteResponse, DEFAULT_ZOOM,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ProximityParams {
    lat: f64,
    lng: f64,
    radius: Option<f64>,
    category: Option<String>,
    max_results: Option<usize>,
    #[serde(default)]
    include_inactive: bool,
    sort_by: Option<String>,
}

/// GET /geospatial/proximity
pub async fn proximity(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ProximityParams>, QueryRejection>,
) -> Result<Json<ProximityResponse>> {
    let Query(params) = params?;
    let query = ProximityQuery {
        lat: params.lat,
        lng: params.lng,
        radius_m: params.radius,
        category: parse_optional(params.category.as_deref())?,
        max_results: params.max_results,
        include_inactive: params.include_inactive,
        sort_by: parse_optional(params.sort_by.as_deref())?.unwrap_or_default(),
    };
    Ok(Json(state.service.proximity(&query).await?))
}

#[derive(Debug, Deserialize)]
pub struct ClusterParams {
    ne_lat: f64,
    ne_lng: f64,
    sw_lat: f64,
    sw_lng: f64,
    zoom_level: Option<i32>,
    category: Option<String>,
}

/// GET /geospatial/clusters
pub async fn clusters(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ClusterParams>, QueryRejection>,
) -> Result<Json<ClusterResponse>> {
    let Query(params) = params?;
    let query = ClusterQuery {
        ne_lat: params.ne_lat,
        ne_lng: params.ne_lng,
        sw_lat: params.sw_lat,
        sw_lng: params.sw_lng,
        zoom_level: params.zoom_level.unwrap_or(DEFAULT_ZOOM),
        category: parse_optional(params.category.as_deref())?,
    };
    Ok(Json(state.service.clusters(&query).await?))
}

/// GET /geospatial/route
///
/// Waypoints repeat as `waypoints[]=<id>` (or `waypoints=<id>`) and are
/// visited in the order given.
pub async fn route(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<RouteResponse>> {
    let Query(pairs) = params?;

    let coordinate = |key: &str| -> Result<f64> {
        let raw = pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .ok_or_else(|| ApiError::invalid_parameter(format!("missing query parameter '{}'", key)))?;
        raw.parse()
            .map_err(|_| ApiError::invalid_parameter(format!("'{}' must be a number, got '{}'", key, raw)))
    };

    let query = RouteQuery {
        start_lat: coordinate("start_lat")?,
        start_lng: coordinate("start_lng")?,
        end_lat: coordinate("end_lat")?,
        end_lng: coordinate("end_lng")?,
        waypoints: pairs
            .iter()
            .filter(|(k, v)| (k == "waypoints" || k == "waypoints[]") && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect(),
    };
    Ok(Json(state.service.route(&query).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct DistrictParams {
    category: Option<String>,
    sort_by: Option<String>,
    limit: Option<usize>,
}

/// GET /geospatial/within-district/{district_name}
pub async fn within_district(
    State(state): State<Arc<AppState>>,
    district_name: std::result::Result<Path<String>, PathRejection>,
    params: std::result::Result<Query<DistrictParams>, QueryRejection>,
) -> Result<Json<DistrictSitesResponse>> {
    let Path(district) = district_name?;
    let Query(params) = params?;
    let query = DistrictQuery {
        district,
        category: parse_optional(params.category.as_deref())?,
        sort_by: parse_optional(params.sort_by.as_deref())?.unwrap_or_default(),
        limit: params.limit,
    };
    Ok(Json(state.service.sites_within_district(&query).await?))
}
