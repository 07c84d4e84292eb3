//! HTTP route handlers and router configuration

mod admin;
mod districts;
mod geospatial;
mod parking;

use crate::state::AppState;
use axum::extract::{MatchedPath, Request};
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Router};
use culturemap_telemetry::{metrics, Timer};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, Result};

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        // Service endpoints
        .route("/health", get(admin::health))
        .route("/metrics", get(admin::metrics))
        // Geospatial queries
        .route("/geospatial/proximity", get(geospatial::proximity))
        .route("/geospatial/clusters", get(geospatial::clusters))
        .route("/geospatial/route", get(geospatial::route))
        .route(
            "/geospatial/within-district/{district_name}",
            get(geospatial::within_district),
        )
        // Parking
        .route("/parking-lots", get(parking::list))
        .route("/parking-lots/near", get(parking::near))
        // Districts
        .route("/districts/names", get(districts::names))
        .with_state(state)
        .layer(middleware::from_fn(record_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured origins; an empty list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

/// Counts requests and records latency per matched route.
async fn record_request(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    metrics().increment("http.requests");
    let timer = Timer::start(format!("http.latency_ms {}", route));
    let response = next.run(request).await;
    timer.stop();

    metrics().increment(&format!("http.status.{}", response.status().as_u16()));
    response
}

/// Parses an optional query value; empty strings count as absent.
fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    ApiError: From<T::Err>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(raw.parse()?)),
    }
}
