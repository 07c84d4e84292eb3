//! Great-circle distance on a spherical earth.

use crate::Coordinate;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

/// Distance in kilometers.
///
/// ```
/// use culturemap_geo::{haversine_distance, Coordinate};
///
/// let chemnitz = Coordinate::new(50.8279, 12.9214);
/// let dresden = Coordinate::new(51.0504, 13.7373);
///
/// let km = haversine_distance(&chemnitz, &dresden);
/// assert!((km - 62.0).abs() < 3.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Distance in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_M
}

/// Angle between the two points as seen from the earth's center, in radians.
///
/// `h` is clamped to [0, 1]; float error near antipodes would otherwise
/// leave the domain of `asin`.
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (phi1, lambda1) = from.to_radians();
    let (phi2, lambda2) = to.to_radians();

    let half_dphi = ((phi2 - phi1) / 2.0).sin();
    let half_dlambda = ((lambda2 - lambda1) / 2.0).sin();
    let h = half_dphi * half_dphi + phi1.cos() * phi2.cos() * half_dlambda * half_dlambda;

    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}
