//! Axis-aligned bounding boxes in degree space.

use crate::{Coordinate, GeoError, Result, EARTH_RADIUS_M};
use serde::{Deserialize, Serialize};

/// Rectangle defined by its southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southwest corner
    pub sw: Coordinate,
    /// Northeast corner
    pub ne: Coordinate,
}

impl BoundingBox {
    /// Builds a validated box.
    ///
    /// Both corners must be valid coordinates and `sw` must not lie north or
    /// east of `ne`. Boxes crossing the antimeridian are not representable.
    pub fn new(sw: Coordinate, ne: Coordinate) -> Result<Self> {
        sw.validate()?;
        ne.validate()?;
        if sw.latitude > ne.latitude {
            return Err(GeoError::InvalidBoundingBox(format!(
                "southwest latitude {} is north of northeast latitude {}",
                sw.latitude, ne.latitude
            )));
        }
        if sw.longitude > ne.longitude {
            return Err(GeoError::InvalidBoundingBox(format!(
                "southwest longitude {} is east of northeast longitude {}",
                sw.longitude, ne.longitude
            )));
        }
        Ok(Self { sw, ne })
    }

    /// Smallest box containing every coordinate, or `None` for an empty input.
    pub fn enclosing<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        let (mut sw, mut ne) = (first, first);
        for c in iter {
            sw.latitude = sw.latitude.min(c.latitude);
            sw.longitude = sw.longitude.min(c.longitude);
            ne.latitude = ne.latitude.max(c.latitude);
            ne.longitude = ne.longitude.max(c.longitude);
        }
        Some(Self { sw, ne })
    }

    /// Conservative box around `center` that contains every point within
    /// `radius_m` meters great-circle distance.
    ///
    /// Near the poles, or when the longitude span would wrap the antimeridian,
    /// the box widens to the full longitude range.
    pub fn around(center: Coordinate, radius_m: f64) -> Self {
        let angular = radius_m.max(0.0) / EARTH_RADIUS_M;
        let lat_delta = angular.to_degrees();
        let south = (center.latitude - lat_delta).max(-90.0);
        let north = (center.latitude + lat_delta).min(90.0);

        let max_abs_lat = south.abs().max(north.abs());
        let ratio = angular.sin() / max_abs_lat.to_radians().cos();
        let (west, east) = if north >= 90.0 || south <= -90.0 || !(0.0..1.0).contains(&ratio) {
            (-180.0, 180.0)
        } else {
            let lng_delta = ratio.asin().to_degrees();
            let (west, east) = (center.longitude - lng_delta, center.longitude + lng_delta);
            if west < -180.0 || east > 180.0 {
                (-180.0, 180.0)
            } else {
                (west, east)
            }
        };

        Self {
            sw: Coordinate::new(south, west),
            ne: Coordinate::new(north, east),
        }
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.sw.latitude
            && point.latitude <= self.ne.latitude
            && point.longitude >= self.sw.longitude
            && point.longitude <= self.ne.longitude
    }

    /// Corners as `[lng, lat]` pairs, southwest first.
    pub fn corners_lng_lat(&self) -> ([f64; 2], [f64; 2]) {
        (self.sw.to_lng_lat(), self.ne.to_lng_lat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine_distance_meters;

    #[test]
    fn test_new_validates_corner_order() {
        let sw = Coordinate::new(50.80, 12.90);
        let ne = Coordinate::new(50.85, 12.95);
        assert!(BoundingBox::new(sw, ne).is_ok());
        assert!(matches!(
            BoundingBox::new(ne, sw),
            Err(GeoError::InvalidBoundingBox(_))
        ));
        assert!(matches!(
            BoundingBox::new(Coordinate::new(50.80, 12.96), ne),
            Err(GeoError::InvalidBoundingBox(_))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_corners() {
        let result = BoundingBox::new(Coordinate::new(-91.0, 0.0), Coordinate::new(0.0, 0.0));
        assert!(matches!(result, Err(GeoError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_degenerate_box_contains_its_point() {
        let p = Coordinate::new(50.8279, 12.9214);
        let bbox = BoundingBox::new(p, p).unwrap();
        assert!(bbox.contains(&p));
    }

    #[test]
    fn test_around_covers_radius() {
        let center = Coordinate::new(50.8279, 12.9214);
        let bbox = BoundingBox::around(center, 1000.0);
        // Points 999 m due north/east must fall inside.
        let north = Coordinate::new(center.latitude + 0.00898, center.longitude);
        let east = Coordinate::new(center.latitude, center.longitude + 0.0142);
        assert!(haversine_distance_meters(&center, &north) < 1000.0);
        assert!(haversine_distance_meters(&center, &east) < 1000.0);
        assert!(bbox.contains(&north));
        assert!(bbox.contains(&east));
    }

    #[test]
    fn test_around_near_pole_spans_all_longitudes() {
        let bbox = BoundingBox::around(Coordinate::new(89.99, 0.0), 5000.0);
        assert_eq!(bbox.sw.longitude, -180.0);
        assert_eq!(bbox.ne.longitude, 180.0);
        assert_eq!(bbox.ne.latitude, 90.0);
    }

    #[test]
    fn test_enclosing() {
        let coords = [
            Coordinate::new(50.80, 12.95),
            Coordinate::new(50.85, 12.90),
            Coordinate::new(50.82, 12.92),
        ];
        let bbox = BoundingBox::enclosing(coords.iter()).unwrap();
        assert_eq!(bbox.sw, Coordinate::new(50.80, 12.90));
        assert_eq!(bbox.ne, Coordinate::new(50.85, 12.95));
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }
}
