//! Property tests for the distance and grid laws.

use culturemap_geo::{cell_size_for_zoom, grid_cell, haversine_distance_meters, BoundingBox, Coordinate};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

proptest! {
    #[test]
    fn prop_distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = haversine_distance_meters(&a, &b);
        let ba = haversine_distance_meters(&b, &a);
        prop_assert!((ab - ba).abs() <= 1e-6, "{} vs {}", ab, ba);
    }

    #[test]
    fn prop_distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(haversine_distance_meters(&a, &a), 0.0);
    }

    #[test]
    fn prop_distance_is_finite_and_bounded(a in coordinate(), b in coordinate()) {
        let d = haversine_distance_meters(&a, &b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * 6_371_000.0 + 1e-6);
    }

    #[test]
    fn prop_triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
        let ac = haversine_distance_meters(&a, &c);
        let ab = haversine_distance_meters(&a, &b);
        let bc = haversine_distance_meters(&b, &c);
        prop_assert!(ac <= ab + bc + 1.0, "{} > {} + {}", ac, ab, bc);
    }

    #[test]
    fn prop_radius_box_contains_every_point_in_radius(
        center in (-80.0f64..80.0, -170.0f64..170.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng)),
        radius in 1.0f64..50_000.0,
        bearing in 0.0f64..std::f64::consts::TAU,
        fraction in 0.0f64..0.999,
    ) {
        // Destination point along a great circle at `fraction * radius`.
        let angular = fraction * radius / 6_371_000.0;
        let (lat1, lng1) = (center.latitude.to_radians(), center.longitude.to_radians());
        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lng2 = lng1
            + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());
        let point = Coordinate::new(lat2.to_degrees(), lng2.to_degrees());

        prop_assert!(BoundingBox::around(center, radius).contains(&point));
    }

    #[test]
    fn prop_point_lies_in_its_cell(a in coordinate(), zoom in 0i32..20) {
        let size = cell_size_for_zoom(zoom).unwrap();
        let cell = grid_cell(&a, size);
        let (lng0, lat0) = cell.origin(size);
        let eps = size * 1e-9;
        prop_assert!(a.longitude >= lng0 - eps && a.longitude < lng0 + size + eps);
        prop_assert!(a.latitude >= lat0 - eps && a.latitude < lat0 + size + eps);
    }
}
