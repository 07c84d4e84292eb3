//! Ring-based polygon containment.
//!
//! A polygon is a list of rings: the first is the exterior boundary, the rest
//! are holes. A point is inside a polygon iff it lies inside an odd number of
//! its rings (even-odd rule), which honors holes without depending on ring
//! winding order. A multipolygon contains a point iff any member does.

use crate::{BoundingBox, Coordinate, GeoError, Result};

/// A closed ring of `[lng, lat]` vertices. The closing vertex is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<[f64; 2]>,
}

impl Ring {
    /// Builds a ring, dropping a duplicated closing vertex.
    ///
    /// Fails when fewer than three distinct vertices remain or any value is
    /// not finite.
    pub fn new(mut vertices: Vec<[f64; 2]>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeoError::InvalidGeometry(format!(
                "ring needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if vertices.iter().flatten().any(|v| !v.is_finite()) {
            return Err(GeoError::InvalidGeometry("ring contains non-finite vertex".into()));
        }
        Ok(Self { vertices })
    }

    /// Vertices in `[lng, lat]` order without the closing vertex.
    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Crossing-number test in degree space.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let (x, y) = (point.longitude, point.latitude);
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[j];
            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Exterior ring followed by zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    /// Builds a polygon from its rings; at least one ring is required.
    pub fn new(rings: Vec<Ring>) -> Result<Self> {
        if rings.is_empty() {
            return Err(GeoError::InvalidGeometry("polygon has no rings".into()));
        }
        Ok(Self { rings })
    }

    /// Rings, exterior first.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Even-odd containment over all rings.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.rings.iter().filter(|ring| ring.contains(point)).count() % 2 == 1
    }

    fn from_positions(rings: &[Vec<Vec<f64>>]) -> Result<Self> {
        let rings = rings
            .iter()
            .map(|ring| {
                let vertices = ring
                    .iter()
                    .map(|pos| match pos.as_slice() {
                        [lng, lat, ..] => Ok([*lng, *lat]),
                        _ => Err(GeoError::InvalidGeometry(
                            "position needs longitude and latitude".into(),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ring::new(vertices)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(rings)
    }
}

/// Area usable for containment queries: the union of one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    polygons: Vec<Polygon>,
    bounds: BoundingBox,
}

impl Area {
    /// Builds an area from polygons; at least one polygon is required.
    pub fn new(polygons: Vec<Polygon>) -> Result<Self> {
        let bounds = {
            let coords: Vec<Coordinate> = polygons
                .iter()
                .flat_map(|p| p.rings.iter())
                .flat_map(|r| r.vertices.iter())
                .map(|v| Coordinate::from_lng_lat(*v))
                .collect();
            BoundingBox::enclosing(coords.iter())
                .ok_or_else(|| GeoError::InvalidGeometry("area has no polygons".into()))?
        };
        Ok(Self { polygons, bounds })
    }

    /// Converts a GeoJSON geometry.
    ///
    /// Polygon and MultiPolygon are supported, as is a GeometryCollection
    /// made only of those. Ring winding order is not checked.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self> {
        let mut polygons = Vec::new();
        collect_polygons(&geometry.value, &mut polygons)?;
        Self::new(polygons)
    }

    /// Bounding box of every vertex, usable as a containment prefilter.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// True iff any member polygon contains the point.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.bounds.contains(point) && self.polygons.iter().any(|p| p.contains(point))
    }
}

fn collect_polygons(value: &geojson::Value, out: &mut Vec<Polygon>) -> Result<()> {
    match value {
        geojson::Value::Polygon(rings) => out.push(Polygon::from_positions(rings)?),
        geojson::Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.push(Polygon::from_positions(rings)?);
            }
        }
        geojson::Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_polygons(&geometry.value, out)?;
            }
        }
        geojson::Value::Point(_) | geojson::Value::MultiPoint(_) => {
            return Err(GeoError::InvalidGeometry("point geometry cannot contain points".into()));
        }
        geojson::Value::LineString(_) | geojson::Value::MultiLineString(_) => {
            return Err(GeoError::InvalidGeometry("line geometry cannot contain points".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        Ring::new(vec![[min, min], [max, min], [max, max], [min, max], [min, min]]).unwrap()
    }

    fn pt(lng: f64, lat: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_ring_drops_closing_vertex() {
        assert_eq!(square(0.0, 1.0).vertices().len(), 4);
    }

    #[test]
    fn test_ring_rejects_degenerate_input() {
        assert!(Ring::new(vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).is_err());
        assert!(Ring::new(vec![[0.0, 0.0], [1.0, f64::NAN], [1.0, 1.0]]).is_err());
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = Polygon::new(vec![square(0.0, 10.0), square(4.0, 6.0)]).unwrap();
        assert!(polygon.contains(&pt(2.0, 2.0)));
        assert!(!polygon.contains(&pt(5.0, 5.0)), "point in hole must be excluded");
        assert!(!polygon.contains(&pt(11.0, 5.0)));
    }

    #[test]
    fn test_winding_order_is_irrelevant() {
        let clockwise = Ring::new(vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]).unwrap();
        let polygon = Polygon::new(vec![clockwise]).unwrap();
        assert!(polygon.contains(&pt(1.0, 1.0)));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening north
        let ring = Ring::new(vec![
            [0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [2.0, 3.0], [2.0, 1.0], [1.0, 1.0], [1.0, 3.0], [0.0, 3.0],
        ])
        .unwrap();
        let polygon = Polygon::new(vec![ring]).unwrap();
        assert!(polygon.contains(&pt(0.5, 2.0)));
        assert!(!polygon.contains(&pt(1.5, 2.0)));
        assert!(polygon.contains(&pt(1.5, 0.5)));
    }

    #[test]
    fn test_multipolygon_union() {
        let geometry = geojson::Geometry::new(geojson::Value::MultiPolygon(vec![
            vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]]],
            vec![vec![vec![5.0, 5.0], vec![6.0, 5.0], vec![6.0, 6.0], vec![5.0, 6.0], vec![5.0, 5.0]]],
        ]));
        let area = Area::from_geojson(&geometry).unwrap();
        assert!(area.contains(&pt(0.5, 0.5)));
        assert!(area.contains(&pt(5.5, 5.5)));
        assert!(!area.contains(&pt(3.0, 3.0)));
        assert_eq!(area.bounds().ne, pt(6.0, 6.0));
    }

    #[test]
    fn test_centroid_of_convex_polygon_is_contained() {
        let vertices = vec![[12.90, 50.80], [12.95, 50.81], [12.94, 50.85], [12.89, 50.84]];
        let (sum_lng, sum_lat) = vertices
            .iter()
            .fold((0.0, 0.0), |(a, b), [lng, lat]| (a + lng, b + lat));
        let centroid = pt(sum_lng / 4.0, sum_lat / 4.0);
        let area = Area::new(vec![Polygon::new(vec![Ring::new(vertices).unwrap()]).unwrap()]).unwrap();
        assert!(area.contains(&centroid));
        assert!(!area.contains(&pt(-73.98, 40.75)));
    }

    #[test]
    fn test_non_areal_geometry_is_rejected() {
        let geometry = geojson::Geometry::new(geojson::Value::Point(vec![12.9, 50.8]));
        assert!(matches!(Area::from_geojson(&geometry), Err(GeoError::InvalidGeometry(_))));
    }
}
