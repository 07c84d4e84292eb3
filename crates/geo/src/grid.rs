//! Zoom-dependent grid cells for map clustering.
//!
//! Cell size is `0.1° / 2^(zoom - 10)`: 0.1° at zoom 10, halving with every
//! zoom level above it and doubling with every level below.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// Cell size in degrees at [`REFERENCE_ZOOM`].
pub const REFERENCE_CELL_SIZE: f64 = 0.1;

/// Zoom level at which cells are [`REFERENCE_CELL_SIZE`] degrees wide.
pub const REFERENCE_ZOOM: i32 = 10;

/// Cells spanning 180° must stay below this count for every `i64` index
/// to be exact.
const MAX_CELLS_PER_HALF_TURN: f64 = i64::MAX as f64;

/// Returns the grid cell size in degrees for a zoom level.
///
/// Fails with [`GeoError::InvalidZoom`] if the size is not a positive finite
/// number, or so small that cell indices would no longer fit an `i64`.
///
/// # Example
/// ```
/// use culturemap_geo::cell_size_for_zoom;
///
/// assert_eq!(cell_size_for_zoom(10).unwrap(), 0.1);
/// assert_eq!(cell_size_for_zoom(11).unwrap(), 0.05);
/// ```
pub fn cell_size_for_zoom(zoom: i32) -> Result<f64> {
    let cell_size = REFERENCE_CELL_SIZE / 2f64.powi(zoom.saturating_sub(REFERENCE_ZOOM));
    if cell_size.is_finite() && cell_size > 0.0 && 180.0 / cell_size < MAX_CELLS_PER_HALF_TURN {
        Ok(cell_size)
    } else {
        Err(GeoError::InvalidZoom { zoom, cell_size })
    }
}

/// Quantized cell key: floor-divided longitude and latitude indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// `floor(lng / cell_size)`
    pub lng_index: i64,
    /// `floor(lat / cell_size)`
    pub lat_index: i64,
}

impl GridCell {
    /// Southwest corner of the cell as `(lng, lat)` degrees.
    pub fn origin(&self, cell_size: f64) -> (f64, f64) {
        (self.lng_index as f64 * cell_size, self.lat_index as f64 * cell_size)
    }
}

/// Assigns a point to its grid cell.
///
/// `cell_size` must come from [`cell_size_for_zoom`], which keeps every
/// index within `i64` range.
#[inline]
pub fn grid_cell(point: &Coordinate, cell_size: f64) -> GridCell {
    GridCell {
        lng_index: (point.longitude / cell_size).floor() as i64,
        lat_index: (point.latitude / cell_size).floor() as i64,
    }
}
