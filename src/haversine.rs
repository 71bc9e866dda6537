//! Great-circle distance and the matrix provider built on it.
//!
//! Straight-line distance on a spherical earth. Ignores roads, but needs no
//! network access and is the default metric for ordering stops.

use crate::error::Result;
use crate::models::Coordinate;
use crate::traits::DistanceMatrixProvider;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
///
/// Inputs are expected to be valid WGS-84 coordinates.
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    /// Full symmetric matrix; never fails.
    pub fn distances(locations: &[Coordinate]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i + 1..n {
                let meters = distance(locations[i], locations[j]);
                matrix[i][j] = meters;
                matrix[j][i] = meters;
            }
        }

        matrix
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[Coordinate]) -> Result<Vec<Vec<f64>>> {
        Ok(Self::distances(locations))
    }
}
