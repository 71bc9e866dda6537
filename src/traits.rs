//! Seams between the planner and its distance backends.

use crate::error::Result;
use crate::models::Coordinate;

/// Provides a distance matrix, in meters, for a set of locations.
///
/// The matrix is indexed by the provided location order and must be square
/// with one row per location.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Coordinate]) -> Result<Vec<Vec<f64>>>;
}

impl<T: DistanceMatrixProvider + ?Sized> DistanceMatrixProvider for &T {
    fn matrix_for(&self, locations: &[Coordinate]) -> Result<Vec<Vec<f64>>> {
        (**self).matrix_for(locations)
    }
}
