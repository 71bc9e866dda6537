//! Route geometry as a sequence of coordinates.
//!
//! Encoding to a compact wire format (or to a map layer) is left to the
//! caller; the planner only hands out the decoded points.

use serde::{Deserialize, Serialize};

use crate::haversine;
use crate::models::Coordinate;

/// A path through (latitude, longitude) points in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Points as (longitude, latitude), the order most map layers expect.
    pub fn lon_lat(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&(lat, lon)| (lon, lat)).collect()
    }

    /// Great-circle length of the path in meters.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| haversine::distance(Coordinate::from(leg[0]), Coordinate::from(leg[1])))
            .sum()
    }
}
