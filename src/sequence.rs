//! Greedy nearest-neighbour ordering of a single group.
//!
//! The route starts at the earliest-due stop and then always walks to the
//! closest stop not yet visited. Ties are broken by the group's input order,
//! which makes the result repeatable for a given group.

use chrono::NaiveTime;

use crate::error::{PlanError, Result};
use crate::haversine::HaversineMatrix;
use crate::models::{Coordinate, Stop};
use crate::traits::DistanceMatrixProvider;

/// Stops of one group in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<'a> {
    pub stops: Vec<&'a Stop>,
    /// Sum of leg distances in meters.
    pub total_distance_m: f64,
}

/// Order a group using great-circle distances.
pub fn sequence<'a>(group: &[&'a Stop]) -> Sequence<'a> {
    let locations: Vec<Coordinate> = group.iter().map(|stop| stop.location).collect();
    let matrix = HaversineMatrix::distances(&locations);
    build(group, &matrix)
}

/// Order a group using distances from `metric`.
pub fn sequence_with<'a, M>(group: &[&'a Stop], metric: &M) -> Result<Sequence<'a>>
where
    M: DistanceMatrixProvider + ?Sized,
{
    let locations: Vec<Coordinate> = group.iter().map(|stop| stop.location).collect();
    let matrix = metric.matrix_for(&locations)?;
    if matrix.len() != group.len() || matrix.iter().any(|row| row.len() != group.len()) {
        return Err(PlanError::distance_matrix(format!(
            "expected a {n}x{n} matrix",
            n = group.len()
        )));
    }
    Ok(build(group, &matrix))
}

fn build<'a>(group: &[&'a Stop], matrix: &[Vec<f64>]) -> Sequence<'a> {
    let times: Vec<NaiveTime> = group.iter().map(|stop| stop.desired_time).collect();
    let order = nearest_neighbor_order(&times, matrix);
    let total_distance_m = order.windows(2).map(|leg| matrix[leg[0]][leg[1]]).sum();

    Sequence {
        stops: order.into_iter().map(|index| group[index]).collect(),
        total_distance_m,
    }
}

/// Index of the earliest desired time; the first one wins a tie.
pub fn start_index(times: &[NaiveTime]) -> Option<usize> {
    let earliest = times.iter().min()?;
    times.iter().position(|time| time == earliest)
}

/// Visiting order as indices into the group.
///
/// `matrix[i][j]` is the distance from stop `i` to stop `j`.
pub fn nearest_neighbor_order(times: &[NaiveTime], matrix: &[Vec<f64>]) -> Vec<usize> {
    let Some(start) = start_index(times) else {
        return Vec::new();
    };

    let mut route = Vec::with_capacity(times.len());
    route.push(start);
    let mut remaining: Vec<usize> = (0..times.len()).filter(|&i| i != start).collect();

    while !remaining.is_empty() {
        let last = route[route.len() - 1];
        let mut best = 0;
        for slot in 1..remaining.len() {
            if matrix[last][remaining[slot]] < matrix[last][remaining[best]] {
                best = slot;
            }
        }
        // `remove` keeps the rest in input order for the next tie-break.
        route.push(remaining.remove(best));
    }

    route
}
