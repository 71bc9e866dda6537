//! K-means partitioning of stops into walker groups.
//!
//! Clustering works on raw (latitude, longitude) degrees as if they were a
//! flat plane. Distances inside a group are still measured on the sphere when
//! the group is sequenced.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::models::{Coordinate, GroupId, Stop};
use crate::validation::validate_route_count;

type Point = [f64; 2];

#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Lloyd iterations allowed per restart.
    pub max_iterations: usize,
    /// Independent k-means++ restarts; the lowest inertia wins.
    pub restarts: usize,
    pub seed: u64,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            restarts: 4,
            seed: 42,
        }
    }
}

/// Group assignment for one set of stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Group of each stop, indexed like the input.
    pub labels: Vec<GroupId>,
    /// Final centroids as (lat, lon); one per requested group.
    pub centroids: Vec<Coordinate>,
    /// Total within-group squared distance.
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl Partition {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Number of stops in each group, indexed by group id.
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Groups that attracted no stops.
    pub fn empty_groups(&self) -> Vec<GroupId> {
        self.group_sizes()
            .iter()
            .enumerate()
            .filter(|(_, size)| **size == 0)
            .map(|(group, _)| group)
            .collect()
    }
}

/// Assign each stop to one of `k` groups.
pub fn partition(stops: &[Stop], k: usize, options: &PartitionOptions) -> Result<Partition> {
    let locations: Vec<Coordinate> = stops.iter().map(|stop| stop.location).collect();
    partition_locations(&locations, k, options)
}

/// Same as [`partition`] for bare coordinates.
pub fn partition_locations(
    locations: &[Coordinate],
    k: usize,
    options: &PartitionOptions,
) -> Result<Partition> {
    validate_route_count(k, locations.len())?;

    let points: Vec<Point> = locations.iter().map(|c| [c.lat, c.lon]).collect();
    let restarts = options.restarts.max(1);

    // Each restart owns its RNG, so the winner does not depend on scheduling.
    let mut runs: Vec<Run> = (0..restarts)
        .into_par_iter()
        .map(|restart| {
            let mut rng = StdRng::seed_from_u64(restart_seed(options.seed, restart));
            let run = lloyd(&points, k, options, &mut rng);
            debug!(
                restart,
                iterations = run.iterations,
                inertia = run.inertia,
                converged = run.converged,
                "k-means restart finished"
            );
            run
        })
        .collect();

    let mut best = 0;
    for (index, run) in runs.iter().enumerate().skip(1) {
        if run.inertia < runs[best].inertia {
            best = index;
        }
    }
    debug!(restart = best, inertia = runs[best].inertia, k, "k-means restart chosen");

    let run = runs.swap_remove(best);
    Ok(Partition {
        labels: run.labels,
        centroids: run.centroids.iter().map(|c| Coordinate::new(c[0], c[1])).collect(),
        inertia: run.inertia,
        iterations: run.iterations,
        converged: run.converged,
    })
}

#[derive(Debug)]
struct Run {
    labels: Vec<GroupId>,
    centroids: Vec<Point>,
    inertia: f64,
    iterations: usize,
    converged: bool,
}

fn restart_seed(seed: u64, restart: usize) -> u64 {
    seed ^ (restart as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn lloyd(points: &[Point], k: usize, options: &PartitionOptions, rng: &mut StdRng) -> Run {
    let mut centroids = seed_centroids(points, k, rng);
    let mut labels = assign(points, &centroids);
    let mut iterations = 0;
    let mut converged = false;

    // Converged only once an iteration leaves every assignment unchanged.
    while iterations < options.max_iterations {
        iterations += 1;

        centroids = update_centroids(points, &labels, &centroids);
        let next = assign(points, &centroids);
        let stable = next == labels;
        labels = next;

        if stable {
            converged = true;
            break;
        }
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(point, &label)| squared_distance(*point, centroids[label]))
        .sum();

    Run {
        labels,
        centroids,
        inertia,
        iterations,
        converged,
    }
}

/// k-means++ seeding: each further centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn seed_centroids(points: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut chosen = vec![rng.random_range(0..points.len())];
    let mut nearest: Vec<f64> = points
        .iter()
        .map(|point| squared_distance(*point, points[chosen[0]]))
        .collect();

    while chosen.len() < k {
        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut acc = 0.0;
            let mut pick = None;
            for (index, &weight) in nearest.iter().enumerate() {
                if weight <= 0.0 {
                    continue;
                }
                acc += weight;
                pick = Some(index);
                if acc > target {
                    break;
                }
            }
            pick.unwrap_or(0)
        } else {
            // Every remaining point coincides with a centroid.
            let unused: Vec<usize> = (0..points.len()).filter(|i| !chosen.contains(i)).collect();
            unused[rng.random_range(0..unused.len())]
        };

        chosen.push(next);
        for (index, point) in points.iter().enumerate() {
            nearest[index] = nearest[index].min(squared_distance(*point, points[next]));
        }
    }

    chosen.into_iter().map(|index| points[index]).collect()
}

/// Nearest centroid per point; ties go to the lower centroid index.
fn assign(points: &[Point], centroids: &[Point]) -> Vec<GroupId> {
    points
        .iter()
        .map(|point| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (index, centroid) in centroids.iter().enumerate() {
                let d = squared_distance(*point, *centroid);
                if d < best_distance {
                    best_distance = d;
                    best = index;
                }
            }
            best
        })
        .collect()
}

/// Mean of each group's members. A group with no members keeps its centroid.
///
/// The mean is accumulated incrementally so a group of identical points
/// lands exactly on them.
fn update_centroids(points: &[Point], labels: &[GroupId], previous: &[Point]) -> Vec<Point> {
    let mut means = previous.to_vec();
    let mut counts = vec![0usize; previous.len()];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        let n = counts[label] as f64;
        if counts[label] == 1 {
            means[label] = *point;
        } else {
            means[label][0] += (point[0] - means[label][0]) / n;
            means[label][1] += (point[1] - means[label][1]) / n;
        }
    }

    means
}

fn squared_distance(a: Point, b: Point) -> f64 {
    let dlat = a[0] - b[0];
    let dlon = a[1] - b[1];
    dlat * dlat + dlon * dlon
}
