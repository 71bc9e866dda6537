//! Route planning pipeline: validate, partition, sequence each group.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{PlanWarning, Result};
use crate::haversine::HaversineMatrix;
use crate::models::{GroupId, PlanResult, Route, RoutedStop, Stop, StopRecord};
use crate::partition::{partition, PartitionOptions};
use crate::sequence::{sequence_with, Sequence};
use crate::traits::DistanceMatrixProvider;
use crate::validation::{stops_from_records, validate_route_count, validate_stops};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub partition: PartitionOptions,
    /// Sequence groups on the rayon pool. Results are identical either way.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            partition: PartitionOptions::default(),
            parallel: true,
        }
    }
}

/// Split `stops` into at most `k` routes ordered by great-circle distance.
pub fn plan(stops: &[Stop], k: usize) -> Result<PlanResult> {
    plan_with(stops, k, &PlanOptions::default(), &HaversineMatrix)
}

/// Validate raw records and plan them in one step.
pub fn plan_records(records: &[StopRecord], k: usize, options: &PlanOptions) -> Result<PlanResult> {
    validate_route_count(k, records.len())?;
    let stops = stops_from_records(records)?;
    plan_with(&stops, k, options, &HaversineMatrix)
}

/// Plan with explicit options and distance backend.
///
/// Returns one route per non-empty group, ordered by group id. Groups the
/// clustering left empty are reported as warnings instead of routes.
pub fn plan_with<M>(stops: &[Stop], k: usize, options: &PlanOptions, metric: &M) -> Result<PlanResult>
where
    M: DistanceMatrixProvider + Sync + ?Sized,
{
    validate_route_count(k, stops.len())?;
    validate_stops(stops)?;

    let assignment = partition(stops, k, &options.partition)?;

    let mut groups: Vec<Vec<&Stop>> = vec![Vec::new(); k];
    for (stop, &label) in stops.iter().zip(&assignment.labels) {
        groups[label].push(stop);
    }

    let mut warnings = Vec::new();
    let mut work: Vec<(GroupId, Vec<&Stop>)> = Vec::with_capacity(k);
    for (group, members) in groups.into_iter().enumerate() {
        if members.is_empty() {
            warn!(group, k, "group received no stops, dropping it");
            warnings.push(PlanWarning::EmptyGroup { group });
        } else {
            work.push((group, members));
        }
    }

    let routes: Vec<Route> = if options.parallel {
        work.par_iter()
            .map(|(group, members)| sequence_with(members, metric).map(|seq| to_route(*group, seq)))
            .collect::<Result<_>>()?
    } else {
        work.iter()
            .map(|(group, members)| sequence_with(members, metric).map(|seq| to_route(*group, seq)))
            .collect::<Result<_>>()?
    };

    info!(
        stops = stops.len(),
        k,
        routes = routes.len(),
        inertia = assignment.inertia,
        "route plan computed"
    );

    Ok(PlanResult { routes, warnings })
}

fn to_route(group: GroupId, sequence: Sequence<'_>) -> Route {
    Route {
        group,
        stops: sequence
            .stops
            .into_iter()
            .enumerate()
            .map(|(position, stop)| RoutedStop {
                position,
                stop: stop.clone(),
            })
            .collect(),
        total_distance_m: sequence.total_distance_m,
    }
}
