//! Caller-owned memoisation of plans.
//!
//! Planning itself keeps no state between calls. A dispatcher that re-renders
//! the same day's stops can keep a [`PlanCache`] and skip recomputation when
//! neither the stops nor the settings changed.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::error::Result;
use crate::models::{PlanResult, Stop};
use crate::solver::{plan_with, PlanOptions};
use crate::traits::DistanceMatrixProvider;

/// Hash of everything that can change a plan: the stops in input order, `k`,
/// and the partition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanFingerprint(u64);

impl PlanFingerprint {
    pub fn of(stops: &[Stop], k: usize, options: &PlanOptions) -> Self {
        let mut hasher = DefaultHasher::new();

        stops.len().hash(&mut hasher);
        for stop in stops {
            stop.id.hash(&mut hasher);
            stop.label.hash(&mut hasher);
            stop.location.lat.to_bits().hash(&mut hasher);
            stop.location.lon.to_bits().hash(&mut hasher);
            stop.desired_time.hash(&mut hasher);
        }

        k.hash(&mut hasher);
        let partition = &options.partition;
        partition.max_iterations.hash(&mut hasher);
        partition.restarts.hash(&mut hasher);
        partition.seed.hash(&mut hasher);

        Self(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Plans keyed by [`PlanFingerprint`], bound to one distance backend.
#[derive(Debug)]
pub struct PlanCache<M> {
    metric: M,
    options: PlanOptions,
    entries: HashMap<PlanFingerprint, PlanResult>,
}

impl<M> PlanCache<M>
where
    M: DistanceMatrixProvider + Sync,
{
    pub fn new(metric: M, options: PlanOptions) -> Self {
        Self {
            metric,
            options,
            entries: HashMap::new(),
        }
    }

    /// Cached plan for these stops, computing it on a miss.
    ///
    /// Failed plans are not cached.
    pub fn plan(&mut self, stops: &[Stop], k: usize) -> Result<&PlanResult> {
        let key = PlanFingerprint::of(stops, k, &self.options);
        if !self.entries.contains_key(&key) {
            let result = plan_with(stops, k, &self.options, &self.metric)?;
            self.entries.insert(key, result);
        } else {
            debug!(fingerprint = key.value(), "route plan served from cache");
        }
        Ok(&self.entries[&key])
    }

    pub fn get(&self, stops: &[Stop], k: usize) -> Option<&PlanResult> {
        self.entries.get(&PlanFingerprint::of(stops, k, &self.options))
    }

    pub fn invalidate(&mut self, stops: &[Stop], k: usize) -> Option<PlanResult> {
        self.entries.remove(&PlanFingerprint::of(stops, k, &self.options))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
