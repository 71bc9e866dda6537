//! Test fixtures for walk-planner.
//!
//! Provides realistic test data including:
//! - Denver parks and landmarks
//! - Helpers for checking the coverage and shape of a plan
#![allow(dead_code, unused_imports)]

pub mod denver_locations;

use std::collections::HashMap;

use chrono::NaiveTime;
use walk_planner::{PlanResult, Route, Stop};

pub use denver_locations::*;

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid fixture time")
}

/// Every input stop appears in exactly one route, exactly once.
pub fn assert_covers_exactly(result: &PlanResult, stops: &[Stop]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for route in &result.routes {
        for routed in &route.stops {
            *seen.entry(routed.stop.id.as_str()).or_default() += 1;
        }
    }

    assert_eq!(seen.len(), stops.len(), "route stop set differs from input");
    for stop in stops {
        assert_eq!(seen.get(stop.id.as_str()), Some(&1), "stop {} not visited exactly once", stop.id);
    }
}

/// Positions run 0..len and the route starts at its earliest-due stop.
pub fn assert_route_shape(route: &Route) {
    assert!(!route.is_empty(), "group {} produced an empty route", route.group);
    for (expected, routed) in route.stops.iter().enumerate() {
        assert_eq!(routed.position, expected);
    }

    let earliest = route
        .stops
        .iter()
        .map(|routed| routed.stop.desired_time)
        .min()
        .expect("non-empty route");
    let first = route.first().expect("non-empty route");
    assert_eq!(first.desired_time, earliest, "group {} does not start at its earliest stop", route.group);
}
